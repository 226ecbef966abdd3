//! Configuration management for the catalog browser.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the client
//! credentials used for the token exchange and the provider endpoints.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (endpoints and cache backend only)
//!
//! Credentials are opaque to the crate: they are read and forwarded, never
//! validated.

use std::{env, path::PathBuf};

use crate::{
    error::{Error, Res},
    types::Credentials,
};

/// Default base URL of the catalog Web API.
pub const DEFAULT_API_URL: &str = "https://api.example-catalog.com/v1";

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.example-catalog.com/api/token";

/// Name of the application directory under the platform data directory.
pub const APP_DIR: &str = "catalogcli";

/// Backend used to keep the access token between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCacheKind {
    /// Token lives as long as the process.
    Memory,
    /// Token is written to `<data dir>/catalogcli/cache/token.json` and
    /// shared by later invocations until its TTL runs out.
    File,
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the application directory if it doesn't exist. A missing `.env`
/// file is not an error since every value may also come from the process
/// environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/catalogcli/.env`
/// - macOS: `~/Library/Application Support/catalogcli/.env`
/// - Windows: `%LOCALAPPDATA%/catalogcli/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The application directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }

    Ok(())
}

/// Returns `<data_local_dir>/catalogcli`, falling back to the working directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Returns the client ID registered with the catalog provider.
///
/// Read from `CATALOG_CLIENT_ID`.
pub fn client_id() -> Res<String> {
    required("CATALOG_CLIENT_ID")
}

/// Returns the client secret registered with the catalog provider.
///
/// Read from `CATALOG_CLIENT_SECRET`.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn client_secret() -> Res<String> {
    required("CATALOG_CLIENT_SECRET")
}

/// Returns both client credentials, failing on the first missing one.
pub fn credentials() -> Res<Credentials> {
    Ok(Credentials::new(client_id()?, client_secret()?))
}

/// Returns the catalog Web API base URL (`CATALOG_API_URL`).
///
/// Defaults to [`DEFAULT_API_URL`]. A trailing slash is stripped so endpoint
/// paths can always be joined with a single `/`.
pub fn api_url() -> String {
    optional("CATALOG_API_URL", DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the token endpoint URL (`CATALOG_TOKEN_URL`).
///
/// Defaults to [`DEFAULT_TOKEN_URL`].
pub fn token_url() -> String {
    optional("CATALOG_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the token cache backend selected by `CATALOG_TOKEN_CACHE`.
///
/// Accepts `memory` or `file` (case-insensitive); anything else, including an
/// unset variable, selects the file cache.
pub fn token_cache_kind() -> TokenCacheKind {
    parse_cache_kind(&optional("CATALOG_TOKEN_CACHE", "file"))
}

fn parse_cache_kind(value: &str) -> TokenCacheKind {
    match value.trim().to_ascii_lowercase().as_str() {
        "memory" => TokenCacheKind::Memory,
        _ => TokenCacheKind::File,
    }
}

fn required(name: &str) -> Res<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{name} must be set"))),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
