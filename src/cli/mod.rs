//! # CLI Module
//!
//! Command implementations for `catalogcli`. This is the presentation layer:
//! it owns terminal output (tables, JSON, spinners, status lines) and nothing
//! else. All catalog access goes through the [`CatalogService`] built once by
//! [`connect`] and handed to each command by reference.
//!
//! ## Commands
//!
//! - [`categories`] - browse categories
//! - [`releases`] - new album releases
//! - [`playlists`] - featured playlists
//! - [`token`] - obtain or refresh the access token
//!
//! ## Error Presentation
//!
//! Commands do not recover from catalog errors. An authentication or request
//! failure is printed with the `error!` macro, which terminates the process
//! with exit code 1.

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::Serialize;

use crate::{
    catalog::{CatalogClient, CatalogService},
    config::{self, TokenCacheKind},
    error::{Error, Res},
    management::{FileCache, MemoryCache, TokenCache, TokenManager},
};

mod browse;
mod token;

pub use browse::categories;
pub use browse::playlists;
pub use browse::releases;
pub use token::token;

/// Wires the token cache, token manager, client and service from the
/// environment. Call once per process.
pub fn connect() -> Res<CatalogService> {
    let credentials = config::credentials()?;
    let http = Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(Error::Transport)?;

    let cache: Arc<dyn TokenCache> = match config::token_cache_kind() {
        TokenCacheKind::Memory => Arc::new(MemoryCache::new()),
        TokenCacheKind::File => Arc::new(FileCache::default_location()),
    };

    let tokens = Arc::new(TokenManager::new(
        http.clone(),
        credentials,
        config::token_url(),
        cache,
    ));
    let client = CatalogClient::new(http, config::api_url(), tokens);

    Ok(CatalogService::new(client))
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn print_json<T: Serialize>(records: &T) {
    match serde_json::to_string_pretty(records) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::error!("Cannot serialize output: {}", e),
    }
}
