//! Build script for the catalog browser CLI.
//!
//! Copies the `.env.example` template into the user's local data directory so
//! the expected configuration location already holds a documented example
//! after installation:
//! - Linux: `~/.local/share/catalogcli/.env.example`
//! - macOS: `~/Library/Application Support/catalogcli/.env.example`
//! - Windows: `%LOCALAPPDATA%/catalogcli/.env.example`
//!
//! A missing template only produces a cargo warning; directory or write
//! failures fail the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("catalogcli");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        fs::copy(&env_example_path, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
