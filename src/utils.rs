use std::collections::BTreeMap;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::types::Image;

/// Shared fallback for categories, albums and playlists without artwork.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://community.example-catalog.com/images/placeholder.png";

/// Seconds shaved off the token lifetime before it is cached.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

const PROVIDER_URL_KEY: &str = "spotify";

pub fn encode_basic_credentials(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{client_id}:{client_secret}"))
}

pub fn cache_ttl_secs(expires_in: u64) -> u64 {
    expires_in.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS)
}

pub fn first_image_url(images: Option<&[Image]>) -> String {
    images
        .and_then(|images| images.first())
        .and_then(|image| image.url.as_deref())
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_URL)
        .to_string()
}

pub fn external_url(urls: Option<&BTreeMap<String, String>>) -> String {
    let Some(urls) = urls else {
        return String::new();
    };

    urls.get(PROVIDER_URL_KEY)
        .or_else(|| urls.values().next())
        .cloned()
        .unwrap_or_default()
}

pub fn join_artists(artists: &[String]) -> String {
    artists.join(", ")
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
