//! # Catalog Integration Module
//!
//! Access layer for the music catalog Web API. It covers the three browse
//! endpoints the application displays and nothing else.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (tables, JSON output)
//!          ↓
//! CatalogService   - normalizes payloads into Category / Album / Playlist
//!          ↓
//! CatalogClient    - authenticated GET, non-200 → Error::Request
//!          ↓
//! TokenManager     - client-credentials grant, token kept in a TokenCache
//!          ↓
//! Catalog Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /browse/categories?limit=12`
//! - `GET /browse/new-releases?limit=12`
//! - `GET /browse/featured-playlists`
//! - `POST /api/token` (`grant_type=client_credentials`)
//!
//! ## Error Handling
//!
//! Each call is a single attempt. Authentication and request failures carry
//! the provider's raw response body and are returned to the caller as-is;
//! there is no retry, no backoff and no partial result.
//!
//! ## Media Fallback
//!
//! Items without artwork get [`crate::utils::PLACEHOLDER_IMAGE_URL`], so
//! every record can be rendered with an image.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let tokens = Arc::new(TokenManager::new(http.clone(), credentials, token_url, cache));
//! let service = CatalogService::new(CatalogClient::new(http, api_url, tokens));
//!
//! for album in service.get_new_releases().await? {
//!     println!("{} - {}", album.release_date, album.name);
//! }
//! ```

mod browse;
mod client;

pub use browse::CatalogService;
pub use browse::PAGE_SIZE;
pub use browse::normalize_categories;
pub use browse::normalize_featured_playlists;
pub use browse::normalize_new_releases;
pub use client::CatalogClient;
