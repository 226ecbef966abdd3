mod auth;
mod cache;

pub use auth::TOKEN_CACHE_KEY;
pub use auth::TokenManager;
pub use cache::FileCache;
pub use cache::MemoryCache;
pub use cache::TokenCache;
