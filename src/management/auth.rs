use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, header};
use tokio::sync::RwLock;

use crate::{
    error::{Error, Res},
    management::TokenCache,
    types::{AccessToken, Credentials, TokenResponse},
    utils,
};

/// Cache key the access token is stored under.
pub const TOKEN_CACHE_KEY: &str = "catalog_access_token";

/// Owns the client-credentials token lifecycle.
///
/// Build one per process and share it behind an `Arc`. The token itself lives
/// in the injected [`TokenCache`]; the manager only remembers the last token
/// it issued so callers can inspect its expiry.
///
/// Refreshes are not serialized. Concurrent callers that all miss the cache
/// each perform their own token exchange and the last cache write wins.
pub struct TokenManager {
    http: Client,
    credentials: Credentials,
    token_url: String,
    cache: Arc<dyn TokenCache>,
    token: RwLock<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(
        http: Client,
        credentials: Credentials,
        token_url: impl Into<String>,
        cache: Arc<dyn TokenCache>,
    ) -> Self {
        Self {
            http,
            credentials,
            token_url: token_url.into(),
            cache,
            token: RwLock::new(None),
        }
    }

    /// Returns a cached token, exchanging credentials for a new one on a miss.
    pub async fn get_token(&self) -> Res<String> {
        if let Some(token) = self.cache.get(TOKEN_CACHE_KEY).await? {
            tracing::debug!("using cached access token");
            return Ok(token);
        }

        self.refresh_token().await
    }

    /// Performs a client-credentials grant against the token endpoint.
    ///
    /// On success the token is written to the cache with a TTL of its
    /// lifetime minus [`utils::TOKEN_EXPIRY_MARGIN_SECS`]. Any status other
    /// than `200 OK` yields [`Error::Auth`] with the raw body and leaves the
    /// cache untouched.
    pub async fn refresh_token(&self) -> Res<String> {
        let encoded = utils::encode_basic_credentials(
            &self.credentials.client_id,
            &self.credentials.client_secret,
        );

        let response = self
            .http
            .post(&self.token_url)
            .header(header::AUTHORIZATION, format!("Basic {encoded}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!(%status, "{body}");
            return Err(Error::Auth { body });
        }

        let token_data: TokenResponse = serde_json::from_str(&body)?;
        let now = Utc::now();
        // Lifetimes past the representable range are clamped.
        let expires_at = i64::try_from(token_data.expires_in)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let token = AccessToken {
            value: token_data.access_token,
            expires_at,
        };

        let ttl = Duration::from_secs(utils::cache_ttl_secs(token_data.expires_in));
        self.cache.set(TOKEN_CACHE_KEY, &token.value, ttl).await?;
        tracing::info!(expires_in = token_data.expires_in, "successfully obtained access token");

        let value = token.value.clone();
        *self.token.write().await = Some(token);
        Ok(value)
    }

    /// `Authorization` header value for catalog requests.
    pub async fn authorization_header(&self) -> Res<String> {
        Ok(format!("Bearer {}", self.get_token().await?))
    }

    /// Last token issued by this manager, if it has refreshed at least once.
    pub async fn current_token(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::MemoryCache;

    fn manager(cache: Arc<dyn TokenCache>) -> TokenManager {
        TokenManager::new(
            Client::new(),
            Credentials::new("id", "secret"),
            // Port 9 (discard) is never served locally; a request would fail.
            "http://127.0.0.1:9/api/token",
            cache,
        )
    }

    #[tokio::test]
    async fn test_cache_hit_skips_token_endpoint() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .set(TOKEN_CACHE_KEY, "cached-token", Duration::from_secs(60))
            .await
            .unwrap();

        let manager = manager(cache);
        assert_eq!(manager.get_token().await.unwrap(), "cached-token");
        assert_eq!(
            manager.authorization_header().await.unwrap(),
            "Bearer cached-token"
        );
        assert!(manager.current_token().await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint_is_transport_error() {
        let manager = manager(Arc::new(MemoryCache::new()));
        let err = manager.get_token().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
