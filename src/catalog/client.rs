use std::sync::Arc;

use reqwest::{Client, StatusCode, header};
use serde_json::Value;

use crate::{
    error::{Error, Res},
    management::TokenManager,
};

/// Authenticated GET access to the catalog Web API.
pub struct CatalogClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenManager>,
}

impl CatalogClient {
    pub fn new(http: Client, base_url: impl Into<String>, tokens: Arc<TokenManager>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Issues `GET {base_url}/{endpoint}` with a bearer token and returns the
    /// decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] when no token can be obtained
    /// - [`Error::Request`] for any status other than `200 OK`, carrying the raw body
    /// - [`Error::Transport`] when the request cannot be sent
    /// - [`Error::Payload`] when a `200 OK` body is not JSON
    pub async fn request(&self, endpoint: &str, params: &[(&str, String)]) -> Res<Value> {
        let url = format!(
            "{base}/{endpoint}",
            base = self.base_url,
            endpoint = endpoint.trim_start_matches('/')
        );
        let authorization = self.tokens.authorization_header().await?;

        tracing::debug!(%url, ?params, "catalog request");
        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, authorization)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!(%status, %url, "{body}");
            return Err(Error::Request { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
