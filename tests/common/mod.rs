//! Common test utilities: an in-process mock catalog provider and a
//! recording token cache.
//!
//! The mock serves `POST /api/token` and `GET /v1/browse/{name}` on an
//! ephemeral localhost port and counts every hit, so tests can assert how
//! many token exchanges a call performed.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use catalogcli::{
    Res,
    catalog::{CatalogClient, CatalogService},
    management::{TokenCache, TokenManager},
    types::Credentials,
};

pub const CLIENT_ID: &str = "id";
pub const CLIENT_SECRET: &str = "secret";
/// base64("id:secret")
pub const EXPECTED_BASIC: &str = "Basic aWQ6c2VjcmV0";

pub const CATEGORIES_FIXTURE: &str = include_str!("../fixtures/categories.json");
pub const NEW_RELEASES_FIXTURE: &str = include_str!("../fixtures/new_releases.json");
pub const FEATURED_PLAYLISTS_FIXTURE: &str = include_str!("../fixtures/featured_playlists.json");

/// A request as seen by the mock catalog endpoint.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub name: String,
    pub authorization: Option<String>,
    pub query: Option<String>,
}

pub struct MockProvider {
    pub token_hits: AtomicUsize,
    pub catalog_hits: AtomicUsize,
    token_response: Mutex<(StatusCode, Option<String>)>,
    expires_in: Mutex<u64>,
    browse: Mutex<HashMap<String, (StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
    token_requests: Mutex<Vec<(Option<String>, String)>>,
}

impl MockProvider {
    fn new() -> Self {
        let browse = HashMap::from([
            (
                "categories".to_string(),
                (StatusCode::OK, CATEGORIES_FIXTURE.to_string()),
            ),
            (
                "new-releases".to_string(),
                (StatusCode::OK, NEW_RELEASES_FIXTURE.to_string()),
            ),
            (
                "featured-playlists".to_string(),
                (StatusCode::OK, FEATURED_PLAYLISTS_FIXTURE.to_string()),
            ),
        ]);

        Self {
            token_hits: AtomicUsize::new(0),
            catalog_hits: AtomicUsize::new(0),
            token_response: Mutex::new((StatusCode::OK, None)),
            expires_in: Mutex::new(3600),
            browse: Mutex::new(browse),
            requests: Mutex::new(Vec::new()),
            token_requests: Mutex::new(Vec::new()),
        }
    }

    /// Makes the token endpoint answer with `status` and a fixed body.
    pub fn fail_token(&self, status: StatusCode, body: &str) {
        *self.token_response.lock().unwrap() = (status, Some(body.to_string()));
    }

    pub fn set_expires_in(&self, secs: u64) {
        *self.expires_in.lock().unwrap() = secs;
    }

    pub fn set_browse(&self, name: &str, status: StatusCode, body: &str) {
        self.browse
            .lock()
            .unwrap()
            .insert(name.to_string(), (status, body.to_string()));
    }

    pub fn token_hits(&self) -> usize {
        self.token_hits.load(Ordering::SeqCst)
    }

    pub fn catalog_hits(&self) -> usize {
        self.catalog_hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> Vec<(Option<String>, String)> {
        self.token_requests.lock().unwrap().clone()
    }
}

async fn token_endpoint(
    State(provider): State<Arc<MockProvider>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let n = provider.token_hits.fetch_add(1, Ordering::SeqCst) + 1;
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    provider
        .token_requests
        .lock()
        .unwrap()
        .push((authorization, body));

    let (status, fixed_body) = provider.token_response.lock().unwrap().clone();
    if let Some(body) = fixed_body {
        return (status, body);
    }

    let expires_in = *provider.expires_in.lock().unwrap();
    (
        StatusCode::OK,
        format!(
            r#"{{"access_token":"token-{n}","token_type":"Bearer","expires_in":{expires_in}}}"#
        ),
    )
}

async fn browse_endpoint(
    State(provider): State<Arc<MockProvider>>,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, String) {
    provider.catalog_hits.fetch_add(1, Ordering::SeqCst);
    provider.requests.lock().unwrap().push(RecordedRequest {
        name: name.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query,
    });

    provider
        .browse
        .lock()
        .unwrap()
        .get(&name)
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, "no such endpoint".to_string()))
}

/// Running mock provider and the URLs pointing at it.
pub struct TestProvider {
    pub provider: Arc<MockProvider>,
    pub api_url: String,
    pub token_url: String,
}

impl TestProvider {
    pub async fn start() -> Self {
        let provider = Arc::new(MockProvider::new());
        let app = Router::new()
            .route("/api/token", post(token_endpoint))
            .route("/v1/browse/{name}", get(browse_endpoint))
            .with_state(Arc::clone(&provider));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            provider,
            api_url: format!("http://{addr}/v1"),
            token_url: format!("http://{addr}/api/token"),
        }
    }

    pub fn token_manager(&self, cache: Arc<dyn TokenCache>) -> Arc<TokenManager> {
        Arc::new(TokenManager::new(
            reqwest::Client::new(),
            Credentials::new(CLIENT_ID, CLIENT_SECRET),
            self.token_url.clone(),
            cache,
        ))
    }

    pub fn service(&self, cache: Arc<dyn TokenCache>) -> CatalogService {
        let client = CatalogClient::new(
            reqwest::Client::new(),
            self.api_url.clone(),
            self.token_manager(cache),
        );
        CatalogService::new(client)
    }
}

/// Cache fake that keeps every value forever and records each write.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String, Duration)>>,
}

impl RecordingCache {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        cache
    }

    pub fn writes(&self) -> Vec<(String, String, Duration)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenCache for RecordingCache {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Res<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string(), ttl));
        Ok(())
    }
}
