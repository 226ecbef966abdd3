use std::{
    collections::HashMap,
    io,
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config,
    error::{Error, Res},
};

/// Key/value store with per-entry time-to-live.
///
/// The token manager has no expiry check of its own: an entry is considered
/// valid for exactly as long as the backend keeps returning it. Backends must
/// therefore honor `ttl` and stop returning an entry once it has elapsed; a
/// backend that ignores TTLs would hand out expired tokens.
#[async_trait]
pub trait TokenCache: Send + Sync {
    async fn get(&self, key: &str) -> Res<Option<String>>;

    /// Stores `value` under `key`, replacing any previous entry. A zero TTL
    /// stores an entry that is already expired.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Res<()>;
}

struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache. Entries die with the process.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenCache for MemoryCache {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::Cache(e.to_string()))?;

        let expired = match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Res<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::Cache(e.to_string()))?;
        let now = Instant::now();
        // An unrepresentable deadline is clamped to roughly a century.
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(Duration::from_secs(100 * 365 * 24 * 3600)))
            .unwrap_or(now);
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// JSON file cache shared by every invocation on the same machine.
///
/// Expiry is stored as a wall-clock timestamp since entries outlive the
/// process that wrote them.
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cache file under `<data dir>/catalogcli/cache/token.json`.
    pub fn default_location() -> Self {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        Self::new(path)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads every stored entry. A missing or unreadable file is an empty cache.
    async fn load(&self) -> Res<HashMap<String, FileEntry>> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable token cache: {e}");
                return Ok(HashMap::new());
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable token cache: {e}");
                Ok(HashMap::new())
            }
        }
    }

    async fn persist(&self, entries: &HashMap<String, FileEntry>) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Cache(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(entries).map_err(|e| Error::Cache(e.to_string()))?;

        // Readers only ever see a complete file: write aside, then rename over.
        let tmp = self.temp_path();
        if let Err(e) = async_fs::write(&tmp, json).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(Error::Cache(e.to_string()));
        }
        if let Err(e) = async_fs::rename(&tmp, &self.path).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(Error::Cache(e.to_string()));
        }
        Ok(())
    }

    /// Sibling path unique to this process and write.
    fn temp_path(&self) -> PathBuf {
        static WRITES: AtomicU64 = AtomicU64::new(0);
        let n = WRITES.fetch_add(1, Ordering::Relaxed);
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "token.json".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.{n}.tmp", std::process::id()))
    }
}

#[async_trait]
impl TokenCache for FileCache {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        let entries = self.load().await?;
        Ok(entries
            .get(key)
            .filter(|entry| Utc::now() < entry.expires_at)
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Res<()> {
        let mut entries = self.load().await?;
        let now = Utc::now();
        entries.retain(|_, entry| now < entry.expires_at);

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or_else(|| now + chrono::Duration::days(100 * 365));
        entries.insert(
            key.to_string(),
            FileEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        self.persist(&entries).await
    }
}
