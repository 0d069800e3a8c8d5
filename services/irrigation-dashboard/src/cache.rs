//! Offline asset cache: versioned name-keyed store with install/activate/fetch

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{OfflineCacheConfig, ServerConfig};
use crate::io::{HttpClient, HttpResponse};

/// A stored response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAsset {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl From<HttpResponse> for CachedAsset {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            content_type: response.content_type,
            body: response.body,
        }
    }
}

/// Named caches, kept in creation order
#[derive(Debug, Default)]
pub struct CacheStorage {
    caches: Vec<(String, HashMap<String, CachedAsset>)>,
}

impl CacheStorage {
    pub fn names(&self) -> Vec<String> {
        self.caches.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.caches.iter().any(|(n, _)| n == name)
    }

    /// Store entries under `name`, creating the cache if needed
    pub fn put_all(&mut self, name: &str, entries: Vec<(String, CachedAsset)>) {
        let index = match self.caches.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.caches.push((name.to_string(), HashMap::new()));
                self.caches.len() - 1
            }
        };
        self.caches[index].1.extend(entries);
    }

    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.caches.len();
        self.caches.retain(|(n, _)| n != name);
        self.caches.len() != before
    }

    /// Look a path up across every cache, oldest cache first
    pub fn lookup(&self, path: &str) -> Option<&CachedAsset> {
        self.caches.iter().find_map(|(_, entries)| entries.get(path))
    }

    pub fn entry_count(&self, name: &str) -> usize {
        self.caches
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entries)| entries.len())
            .unwrap_or(0)
    }
}

/// Thread-safe cache storage handle
pub type CacheHandle = Arc<RwLock<CacheStorage>>;

pub fn new_cache_handle() -> CacheHandle {
    Arc::new(RwLock::new(CacheStorage::default()))
}

/// Where a served asset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Network,
}

/// Cache-first asset front for the dashboard's static routes
#[derive(Clone)]
pub struct OfflineCache {
    storage: CacheHandle,
    name: String,
    manifest: Vec<String>,
    upstream: ServerConfig,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for OfflineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineCache")
            .field("name", &self.name)
            .field("upstream", &self.upstream.base_url)
            .field("manifest", &self.manifest.len())
            .finish()
    }
}

impl OfflineCache {
    pub fn new(
        config: &OfflineCacheConfig,
        upstream: ServerConfig,
        storage: CacheHandle,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        tracing::debug!(
            "Created offline cache '{}' with {} manifest entries",
            config.name,
            config.assets.len()
        );

        Self {
            storage,
            name: config.name.clone(),
            manifest: config.assets.clone(),
            upstream,
            http,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage(&self) -> &CacheHandle {
        &self.storage
    }

    /// Fetch every manifest entry and store them under the current name.
    ///
    /// All-or-nothing: any failed or non-2xx fetch aborts without storing.
    pub async fn install(&self) -> crate::Result<usize> {
        let mut entries = Vec::with_capacity(self.manifest.len());
        for path in &self.manifest {
            let url = self.upstream.endpoint(path);
            let response = self.http.get(&url).await.map_err(|e| {
                crate::DashboardError::Cache(format!("Failed to fetch {}: {}", path, e))
            })?;
            if !response.is_success() {
                return Err(crate::DashboardError::Cache(format!(
                    "Failed to fetch {}: status {}",
                    path, response.status
                )));
            }
            entries.push((path.clone(), CachedAsset::from(response)));
        }

        let count = entries.len();
        self.storage.write().await.put_all(&self.name, entries);
        tracing::info!("Installed {} assets into cache '{}'", count, self.name);
        Ok(count)
    }

    /// Drop every cache whose name differs from the current version
    pub async fn activate(&self) -> Vec<String> {
        let mut storage = self.storage.write().await;
        let stale: Vec<String> = storage
            .names()
            .into_iter()
            .filter(|n| n != &self.name)
            .collect();
        for name in &stale {
            storage.delete(name);
            tracing::info!("Deleted stale cache '{}'", name);
        }
        stale
    }

    /// Serve from cache when present, otherwise from the network.
    /// Network responses are not written back.
    pub async fn fetch(&self, path: &str) -> crate::Result<(CachedAsset, Source)> {
        if let Some(asset) = self.storage.read().await.lookup(path) {
            tracing::debug!("Cache hit for {}", path);
            return Ok((asset.clone(), Source::Cache));
        }

        tracing::debug!("Cache miss for {}, fetching from network", path);
        let response = self.http.get(&self.upstream.endpoint(path)).await?;
        Ok((CachedAsset::from(response), Source::Network))
    }
}
