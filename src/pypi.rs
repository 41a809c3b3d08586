//! PyPI JSON API client.
//!
//! Endpoint shape: `GET {base}/{package}/json`. Lookups go through a
//! process-lifetime cache keyed by `(package, reference version)` with a
//! five-minute time-to-live; within the TTL a package costs at most one
//! registry round-trip per reference version.

use crate::parsers::{normalize_name, Freshness};
use anyhow::Context as _;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Time source for cache expiry. Injected so tests drive the TTL
/// deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Registry answer for one package, classified against the reference
/// version the caller supplied. Comparison is exact-string only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub latest_version: String,
    pub freshness: Freshness,
    pub package_url: String,
    pub summary: String,
    pub home_page: String,
}

/// PyPI JSON API response, reduced to the fields the tracker reads.
#[derive(Debug, Deserialize)]
struct PyPiResponse {
    info: PyPiInfo,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    version: String,
    summary: Option<String>,
    home_page: Option<String>,
    project_url: Option<String>,
    package_url: Option<String>,
}

struct CacheEntry {
    info: VersionInfo,
    fetched_at: Instant,
}

/// Client for querying PyPI, with the version cache it owns.
pub struct PyPiClient<C: Clock = SystemClock> {
    client: reqwest::Client,
    base_url: String,
    ttl: Duration,
    clock: C,
    cache: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl PyPiClient {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for PyPiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PyPiClient<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("python-dep-tracker/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: "https://pypi.org/pypi".to_string(),
            ttl: DEFAULT_CACHE_TTL,
            clock,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Latest-version lookup for one package.
    ///
    /// Cache hits younger than the TTL return without network access. A
    /// non-success response or transport error yields `None` (logged, not
    /// cached); the caller treats the package's latest version as unknown.
    pub async fn resolve(&self, name: &str, reference_version: &str) -> Option<VersionInfo> {
        let key = (normalize_name(name), reference_version.to_string());
        if let Some(info) = self.cached(&key) {
            debug!(package = name, "cache hit");
            return Some(info);
        }

        match self.fetch(name).await {
            Ok(info) => {
                let info = build_info(name, reference_version, info);
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert(
                        key,
                        CacheEntry {
                            info: info.clone(),
                            fetched_at: self.clock.now(),
                        },
                    );
                }
                Some(info)
            }
            Err(err) => {
                warn!(package = name, "version lookup failed: {err:#}");
                None
            }
        }
    }

    fn cached(&self, key: &(String, String)) -> Option<VersionInfo> {
        let cache = self.cache.lock().ok()?;
        let entry = cache.get(key)?;
        if self.clock.now().duration_since(entry.fetched_at) < self.ttl {
            Some(entry.info.clone())
        } else {
            None
        }
    }

    async fn fetch(&self, name: &str) -> anyhow::Result<PyPiInfo> {
        let url = format!("{}/{name}/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        if !response.status().is_success() {
            anyhow::bail!("registry returned {} for '{name}'", response.status());
        }

        let data: PyPiResponse = response
            .json()
            .await
            .with_context(|| format!("invalid JSON payload for '{name}'"))?;
        Ok(data.info)
    }
}

fn build_info(name: &str, reference_version: &str, info: PyPiInfo) -> VersionInfo {
    let freshness = if reference_version == info.version {
        Freshness::UpToDate
    } else {
        Freshness::Outdated
    };

    let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };

    VersionInfo {
        freshness,
        package_url: info
            .package_url
            .and_then(non_empty)
            .unwrap_or_else(|| format!("https://pypi.org/project/{name}/")),
        summary: info.summary.unwrap_or_default(),
        home_page: info
            .home_page
            .and_then(non_empty)
            .or(info.project_url)
            .unwrap_or_default(),
        latest_version: info.version,
    }
}
