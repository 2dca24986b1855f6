//! Lookup orchestration
//!
//! Composes normalization, the cache, and the upstream executor into the
//! single operation the tool layer exposes. Per call: normalize, derive the
//! cache key once, consult the cache, fetch on miss, populate only after a
//! fully successful fetch, format. A cache hit never touches the network;
//! a failed fetch leaves the cache unchanged.
//!
//! Concurrent misses for the same key are not coalesced: both fetch and both
//! populate, last writer wins. That matches the observed upstream contract;
//! coalescing would change upstream call counts.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::LookupCache;
use crate::error::Result;
use crate::format;
use crate::normalize::{normalize, NormalizedKey};

/// Source of identity-graph documents, injectable for tests
#[async_trait]
pub trait IdentityFetcher: Send + Sync {
    async fn fetch(&self, key: &NormalizedKey) -> Result<Value>;
}

/// The lookup pipeline behind the `get-related-address` tool
pub struct LookupService {
    cache: LookupCache,
    fetcher: Arc<dyn IdentityFetcher>,
}

impl LookupService {
    pub fn new(cache: LookupCache, fetcher: Arc<dyn IdentityFetcher>) -> Self {
        Self { cache, fetcher }
    }

    /// Resolve a raw `(platform, identity)` pair into a tool result
    ///
    /// Never fails: every error path terminates in a well-formed result with
    /// `isError` set.
    pub async fn lookup(&self, platform: &str, identity: &str) -> CallToolResult {
        let key = match normalize(platform, identity) {
            Ok(key) => key,
            Err(err) => {
                warn!(error = %err, "rejected lookup input");
                return format::error(&err);
            }
        };

        if let Some(payload) = self.cache.get(&key) {
            debug!(key = %key, "cache hit");
            return format::success(&payload);
        }

        info!(key = %key, "cache miss, fetching");
        match self.fetcher.fetch(&key).await {
            Ok(payload) => {
                self.cache.put(&key, payload.clone());
                format::success(&payload)
            }
            Err(err) => {
                warn!(key = %key, error = %err, "upstream fetch failed");
                format::error(&err)
            }
        }
    }

    /// Proactively reclaim stale cache entries; called by the sweeper task
    pub fn sweep_cache(&self) -> usize {
        let removed = self.cache.sweep();
        if removed > 0 {
            debug!(removed, "cache sweep reclaimed entries");
        }
        removed
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }
}
