// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-run cache for resolved interfaces and token metadata.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::RetryPolicy;
use crate::errors::MetadataError;
use crate::metadata::{with_backoff, MetadataResolver, TokenMetadata};

/// Caches resolver results for the duration of one run.
///
/// Swap routes repeat the same handful of token addresses thousands of
/// times per dataset, so caching bounds the call volume against the
/// resolver's remote service. Only successful resolutions are cached;
/// failures are re-attempted on the next pair that needs the address.
///
/// Concurrent misses for the same address may resolve it more than
/// once. The lookups are idempotent reads, so the duplicate work is
/// harmless and the simpler locking wins.
#[derive(Debug, Default)]
pub struct MetadataCache {
    interfaces: RwLock<HashMap<Address, Arc<JsonAbi>>>,
    tokens: RwLock<HashMap<Address, TokenMetadata>>,
}

impl MetadataCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a token's display metadata through the cache.
    ///
    /// On a miss this resolves the contract's interface first (also
    /// cached), then the display values, applying `retry` to transient
    /// failures of either step.
    pub async fn resolve_token<R>(
        &self,
        resolver: &R,
        retry: &RetryPolicy,
        address: Address,
    ) -> Result<TokenMetadata, MetadataError>
    where
        R: MetadataResolver + ?Sized,
    {
        if let Some(hit) = self.tokens.read().await.get(&address) {
            debug!(token = %address, "Token metadata cache hit");
            return Ok(hit.clone());
        }

        let interface = self.resolve_interface(resolver, retry, address).await?;
        let (name, symbol) =
            with_backoff(retry, || resolver.resolve_token_display(address, &interface)).await?;

        let metadata = TokenMetadata {
            address,
            name,
            symbol,
        };
        self.tokens.write().await.insert(address, metadata.clone());
        Ok(metadata)
    }

    /// Resolve a contract's interface description through the cache.
    pub async fn resolve_interface<R>(
        &self,
        resolver: &R,
        retry: &RetryPolicy,
        address: Address,
    ) -> Result<Arc<JsonAbi>, MetadataError>
    where
        R: MetadataResolver + ?Sized,
    {
        if let Some(hit) = self.interfaces.read().await.get(&address) {
            debug!(contract = %address, "Interface cache hit");
            return Ok(Arc::clone(hit));
        }

        let interface =
            Arc::new(with_backoff(retry, || resolver.resolve_interface(address)).await?);
        self.interfaces
            .write()
            .await
            .insert(address, Arc::clone(&interface));
        Ok(interface)
    }

    /// Number of token entries currently cached.
    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Counts resolver calls and serves fixed display values.
    #[derive(Default)]
    struct CountingResolver {
        interface_calls: AtomicU32,
        display_calls: AtomicU32,
    }

    #[async_trait]
    impl MetadataResolver for CountingResolver {
        async fn resolve_interface(&self, _address: Address) -> Result<JsonAbi, MetadataError> {
            self.interface_calls.fetch_add(1, Ordering::SeqCst);
            Ok(JsonAbi::new())
        }

        async fn resolve_token_display(
            &self,
            _address: Address,
            _interface: &JsonAbi,
        ) -> Result<(String, String), MetadataError> {
            self.display_calls.fetch_add(1, Ordering::SeqCst);
            Ok(("Test Token".to_string(), "TST".to_string()))
        }
    }

    #[tokio::test]
    async fn test_second_lookup_hits_the_cache() {
        let cache = MetadataCache::new();
        let resolver = CountingResolver::default();
        let retry = RetryPolicy::disabled();
        let token = Address::repeat_byte(0x66);

        let first = cache.resolve_token(&resolver, &retry, token).await.unwrap();
        let second = cache.resolve_token(&resolver, &retry, token).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.symbol, "TST");
        assert_eq!(resolver.interface_calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.display_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.token_count().await, 1);
    }

    #[tokio::test]
    async fn test_distinct_addresses_resolve_independently() {
        let cache = MetadataCache::new();
        let resolver = CountingResolver::default();
        let retry = RetryPolicy::disabled();

        cache
            .resolve_token(&resolver, &retry, Address::repeat_byte(0x01))
            .await
            .unwrap();
        cache
            .resolve_token(&resolver, &retry, Address::repeat_byte(0x02))
            .await
            .unwrap();

        assert_eq!(resolver.interface_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.token_count().await, 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        struct FlakyResolver {
            calls: AtomicU32,
        }

        #[async_trait]
        impl MetadataResolver for FlakyResolver {
            async fn resolve_interface(&self, address: Address) -> Result<JsonAbi, MetadataError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(MetadataError::call(address, "first call fails"))
                } else {
                    Ok(JsonAbi::new())
                }
            }

            async fn resolve_token_display(
                &self,
                _address: Address,
                _interface: &JsonAbi,
            ) -> Result<(String, String), MetadataError> {
                Ok(("Recovered".to_string(), "RCV".to_string()))
            }
        }

        let cache = MetadataCache::new();
        let resolver = FlakyResolver {
            calls: AtomicU32::new(0),
        };
        let retry = RetryPolicy::disabled();
        let token = Address::repeat_byte(0x03);

        assert!(cache.resolve_token(&resolver, &retry, token).await.is_err());
        let recovered = cache.resolve_token(&resolver, &retry, token).await.unwrap();
        assert_eq!(recovered.symbol, "RCV");
    }
}
