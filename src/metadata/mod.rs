// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token metadata resolution.
//!
//! This module provides a trait-based architecture for resolving a
//! contract's interface description and a token's display name/symbol.
//! The extraction engine only ever talks to the [`MetadataResolver`]
//! trait; transport, authentication, and rate limiting belong to the
//! implementation behind it.
//!
//! # Architecture
//!
//! The resolution workflow per token address:
//!
//! 1. [`MetadataCache`] checks the per-run cache
//! 2. On a miss, [`MetadataResolver::resolve_interface`] fetches the
//!    contract's interface description
//! 3. [`MetadataResolver::resolve_token_display`] reads the token's
//!    name and symbol through that interface
//! 4. Transient failures are retried with bounded exponential backoff;
//!    a definitive `NotFound` is returned immediately
//!
//! Lookups are read-only and therefore idempotent, so retrying them is
//! always safe.
//!
//! # Example: Implementing a resolver
//!
//! ```rust,ignore
//! use alloy_json_abi::JsonAbi;
//! use alloy_primitives::Address;
//! use async_trait::async_trait;
//! use semioswap::{MetadataError, MetadataResolver};
//!
//! struct FixtureResolver;
//!
//! #[async_trait]
//! impl MetadataResolver for FixtureResolver {
//!     async fn resolve_interface(&self, address: Address) -> Result<JsonAbi, MetadataError> {
//!         Ok(JsonAbi::new())
//!     }
//!
//!     async fn resolve_token_display(
//!         &self,
//!         address: Address,
//!         _interface: &JsonAbi,
//!     ) -> Result<(String, String), MetadataError> {
//!         Ok(("Wrapped Ether".to_string(), "WETH".to_string()))
//!     }
//! }
//! ```

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use async_trait::async_trait;
use tracing::warn;

use crate::config::RetryPolicy;
use crate::errors::MetadataError;

mod cache;
mod etherscan;

pub use cache::MetadataCache;
pub use etherscan::EtherscanResolver;

pub use crate::records::TokenMetadata;

/// Resolves contract interfaces and token display metadata.
///
/// Both operations are read-only lookups against an external directory
/// service and the chain itself. Implementations own all transport and
/// credential concerns; the engine core never sees them.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Resolve a contract address to its interface description.
    ///
    /// Returns [`MetadataError::NotFound`] when the directory service
    /// has no entry for the address, and [`MetadataError::Call`] for
    /// transient failures.
    async fn resolve_interface(&self, address: Address) -> Result<JsonAbi, MetadataError>;

    /// Resolve a token contract to its display (name, symbol) pair
    /// using a previously resolved interface description.
    async fn resolve_token_display(
        &self,
        address: Address,
        interface: &JsonAbi,
    ) -> Result<(String, String), MetadataError>;
}

/// Run a resolver operation, retrying transient failures with bounded
/// exponential backoff.
///
/// `NotFound` is definitive and returned immediately; only
/// [`MetadataError::Call`] failures are retried, up to
/// `policy.max_retries` times.
pub(crate) async fn with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, MetadataError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, MetadataError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) if attempt >= policy.max_retries => return Err(e),
            Err(e) => {
                let delay = policy.delay_for(attempt);
                warn!(
                    error = %e,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Transient metadata failure, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
