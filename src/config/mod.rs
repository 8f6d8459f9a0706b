// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for swap extraction runs.
//!
//! All ambient values the engine depends on - the router address, the
//! tracked event signature table, the command allow-list, concurrency
//! and retry limits - live in an explicit, immutable [`RouterConfig`]
//! passed in at construction. Nothing is read from globals, so tests
//! and alternate networks can substitute their own values freely.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use semioswap::RouterConfig;
//!
//! // Ethereum mainnet Universal Router with the canonical event table
//! let config = RouterConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use alloy_primitives::address;
//! use semioswap::RouterConfig;
//!
//! let config = RouterConfig::builder()
//!     .router(address!("1111111111111111111111111111111111111111"))
//!     .max_concurrency(4)
//!     .build();
//! ```

use std::time::Duration;

use alloy_primitives::{address, Address, B256};
use alloy_sol_types::SolEvent;

use crate::commands::CommandKind;
use crate::events::{v2, v3, SwapEventKind};

/// The Ethereum mainnet Universal Router contract address.
pub const UNIVERSAL_ROUTER: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");

/// Default number of pairs processed concurrently.
const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Default maximum number of retry attempts for transient metadata failures.
const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff (100ms).
const DEFAULT_BASE_DELAY_MS: u64 = 100;
/// Default maximum delay between retries (30 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

/// Retry behavior for transient metadata resolver failures.
///
/// The backoff formula is:
///
/// ```text
/// delay = min(base_delay * 2^attempt, max_delay)
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not including the initial call).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// The backoff delay before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// A policy that never retries, useful in tests.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

/// Configuration for a swap extraction run.
///
/// Use [`RouterConfig::builder`] for a fluent API, or
/// [`RouterConfig::default`] for the Ethereum mainnet Universal Router
/// with the canonical event table and the four tracked swap commands.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// The router contract whose incoming transactions are decoded.
    pub router: Address,

    /// First topic identifying a V2 pair swap event.
    pub v2_swap_topic: B256,

    /// First topic identifying a V3 pool swap event.
    pub v3_swap_topic: B256,

    /// Allow-list of command kinds that count as tracked swaps.
    pub tracked_commands: Vec<CommandKind>,

    /// Maximum number of pairs processed concurrently.
    pub max_concurrency: usize,

    /// Retry behavior at the metadata resolver boundary.
    pub retry: RetryPolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RouterConfig {
    /// Create a builder pre-populated with mainnet defaults.
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::with_defaults()
    }

    /// Match a log's first topic against the tracked event table.
    ///
    /// Returns `None` for any topic outside the two-entry table; such
    /// logs should have been excluded by the upstream filter.
    pub fn match_swap_event(&self, topic: B256) -> Option<SwapEventKind> {
        if topic == self.v2_swap_topic {
            Some(SwapEventKind::V2Swap)
        } else if topic == self.v3_swap_topic {
            Some(SwapEventKind::V3Swap)
        } else {
            None
        }
    }

    /// Whether a topic belongs to the tracked event set.
    pub fn is_tracked_topic(&self, topic: B256) -> bool {
        self.match_swap_event(topic).is_some()
    }

    /// Whether a command kind is in the tracked allow-list.
    pub fn is_tracked_command(&self, kind: CommandKind) -> bool {
        self.tracked_commands.contains(&kind)
    }
}

/// Fluent builder for [`RouterConfig`].
#[derive(Debug, Clone)]
pub struct RouterConfigBuilder {
    router: Address,
    v2_swap_topic: B256,
    v3_swap_topic: B256,
    tracked_commands: Vec<CommandKind>,
    max_concurrency: usize,
    retry: RetryPolicy,
}

impl RouterConfigBuilder {
    /// Create a builder holding the mainnet defaults.
    pub fn with_defaults() -> Self {
        Self {
            router: UNIVERSAL_ROUTER,
            v2_swap_topic: v2::Swap::SIGNATURE_HASH,
            v3_swap_topic: v3::Swap::SIGNATURE_HASH,
            tracked_commands: vec![
                CommandKind::V2SwapExactIn,
                CommandKind::V2SwapExactOut,
                CommandKind::V3SwapExactIn,
                CommandKind::V3SwapExactOut,
            ],
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the router contract address.
    pub fn router(mut self, router: Address) -> Self {
        self.router = router;
        self
    }

    /// Set the V2 swap event topic.
    pub fn v2_swap_topic(mut self, topic: B256) -> Self {
        self.v2_swap_topic = topic;
        self
    }

    /// Set the V3 swap event topic.
    pub fn v3_swap_topic(mut self, topic: B256) -> Self {
        self.v3_swap_topic = topic;
        self
    }

    /// Replace the tracked command allow-list.
    pub fn tracked_commands(mut self, commands: Vec<CommandKind>) -> Self {
        self.tracked_commands = commands;
        self
    }

    /// Set the maximum number of concurrently processed pairs.
    ///
    /// Values below 1 are clamped to 1.
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Set the metadata retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the immutable configuration.
    pub fn build(self) -> RouterConfig {
        RouterConfig {
            router: self.router,
            v2_swap_topic: self.v2_swap_topic,
            v3_swap_topic: self.v3_swap_topic,
            tracked_commands: self.tracked_commands,
            max_concurrency: self.max_concurrency,
            retry: self.retry,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;

    use super::*;

    #[test]
    fn test_default_event_table_matches_canonical_hashes() {
        let config = RouterConfig::default();
        assert_eq!(
            config.v2_swap_topic,
            b256!("d78ad95fa46c994b6551d0da85fc275fe613ce37657fb8d5e3d130840159d822")
        );
        assert_eq!(
            config.v3_swap_topic,
            b256!("c42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67")
        );
    }

    #[test]
    fn test_default_router_is_mainnet_universal_router() {
        let config = RouterConfig::default();
        assert_eq!(config.router, UNIVERSAL_ROUTER);
    }

    #[test]
    fn test_match_swap_event_covers_the_table_and_nothing_else() {
        let config = RouterConfig::default();
        assert_eq!(
            config.match_swap_event(config.v2_swap_topic),
            Some(SwapEventKind::V2Swap)
        );
        assert_eq!(
            config.match_swap_event(config.v3_swap_topic),
            Some(SwapEventKind::V3Swap)
        );
        assert_eq!(config.match_swap_event(B256::repeat_byte(0x42)), None);
        assert_eq!(config.match_swap_event(B256::ZERO), None);
    }

    #[test]
    fn test_default_allow_list_tracks_the_four_swap_kinds() {
        let config = RouterConfig::default();
        assert!(config.is_tracked_command(CommandKind::V2SwapExactIn));
        assert!(config.is_tracked_command(CommandKind::V2SwapExactOut));
        assert!(config.is_tracked_command(CommandKind::V3SwapExactIn));
        assert!(config.is_tracked_command(CommandKind::V3SwapExactOut));
        assert!(!config.is_tracked_command(CommandKind::Other(0x0b)));
    }

    #[test]
    fn test_builder_overrides() {
        let router = Address::repeat_byte(0x11);
        let config = RouterConfig::builder()
            .router(router)
            .tracked_commands(vec![CommandKind::V2SwapExactIn])
            .max_concurrency(0)
            .retry(RetryPolicy::disabled())
            .build();

        assert_eq!(config.router, router);
        assert_eq!(config.tracked_commands, vec![CommandKind::V2SwapExactIn]);
        assert_eq!(config.max_concurrency, 1);
        assert_eq!(config.retry.max_retries, 0);
    }

    #[test]
    fn test_retry_backoff_is_exponential_and_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for(20), Duration::from_millis(30_000));
    }
}
