// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decode Uniswap Universal Router transactions and correlate them with
//! the swap events they emitted, producing enriched records for
//! analytics.
//!
//! The pipeline per correlated (transaction, log) pair: decode the
//! router calldata into typed commands, select the first tracked swap,
//! resolve the route endpoints and their token display metadata, match
//! and decode the swap event, and merge everything into one
//! [`SwapRecord`]. See [`extractor::SwapExtractor`] for the
//! orchestration and [`config::RouterConfig`] for the ambient values.

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod correlate;
pub mod datasets;
pub mod errors;
pub mod events;
pub mod extractor;
pub mod metadata;
pub mod records;

pub use commands::{
    decode_call_payload, decode_route, first_tracked, route_endpoints, CommandKind,
    DecodedCommand, TradeDirection,
};
pub use config::{RetryPolicy, RouterConfig, RouterConfigBuilder, UNIVERSAL_ROUTER};
pub use correlate::correlate_pairs;
pub use errors::{CorrelationError, DatasetError, DecodeError, MetadataError, SemioswapError};
pub use events::{decode_swap_event, DecodedSwapEvent, SwapEventKind};
pub use extractor::{
    CancelToken, FailedPair, PairOutcome, RunReport, SkipReason, SkippedPair, SwapExtractor,
};
pub use metadata::{EtherscanResolver, MetadataCache, MetadataResolver, TokenMetadata};
pub use records::{CorrelatedPair, LogRecord, SwapRecord, TransactionRecord};
