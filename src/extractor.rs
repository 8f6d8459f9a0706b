// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-pair swap record assembly and run orchestration.
//!
//! [`SwapExtractor`] drives the full pipeline for each correlated
//! (transaction, log) pair: decode the router calldata, select the
//! first tracked command, resolve the route endpoints and their token
//! metadata, match and decode the swap event, and assemble one
//! [`SwapRecord`].
//!
//! Pairs are independent: they share no mutable state and are processed
//! concurrently up to the configured limit. A failing pair never
//! affects any other pair; the run-level result is the set of emitted
//! records plus a summary of skipped and failed pairs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy_primitives::B256;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::commands::{decode_call_payload, first_tracked, DecodedCommand};
use crate::config::RouterConfig;
use crate::errors::{CorrelationError, DecodeError, SemioswapError};
use crate::events::{decode_swap_event, DecodedSwapEvent};
use crate::metadata::{MetadataCache, MetadataResolver, TokenMetadata};
use crate::records::{CorrelatedPair, LogRecord, SwapRecord, TransactionRecord};

/// Cooperative cancellation flag for a run.
///
/// Cancelling stops the admission of new pairs; pairs already in
/// flight finish (or fail) normally, so no partial records reach the
/// output.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Why a pair produced no record without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The call payload holds no allow-listed command.
    NoTrackedCommand,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoTrackedCommand => f.write_str("no tracked command in call payload"),
        }
    }
}

/// A pair that was skipped, with its key and reason.
#[derive(Debug)]
pub struct SkippedPair {
    pub transaction_hash: B256,
    pub log_index: u64,
    pub reason: SkipReason,
}

/// A pair that failed, with its key and the originating error.
#[derive(Debug)]
pub struct FailedPair {
    pub transaction_hash: B256,
    pub log_index: u64,
    pub error: SemioswapError,
}

/// Terminal outcome of one pair's pipeline.
#[derive(Debug)]
pub enum PairOutcome {
    /// All steps succeeded; exactly one record was produced.
    Emitted(Box<SwapRecord>),
    /// The pair is not a tracked swap (terminal, not an error).
    Skipped(SkippedPair),
    /// A decode or resolution step failed (terminal).
    Failed(FailedPair),
}

/// Result of a full extraction run.
///
/// Records form an unordered multiset keyed by
/// (transaction hash, log index); re-running over identical inputs with
/// a stable resolver yields an identical multiset.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Successfully emitted records.
    pub records: Vec<SwapRecord>,
    /// Pairs skipped as "not a tracked swap".
    pub skipped: Vec<SkippedPair>,
    /// Pairs that failed, with reasons.
    pub failed: Vec<FailedPair>,
    /// Pairs never admitted because the run was cancelled.
    pub cancelled: usize,
}

impl RunReport {
    /// Whether every admitted pair either emitted or was skipped.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Log a per-run summary for operator visibility.
    pub fn log_summary(&self) {
        info!(
            emitted = self.records.len(),
            skipped = self.skipped.len(),
            failed = self.failed.len(),
            cancelled = self.cancelled,
            "Swap extraction run finished"
        );
        for failure in &self.failed {
            warn!(
                transaction_hash = %failure.transaction_hash,
                log_index = failure.log_index,
                kind = failure.error.kind(),
                error = %failure.error,
                "Pair failed"
            );
        }
    }
}

/// Drives the per-pair pipeline and assembles output records.
///
/// The extractor is cheap to share: decoding is pure computation and
/// the only awaited calls are metadata resolutions, which go through a
/// per-run [`MetadataCache`].
pub struct SwapExtractor<R> {
    config: RouterConfig,
    resolver: Arc<R>,
    cache: MetadataCache,
}

impl<R: MetadataResolver> SwapExtractor<R> {
    /// Create an extractor from a configuration and a resolver.
    pub fn new(config: RouterConfig, resolver: Arc<R>) -> Self {
        Self {
            config,
            resolver,
            cache: MetadataCache::new(),
        }
    }

    /// The configuration this extractor runs with.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Process every pair with bounded concurrency.
    ///
    /// Pair outcomes are collected in completion order; the output is
    /// an unordered set. Cancellation stops admitting new pairs and
    /// lets in-flight pairs finish.
    pub async fn run(&self, pairs: Vec<CorrelatedPair>, cancel: &CancelToken) -> RunReport {
        let total = pairs.len();
        info!(
            pairs = total,
            max_concurrency = self.config.max_concurrency,
            router = %self.config.router,
            "Starting swap extraction run"
        );

        let outcomes: Vec<PairOutcome> = stream::iter(pairs)
            .take_while(|_| {
                let admit = !cancel.is_cancelled();
                async move { admit }
            })
            .map(|pair| self.process_pair(pair))
            .buffer_unordered(self.config.max_concurrency)
            .collect()
            .await;

        let mut report = RunReport {
            cancelled: total - outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                PairOutcome::Emitted(record) => report.records.push(*record),
                PairOutcome::Skipped(skipped) => report.skipped.push(skipped),
                PairOutcome::Failed(failed) => report.failed.push(failed),
            }
        }

        report.log_summary();
        report
    }

    /// Run one pair's pipeline to its terminal outcome.
    pub async fn process_pair(&self, pair: CorrelatedPair) -> PairOutcome {
        let (transaction_hash, log_index) = pair.key();
        match self.build_record(&pair).await {
            Ok(Some(record)) => {
                debug!(
                    %transaction_hash,
                    log_index,
                    command = %record.command_identifier,
                    "Emitted swap record"
                );
                PairOutcome::Emitted(Box::new(record))
            }
            Ok(None) => {
                debug!(%transaction_hash, log_index, "No tracked command, skipping pair");
                PairOutcome::Skipped(SkippedPair {
                    transaction_hash,
                    log_index,
                    reason: SkipReason::NoTrackedCommand,
                })
            }
            Err(error) => PairOutcome::Failed(FailedPair {
                transaction_hash,
                log_index,
                error,
            }),
        }
    }

    /// The pipeline proper. `Ok(None)` means "not a tracked swap".
    ///
    /// Step order matters: the tracked-command check comes before any
    /// resolver call, so skipped pairs never touch the network.
    async fn build_record(
        &self,
        pair: &CorrelatedPair,
    ) -> Result<Option<SwapRecord>, SemioswapError> {
        let transaction = pair.transaction.as_ref();
        let log = &pair.log;

        let commands = decode_call_payload(&transaction.input)?;
        let Some(command) = first_tracked(&commands, &self.config.tracked_commands) else {
            return Ok(None);
        };

        let (token_in, token_out) = command.route_endpoints()?;

        let token_in_metadata = self
            .cache
            .resolve_token(self.resolver.as_ref(), &self.config.retry, token_in)
            .await?;
        let token_out_metadata = self
            .cache
            .resolve_token(self.resolver.as_ref(), &self.config.retry, token_out)
            .await?;

        let topic = log.topic0().ok_or(CorrelationError::MissingTopics)?;
        let kind = self
            .config
            .match_swap_event(topic)
            .ok_or(CorrelationError::UntrackedTopic { topic })?;
        let event = decode_swap_event(kind, log)?;

        let record = assemble_record(
            transaction,
            log,
            command,
            token_in_metadata,
            token_out_metadata,
            event,
        )?;
        Ok(Some(record))
    }
}

/// Merge all pipeline outputs into one record.
fn assemble_record(
    transaction: &TransactionRecord,
    log: &LogRecord,
    command: &DecodedCommand,
    token_in: TokenMetadata,
    token_out: TokenMetadata,
    event: DecodedSwapEvent,
) -> Result<SwapRecord, SemioswapError> {
    let (swap_amount_in, swap_amount_out_min, swap_amount_in_max, swap_amount_out) = match command
    {
        DecodedCommand::V2SwapExactIn {
            amount_in,
            amount_out_min,
            ..
        }
        | DecodedCommand::V3SwapExactIn {
            amount_in,
            amount_out_min,
            ..
        } => (Some(*amount_in), Some(*amount_out_min), None, None),
        DecodedCommand::V2SwapExactOut {
            amount_out,
            amount_in_max,
            ..
        }
        | DecodedCommand::V3SwapExactOut {
            amount_out,
            amount_in_max,
            ..
        } => (None, None, Some(*amount_in_max), Some(*amount_out)),
        DecodedCommand::Other(byte) => {
            return Err(DecodeError::invalid_command_input(
                *byte,
                "untracked commands cannot form swap records",
            )
            .into())
        }
    };

    let mut record = SwapRecord {
        transaction_hash: transaction.hash,
        sender_address: transaction.from_address,
        to_address: transaction.to_address.unwrap_or_default(),
        value: transaction.value,
        gas: transaction.gas,
        gas_price: transaction.gas_price,
        block_timestamp: transaction.block_timestamp.clone(),
        max_fee_per_gas: transaction.max_fee_per_gas,
        max_priority_fee_per_gas: transaction.max_priority_fee_per_gas,
        transaction_type: transaction.transaction_type,
        log_index: log.log_index,
        transaction_index: log.transaction_index,
        block_hash: log.block_hash,
        block_number: log.block_number,
        event_src_addr: log.address,
        command_identifier: command.kind().identifier().to_string(),
        token_address_in: token_in.address,
        token_address_out: token_out.address,
        swap_amount_in,
        swap_amount_out_min,
        swap_amount_in_max,
        swap_amount_out,
        token_in_name: token_in.name,
        token_in_symbol: token_in.symbol,
        token_out_name: token_out.name,
        token_out_symbol: token_out.symbol,
        v2_amount0_in: None,
        v2_amount1_in: None,
        v2_amount0_out: None,
        v2_amount1_out: None,
        v3_amount0: None,
        v3_amount1: None,
        v3_sqrt_price_x96: None,
        v3_liquidity: None,
        v3_tick: None,
    };

    match event {
        DecodedSwapEvent::V2 {
            amount0_in,
            amount1_in,
            amount0_out,
            amount1_out,
            ..
        } => {
            record.v2_amount0_in = Some(amount0_in);
            record.v2_amount1_in = Some(amount1_in);
            record.v2_amount0_out = Some(amount0_out);
            record.v2_amount1_out = Some(amount1_out);
        }
        DecodedSwapEvent::V3 {
            amount0,
            amount1,
            sqrt_price_x96,
            liquidity,
            tick,
            ..
        } => {
            record.v3_amount0 = Some(amount0);
            record.v3_amount1 = Some(amount1);
            record.v3_sqrt_price_x96 = Some(sqrt_price_x96);
            record.v3_liquidity = Some(liquidity);
            record.v3_tick = Some(tick);
        }
    }

    Ok(record)
}
