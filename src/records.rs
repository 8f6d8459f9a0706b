// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Record types flowing through the extraction pipeline.
//!
//! [`TransactionRecord`] and [`LogRecord`] mirror the two raw input
//! datasets. [`CorrelatedPair`] is the unit of work produced by the
//! filter/join stage. [`SwapRecord`] is the enriched output row.
//!
//! All records are immutable once read; nothing in this crate persists
//! them - writing the output dataset belongs to the sink collaborator.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, I256, U256};
use serde::{Deserialize, Serialize};

/// A raw blockchain transaction as read from the transactions dataset.
///
/// Field names follow the upstream export schema. `from_address` is
/// renamed to `sender_address` only in the output record, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash (unique identity)
    pub hash: B256,
    /// Sender address
    pub from_address: Address,
    /// Recipient address; `None` for contract creations
    pub to_address: Option<Address>,
    /// Native value carried by the transaction, in wei
    pub value: U256,
    /// Gas limit
    pub gas: u64,
    /// Legacy gas price, if present
    #[serde(default)]
    pub gas_price: Option<u128>,
    /// Raw call payload
    pub input: Bytes,
    /// Block timestamp as exported by the ingestion collaborator
    pub block_timestamp: String,
    /// EIP-1559 max fee per gas, if present
    #[serde(default)]
    pub max_fee_per_gas: Option<u128>,
    /// EIP-1559 max priority fee per gas, if present
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<u128>,
    /// Transaction envelope type
    #[serde(default)]
    pub transaction_type: Option<u8>,
}

/// A raw event log as read from the logs dataset.
///
/// Invariant: a log belongs to exactly one transaction (by hash) and
/// exactly one position within that transaction's emitted logs (by log
/// index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Position of this log within its transaction's emitted logs
    pub log_index: u64,
    /// Hash of the owning transaction
    pub transaction_hash: B256,
    /// Position of the owning transaction within its block
    pub transaction_index: u64,
    /// Hash of the containing block
    pub block_hash: B256,
    /// Number of the containing block
    pub block_number: u64,
    /// Address of the emitting contract
    pub address: Address,
    /// Raw event data payload
    pub data: Bytes,
    /// Ordered topic hashes; the first topic identifies the event schema
    pub topics: Vec<B256>,
}

impl LogRecord {
    /// The log's first topic, if any.
    pub fn topic0(&self) -> Option<B256> {
        self.topics.first().copied()
    }
}

/// One (transaction, log) combination produced by the upstream join.
///
/// This is the unit of work for the extraction engine. The transaction
/// is shared because a single transaction commonly correlates with
/// several logs.
#[derive(Debug, Clone)]
pub struct CorrelatedPair {
    /// The transaction addressed to the router
    pub transaction: Arc<TransactionRecord>,
    /// One swap log emitted by that transaction
    pub log: LogRecord,
}

impl CorrelatedPair {
    /// The pair's uniqueness key: (transaction hash, log index).
    pub fn key(&self) -> (B256, u64) {
        (self.transaction.hash, self.log.log_index)
    }
}

/// Resolved display metadata for a token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// The token contract address
    pub address: Address,
    /// The token's display name
    pub name: String,
    /// The token's display symbol
    pub symbol: String,
}

/// The enriched output row: one per successfully processed pair.
///
/// A union of selected transaction fields, selected log fields, the
/// chosen command's kind-specific fields, the matched event's fields,
/// and the display metadata of the two route endpoints. Direction- and
/// protocol-specific fields are optional and omitted from serialized
/// output when absent. Uniqueness key: (`transaction_hash`, `log_index`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    // Transaction fields
    pub transaction_hash: B256,
    pub sender_address: Address,
    pub to_address: Address,
    pub value: U256,
    pub gas: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    pub block_timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<u8>,

    // Log fields
    pub log_index: u64,
    pub transaction_index: u64,
    pub block_hash: B256,
    pub block_number: u64,
    /// Address of the pool contract that emitted the swap event
    pub event_src_addr: Address,

    // Command fields
    /// Stable identifier of the matched command, e.g. `V2_SWAP_EXACT_IN`
    pub command_identifier: String,
    pub token_address_in: Address,
    pub token_address_out: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_amount_in: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_amount_out_min: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_amount_in_max: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_amount_out: Option<U256>,

    // Token display metadata
    pub token_in_name: String,
    pub token_in_symbol: String,
    pub token_out_name: String,
    pub token_out_symbol: String,

    // V2 swap event fields
    #[serde(
        rename = "v2_amount0In",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub v2_amount0_in: Option<U256>,
    #[serde(
        rename = "v2_amount1In",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub v2_amount1_in: Option<U256>,
    #[serde(
        rename = "v2_amount0Out",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub v2_amount0_out: Option<U256>,
    #[serde(
        rename = "v2_amount1Out",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub v2_amount1_out: Option<U256>,

    // V3 swap event fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v3_amount0: Option<I256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v3_amount1: Option<I256>,
    #[serde(
        rename = "v3_sqrtPriceX96",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub v3_sqrt_price_x96: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v3_liquidity: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v3_tick: Option<i32>,
}

impl SwapRecord {
    /// The record's uniqueness key: (transaction hash, log index).
    pub fn key(&self) -> (B256, u64) {
        (self.transaction_hash, self.log_index)
    }
}
