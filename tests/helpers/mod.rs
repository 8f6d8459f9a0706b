// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for semioswap integration tests.
//!
//! Provides a deterministic mock resolver and builders for router
//! calldata, swap logs, and correlated pairs, so the full pipeline can
//! be exercised without any network dependency.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes, B256, I256, U256};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;

use semioswap::commands::{
    UniversalRouter, V2SwapExactInParams, V2SwapExactOutParams, V3SwapExactInParams,
    V3SwapExactOutParams,
};
use semioswap::{
    CorrelatedPair, LogRecord, MetadataError, MetadataResolver, TransactionRecord,
};

/// Mock MetadataResolver with configurable token tables and failure
/// injection.
///
/// Unknown addresses resolve to `NotFound`, matching the behavior of a
/// real directory service asked about an unverified contract.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = MockMetadataResolver::new()
///     .with_token(token_a, "Token A", "TKA")
///     .with_flaky(token_b, 2); // two transient failures, then success
/// ```
#[derive(Default)]
pub struct MockMetadataResolver {
    tokens: HashMap<Address, (String, String)>,
    flaky: Mutex<HashMap<Address, u32>>,
    interface_calls: AtomicU32,
    display_calls: AtomicU32,
}

impl MockMetadataResolver {
    /// Create a resolver that knows no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token's display metadata.
    pub fn with_token(mut self, address: Address, name: &str, symbol: &str) -> Self {
        self.tokens
            .insert(address, (name.to_string(), symbol.to_string()));
        self
    }

    /// Make the first `failures` interface lookups for `address` fail
    /// transiently before succeeding.
    pub fn with_flaky(self, address: Address, failures: u32) -> Self {
        self.flaky.lock().unwrap().insert(address, failures);
        self
    }

    /// Total calls made against the resolver, both operations combined.
    pub fn total_calls(&self) -> u32 {
        self.interface_calls.load(Ordering::SeqCst) + self.display_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataResolver for MockMetadataResolver {
    async fn resolve_interface(&self, address: Address) -> Result<JsonAbi, MetadataError> {
        self.interface_calls.fetch_add(1, Ordering::SeqCst);

        let mut flaky = self.flaky.lock().unwrap();
        if let Some(remaining) = flaky.get_mut(&address) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(MetadataError::call(address, "injected transient failure"));
            }
        }
        drop(flaky);

        if self.tokens.contains_key(&address) {
            Ok(JsonAbi::new())
        } else {
            Err(MetadataError::not_found(address))
        }
    }

    async fn resolve_token_display(
        &self,
        address: Address,
        _interface: &JsonAbi,
    ) -> Result<(String, String), MetadataError> {
        self.display_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .get(&address)
            .cloned()
            .ok_or_else(|| MetadataError::not_found(address))
    }
}

/// Encode an `execute(bytes,bytes[])` call from command bytes and blobs.
pub fn execute_calldata(commands: Vec<u8>, inputs: Vec<Bytes>) -> Vec<u8> {
    UniversalRouter::executeCall {
        commands: Bytes::from(commands),
        inputs,
    }
    .abi_encode()
}

/// Calldata holding a single `V2_SWAP_EXACT_IN` command.
pub fn v2_exact_in_calldata(path: Vec<Address>, amount_in: u64, amount_out_min: u64) -> Vec<u8> {
    let params = V2SwapExactInParams {
        recipient: Address::repeat_byte(0x0f),
        amountIn: U256::from(amount_in),
        amountOutMin: U256::from(amount_out_min),
        path,
        payerIsUser: true,
    };
    execute_calldata(vec![0x08], vec![Bytes::from(params.abi_encode())])
}

/// Calldata holding a single `V2_SWAP_EXACT_OUT` command.
pub fn v2_exact_out_calldata(path: Vec<Address>, amount_out: u64, amount_in_max: u64) -> Vec<u8> {
    let params = V2SwapExactOutParams {
        recipient: Address::repeat_byte(0x0f),
        amountOut: U256::from(amount_out),
        amountInMax: U256::from(amount_in_max),
        path,
        payerIsUser: true,
    };
    execute_calldata(vec![0x09], vec![Bytes::from(params.abi_encode())])
}

/// Calldata holding a single `V3_SWAP_EXACT_IN` command.
pub fn v3_exact_in_calldata(route: Vec<u8>, amount_in: u64, amount_out_min: u64) -> Vec<u8> {
    let params = V3SwapExactInParams {
        recipient: Address::repeat_byte(0x0f),
        amountIn: U256::from(amount_in),
        amountOutMin: U256::from(amount_out_min),
        path: Bytes::from(route),
        payerIsUser: true,
    };
    execute_calldata(vec![0x00], vec![Bytes::from(params.abi_encode())])
}

/// Calldata holding a single `V3_SWAP_EXACT_OUT` command.
pub fn v3_exact_out_calldata(route: Vec<u8>, amount_out: u64, amount_in_max: u64) -> Vec<u8> {
    let params = V3SwapExactOutParams {
        recipient: Address::repeat_byte(0x0f),
        amountOut: U256::from(amount_out),
        amountInMax: U256::from(amount_in_max),
        path: Bytes::from(route),
        payerIsUser: true,
    };
    execute_calldata(vec![0x01], vec![Bytes::from(params.abi_encode())])
}

/// Pack a token route with a uniform fee tier between hops.
pub fn pack_route(tokens: &[Address], fee: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(tokens[0].as_slice());
    for token in &tokens[1..] {
        out.extend_from_slice(&fee.to_be_bytes()[1..]);
        out.extend_from_slice(token.as_slice());
    }
    out
}

/// Hand-construct the data payload of a V2 `Swap` event.
pub fn v2_swap_data(
    amount0_in: u64,
    amount1_in: u64,
    amount0_out: u64,
    amount1_out: u64,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(128);
    for amount in [amount0_in, amount1_in, amount0_out, amount1_out] {
        data.extend_from_slice(&U256::from(amount).to_be_bytes::<32>());
    }
    data
}

/// Hand-construct the data payload of a V3 `Swap` event.
pub fn v3_swap_data(
    amount0: i64,
    amount1: i64,
    sqrt_price_x96: u128,
    liquidity: u128,
    tick: i32,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(160);
    data.extend_from_slice(&I256::try_from(amount0).unwrap().to_be_bytes::<32>());
    data.extend_from_slice(&I256::try_from(amount1).unwrap().to_be_bytes::<32>());
    data.extend_from_slice(&U256::from(sqrt_price_x96).to_be_bytes::<32>());
    data.extend_from_slice(&U256::from(liquidity).to_be_bytes::<32>());
    data.extend_from_slice(&I256::try_from(tick).unwrap().to_be_bytes::<32>());
    data
}

/// Build a transaction addressed to `router` with the given calldata.
pub fn make_transaction(router: Address, input: Vec<u8>) -> TransactionRecord {
    TransactionRecord {
        hash: B256::repeat_byte(0x11),
        from_address: Address::repeat_byte(0x21),
        to_address: Some(router),
        value: U256::ZERO,
        gas: 300_000,
        gas_price: Some(25_000_000_000),
        input: Bytes::from(input),
        block_timestamp: "2024-03-01 12:00:00 UTC".to_string(),
        max_fee_per_gas: Some(40_000_000_000),
        max_priority_fee_per_gas: Some(1_000_000_000),
        transaction_type: Some(2),
    }
}

/// Build a swap log owned by `transaction_hash`.
pub fn make_log(transaction_hash: B256, topics: Vec<B256>, data: Vec<u8>) -> LogRecord {
    LogRecord {
        log_index: 3,
        transaction_hash,
        transaction_index: 1,
        block_hash: B256::repeat_byte(0x44),
        block_number: 19_000_000,
        address: Address::repeat_byte(0x55),
        data: Bytes::from(data),
        topics,
    }
}

/// Pair a transaction with one of its logs.
pub fn make_pair(transaction: TransactionRecord, log: LogRecord) -> CorrelatedPair {
    CorrelatedPair {
        transaction: Arc::new(transaction),
        log,
    }
}

/// Topics of a V2 `Swap` event emitted to `to` by `sender`.
pub fn v2_swap_topics(topic0: B256, sender: Address, to: Address) -> Vec<B256> {
    vec![topic0, sender.into_word(), to.into_word()]
}

/// Topics of a V3 `Swap` event for `sender` and `recipient`.
pub fn v3_swap_topics(topic0: B256, sender: Address, recipient: Address) -> Vec<B256> {
    vec![topic0, sender.into_word(), recipient.into_word()]
}
