// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Row filtering and transaction/log correlation.
//!
//! Implements the filter/join contract consumed by the extraction
//! engine: keep transactions addressed to the configured router, keep
//! logs whose first topic is in the tracked event set, and join the two
//! by transaction hash. Addresses and hashes are compared as typed
//! values, so the casing of the source datasets is irrelevant.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::B256;
use tracing::info;

use crate::config::RouterConfig;
use crate::records::{CorrelatedPair, LogRecord, TransactionRecord};

/// Filter both datasets and join them into correlated pairs.
///
/// A transaction correlates with every one of its tracked logs, so one
/// transaction can yield several pairs. Logs without a matching router
/// transaction, and transactions without any tracked log, yield none.
/// Pair order follows the input log order, but downstream processing
/// treats the output as an unordered set keyed by
/// (transaction hash, log index).
pub fn correlate_pairs(
    config: &RouterConfig,
    transactions: Vec<TransactionRecord>,
    logs: Vec<LogRecord>,
) -> Vec<CorrelatedPair> {
    let total_transactions = transactions.len();
    let total_logs = logs.len();

    let router_transactions: HashMap<B256, Arc<TransactionRecord>> = transactions
        .into_iter()
        .filter(|transaction| transaction.to_address == Some(config.router))
        .map(|transaction| (transaction.hash, Arc::new(transaction)))
        .collect();

    let pairs: Vec<CorrelatedPair> = logs
        .into_iter()
        .filter(|log| log.topic0().is_some_and(|topic| config.is_tracked_topic(topic)))
        .filter_map(|log| {
            router_transactions
                .get(&log.transaction_hash)
                .map(|transaction| CorrelatedPair {
                    transaction: Arc::clone(transaction),
                    log,
                })
        })
        .collect();

    info!(
        total_transactions,
        total_logs,
        router_transactions = router_transactions.len(),
        correlated_pairs = pairs.len(),
        "Correlated input datasets"
    );

    pairs
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, Bytes, U256};

    use super::*;

    fn transaction(hash: u8, to: Option<Address>) -> TransactionRecord {
        TransactionRecord {
            hash: B256::repeat_byte(hash),
            from_address: Address::repeat_byte(0x01),
            to_address: to,
            value: U256::ZERO,
            gas: 21_000,
            gas_price: None,
            input: Bytes::new(),
            block_timestamp: "2024-03-01 12:00:00 UTC".to_string(),
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            transaction_type: None,
        }
    }

    fn log(tx_hash: u8, log_index: u64, topic: B256) -> LogRecord {
        LogRecord {
            log_index,
            transaction_hash: B256::repeat_byte(tx_hash),
            transaction_index: 0,
            block_hash: B256::repeat_byte(0xcc),
            block_number: 19_000_000,
            address: Address::repeat_byte(0xdd),
            data: Bytes::new(),
            topics: vec![topic],
        }
    }

    #[test]
    fn test_joins_router_transactions_with_tracked_logs() {
        let config = RouterConfig::default();
        let transactions = vec![
            transaction(0x11, Some(config.router)),
            transaction(0x22, Some(Address::repeat_byte(0x99))),
        ];
        let logs = vec![
            log(0x11, 0, config.v2_swap_topic),
            log(0x11, 1, config.v3_swap_topic),
            log(0x22, 0, config.v2_swap_topic),
        ];

        let pairs = correlate_pairs(&config, transactions, logs);

        let keys: Vec<_> = pairs.iter().map(|pair| pair.key()).collect();
        assert_eq!(
            keys,
            vec![(B256::repeat_byte(0x11), 0), (B256::repeat_byte(0x11), 1)]
        );
    }

    #[test]
    fn test_drops_untracked_topics_and_topicless_logs() {
        let config = RouterConfig::default();
        let transactions = vec![transaction(0x11, Some(config.router))];
        let mut empty_log = log(0x11, 2, B256::ZERO);
        empty_log.topics.clear();
        let logs = vec![
            log(0x11, 0, B256::repeat_byte(0xee)),
            empty_log,
            log(0x11, 1, config.v2_swap_topic),
        ];

        let pairs = correlate_pairs(&config, transactions, logs);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].log.log_index, 1);
    }

    #[test]
    fn test_drops_contract_creations() {
        let config = RouterConfig::default();
        let transactions = vec![transaction(0x11, None)];
        let logs = vec![log(0x11, 0, config.v2_swap_topic)];

        assert!(correlate_pairs(&config, transactions, logs).is_empty());
    }

    #[test]
    fn test_one_transaction_yields_one_pair_per_log() {
        let config = RouterConfig::default();
        let transactions = vec![transaction(0x11, Some(config.router))];
        let logs = vec![
            log(0x11, 0, config.v2_swap_topic),
            log(0x11, 5, config.v2_swap_topic),
            log(0x11, 9, config.v3_swap_topic),
        ];

        let pairs = correlate_pairs(&config, transactions, logs);
        assert_eq!(pairs.len(), 3);
        assert!(pairs
            .iter()
            .all(|pair| pair.transaction.hash == B256::repeat_byte(0x11)));
    }
}
