// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error type for transaction/log correlation contract violations.

use alloy_primitives::B256;

/// A log reached event decoding without matching a tracked swap event.
///
/// The upstream filter contract guarantees that only logs whose first
/// topic is in the tracked-event set are correlated with transactions.
/// If a log with any other topic (or no topics at all) still reaches the
/// record builder, the pair fails fast rather than emitting a partial
/// record.
#[derive(Debug, thiserror::Error)]
pub enum CorrelationError {
    /// The log's first topic is not in the tracked swap event table.
    #[error("log topic {topic} does not match any tracked swap event")]
    UntrackedTopic {
        /// The first topic of the offending log
        topic: B256,
    },

    /// The log carries no topics, so no event signature can be matched.
    #[error("log has no topics to match against the tracked swap events")]
    MissingTopics,
}
