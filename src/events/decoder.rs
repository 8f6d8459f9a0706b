// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed decoding of matched swap event logs.

use alloy_primitives::{Address, Log, LogData, I256, U256};
use alloy_sol_types::SolEvent;

use crate::errors::DecodeError;
use crate::events::{v2, v3};
use crate::records::LogRecord;

/// Which tracked swap event schema a log matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapEventKind {
    /// A V2 pair `Swap` event
    V2Swap,
    /// A V3 pool `Swap` event
    V3Swap,
}

impl SwapEventKind {
    /// The event name used in error messages and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            SwapEventKind::V2Swap => "V2 Swap",
            SwapEventKind::V3Swap => "V3 Swap",
        }
    }
}

impl std::fmt::Display for SwapEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The named numeric fields of a decoded swap event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedSwapEvent {
    /// Reserve movements reported by a V2 pair
    V2 {
        sender: Address,
        to: Address,
        amount0_in: U256,
        amount1_in: U256,
        amount0_out: U256,
        amount1_out: U256,
    },
    /// Balance deltas and pool state reported by a V3 pool
    V3 {
        sender: Address,
        recipient: Address,
        amount0: I256,
        amount1: I256,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick: i32,
    },
}

impl DecodedSwapEvent {
    /// The event kind this payload decoded as.
    pub const fn kind(&self) -> SwapEventKind {
        match self {
            DecodedSwapEvent::V2 { .. } => SwapEventKind::V2Swap,
            DecodedSwapEvent::V3 { .. } => SwapEventKind::V3Swap,
        }
    }
}

/// Decode a log's payload according to its matched event kind.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidEventData`] when the log's topic count
/// or data length does not match the event's ABI layout. Decoding never
/// panics on malformed payloads.
pub fn decode_swap_event(
    kind: SwapEventKind,
    log: &LogRecord,
) -> Result<DecodedSwapEvent, DecodeError> {
    let data = LogData::new(log.topics.clone(), log.data.clone())
        .ok_or_else(|| DecodeError::invalid_event_data(kind.name(), "more than four topics"))?;
    let entry = Log {
        address: log.address,
        data,
    };

    match kind {
        SwapEventKind::V2Swap => {
            let event = v2::Swap::decode_log(&entry)
                .map_err(|e| DecodeError::invalid_event_data(kind.name(), e.to_string()))?;
            Ok(DecodedSwapEvent::V2 {
                sender: event.sender,
                to: event.to,
                amount0_in: event.amount0In,
                amount1_in: event.amount1In,
                amount0_out: event.amount0Out,
                amount1_out: event.amount1Out,
            })
        }
        SwapEventKind::V3Swap => {
            let event = v3::Swap::decode_log(&entry)
                .map_err(|e| DecodeError::invalid_event_data(kind.name(), e.to_string()))?;
            let tick = i32::try_from(event.tick)
                .map_err(|e| DecodeError::invalid_event_data(kind.name(), e.to_string()))?;
            Ok(DecodedSwapEvent::V3 {
                sender: event.sender,
                recipient: event.recipient,
                amount0: event.amount0,
                amount1: event.amount1,
                sqrt_price_x96: U256::from(event.sqrtPriceX96),
                liquidity: event.liquidity,
                tick,
            })
        }
    }
}
