// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Swap event definitions, matching, and decoding.
//!
//! A log's first topic identifies which (if any) tracked swap event
//! produced it. The topic table lives in
//! [`RouterConfig`](crate::config::RouterConfig) so alternate networks
//! or forks can be tracked without code changes; matching itself is
//! [`RouterConfig::match_swap_event`](crate::config::RouterConfig::match_swap_event).
//! Once matched, [`decode_swap_event`] turns the log payload into the
//! event's named fields.

mod decoder;
mod definitions;

pub use decoder::{decode_swap_event, DecodedSwapEvent, SwapEventKind};
pub use definitions::{v2, v3};
