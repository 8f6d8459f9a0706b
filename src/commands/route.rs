// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Packed V3 token route decoding.
//!
//! V3 swap commands carry their route as a packed byte string:
//! a 20-byte token address, then one `3-byte fee ‖ 20-byte token` hop
//! per pool traversed. Exact-input routes are encoded in trade order;
//! exact-output routes are encoded output-first, so the endpoint
//! assignment flips with the trade direction.

use alloy_primitives::Address;

use crate::errors::DecodeError;

/// Number of bytes holding a token address in the packed encoding.
const ADDRESS_BYTES: usize = 20;
/// Number of bytes holding a pool fee tier in the packed encoding.
const FEE_BYTES: usize = 3;
/// Size of one `fee ‖ token` hop.
const HOP_BYTES: usize = ADDRESS_BYTES + FEE_BYTES;

/// Whether a swap fixes its input amount or its output amount.
///
/// The direction decides which end of a packed route is the input
/// token; see [`route_endpoints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    /// The input amount is exact; the route is encoded in trade order.
    ExactIn,
    /// The output amount is exact; the route is encoded output-first.
    ExactOut,
}

/// Decode a packed route into its token sequence, in encoded order.
///
/// Fee tiers between tokens are validated for presence but not
/// interpreted; only the token hops matter for swap extraction.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidRoute`] when the encoding is shorter
/// than one full hop, ends mid-hop, or leaves trailing bytes.
pub fn decode_route(route: &[u8]) -> Result<Vec<Address>, DecodeError> {
    if route.len() < ADDRESS_BYTES + HOP_BYTES {
        return Err(DecodeError::invalid_route(format!(
            "encoding of {} bytes is shorter than a single hop",
            route.len()
        )));
    }

    let mut tokens = vec![Address::from_slice(&route[..ADDRESS_BYTES])];

    let mut cursor = ADDRESS_BYTES;
    while cursor + HOP_BYTES <= route.len() {
        let token_start = cursor + FEE_BYTES;
        tokens.push(Address::from_slice(&route[token_start..token_start + ADDRESS_BYTES]));
        cursor += HOP_BYTES;
    }

    if cursor != route.len() {
        return Err(DecodeError::invalid_route(format!(
            "{} trailing bytes after the last hop",
            route.len() - cursor
        )));
    }

    Ok(tokens)
}

/// Assign the (token in, token out) endpoints of a decoded route.
///
/// For an exact-input trade the encoded order is the trade order, so
/// the input token comes first. For an exact-output trade the encoding
/// is reversed and the input token is the last element.
///
/// Callers must pass a route produced by [`decode_route`], which
/// guarantees at least two tokens.
pub fn route_endpoints(tokens: &[Address], direction: TradeDirection) -> (Address, Address) {
    let first = tokens.first().copied().unwrap_or_default();
    let last = tokens.last().copied().unwrap_or_default();
    match direction {
        TradeDirection::ExactIn => (first, last),
        TradeDirection::ExactOut => (last, first),
    }
}
