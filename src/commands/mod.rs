// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Universal Router calldata decoding.
//!
//! A router call packs an ordered command sequence into
//! `execute(bytes commands, bytes[] inputs)` calldata: one command byte
//! per sub-instruction, with a matching ABI-encoded input blob. This
//! module decodes that calldata into a typed [`DecodedCommand`] sequence
//! and selects the first command whose kind is in a configured
//! allow-list.
//!
//! Command kinds are compared as an exact enumeration
//! ([`CommandKind`]), never by name substring, and untracked command
//! bytes are preserved as [`DecodedCommand::Other`] so a caller can see
//! the full sequence.
//!
//! # Example
//!
//! ```rust,ignore
//! use semioswap::{decode_call_payload, first_tracked, RouterConfig};
//!
//! let config = RouterConfig::default();
//! let commands = decode_call_payload(&transaction.input)?;
//! match first_tracked(&commands, &config.tracked_commands) {
//!     Some(command) => println!("tracked swap: {}", command.kind()),
//!     None => println!("not a tracked swap"),
//! }
//! ```

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolValue};

use crate::errors::DecodeError;

pub mod route;

pub use route::{decode_route, route_endpoints, TradeDirection};

sol! {
    /// Universal Router entry point without a deadline.
    contract UniversalRouter {
        function execute(bytes commands, bytes[] inputs) external payable;
    }

    /// Universal Router entry point carrying an execution deadline.
    contract UniversalRouterDeadline {
        function execute(bytes commands, bytes[] inputs, uint256 deadline) external payable;
    }

    /// Parameter layout of the `V2_SWAP_EXACT_IN` command input.
    #[derive(Debug)]
    struct V2SwapExactInParams {
        address recipient;
        uint256 amountIn;
        uint256 amountOutMin;
        address[] path;
        bool payerIsUser;
    }

    /// Parameter layout of the `V2_SWAP_EXACT_OUT` command input.
    #[derive(Debug)]
    struct V2SwapExactOutParams {
        address recipient;
        uint256 amountOut;
        uint256 amountInMax;
        address[] path;
        bool payerIsUser;
    }

    /// Parameter layout of the `V3_SWAP_EXACT_IN` command input.
    #[derive(Debug)]
    struct V3SwapExactInParams {
        address recipient;
        uint256 amountIn;
        uint256 amountOutMin;
        bytes path;
        bool payerIsUser;
    }

    /// Parameter layout of the `V3_SWAP_EXACT_OUT` command input.
    #[derive(Debug)]
    struct V3SwapExactOutParams {
        address recipient;
        uint256 amountOut;
        uint256 amountInMax;
        bytes path;
        bool payerIsUser;
    }
}

/// Command byte for a V3 exact-input swap.
const CMD_V3_SWAP_EXACT_IN: u8 = 0x00;
/// Command byte for a V3 exact-output swap.
const CMD_V3_SWAP_EXACT_OUT: u8 = 0x01;
/// Command byte for a V2 exact-input swap.
const CMD_V2_SWAP_EXACT_IN: u8 = 0x08;
/// Command byte for a V2 exact-output swap.
const CMD_V2_SWAP_EXACT_OUT: u8 = 0x09;

/// The upper two bits of a command byte are router flag bits, not part
/// of the command identity.
const COMMAND_MASK: u8 = 0x3f;

/// The operation kind of one sub-instruction in a router call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Swap an exact input amount along a V2 pair route
    V2SwapExactIn,
    /// Swap for an exact output amount along a V2 pair route
    V2SwapExactOut,
    /// Swap an exact input amount along a V3 concentrated-liquidity route
    V3SwapExactIn,
    /// Swap for an exact output amount along a V3 concentrated-liquidity route
    V3SwapExactOut,
    /// Any other command byte (permits, sweeps, wraps, ...)
    Other(u8),
}

impl CommandKind {
    /// Map a raw command byte to its kind, masking the flag bits.
    pub const fn from_command_byte(byte: u8) -> Self {
        match byte & COMMAND_MASK {
            CMD_V3_SWAP_EXACT_IN => CommandKind::V3SwapExactIn,
            CMD_V3_SWAP_EXACT_OUT => CommandKind::V3SwapExactOut,
            CMD_V2_SWAP_EXACT_IN => CommandKind::V2SwapExactIn,
            CMD_V2_SWAP_EXACT_OUT => CommandKind::V2SwapExactOut,
            other => CommandKind::Other(other),
        }
    }

    /// Stable identifier used in output records, e.g. `V2_SWAP_EXACT_IN`.
    pub const fn identifier(&self) -> &'static str {
        match self {
            CommandKind::V2SwapExactIn => "V2_SWAP_EXACT_IN",
            CommandKind::V2SwapExactOut => "V2_SWAP_EXACT_OUT",
            CommandKind::V3SwapExactIn => "V3_SWAP_EXACT_IN",
            CommandKind::V3SwapExactOut => "V3_SWAP_EXACT_OUT",
            CommandKind::Other(_) => "UNTRACKED",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandKind::Other(byte) => write!(f, "UNTRACKED(0x{byte:02x})"),
            kind => f.write_str(kind.identifier()),
        }
    }
}

/// One decoded sub-instruction from a router call, with the parameters
/// specific to its kind.
///
/// Untracked command bytes keep their position in the sequence as
/// [`Other`](DecodedCommand::Other) but their input blobs are not
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedCommand {
    /// Swap an exact input amount along a V2 pair route
    V2SwapExactIn {
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: Vec<Address>,
        payer_is_user: bool,
    },
    /// Swap for an exact output amount along a V2 pair route
    V2SwapExactOut {
        recipient: Address,
        amount_out: U256,
        amount_in_max: U256,
        path: Vec<Address>,
        payer_is_user: bool,
    },
    /// Swap an exact input amount along a packed V3 route
    V3SwapExactIn {
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        route: Bytes,
        payer_is_user: bool,
    },
    /// Swap for an exact output amount along a packed V3 route
    V3SwapExactOut {
        recipient: Address,
        amount_out: U256,
        amount_in_max: U256,
        route: Bytes,
        payer_is_user: bool,
    },
    /// An untracked command byte (already masked)
    Other(u8),
}

impl DecodedCommand {
    /// The command's operation kind.
    pub const fn kind(&self) -> CommandKind {
        match self {
            DecodedCommand::V2SwapExactIn { .. } => CommandKind::V2SwapExactIn,
            DecodedCommand::V2SwapExactOut { .. } => CommandKind::V2SwapExactOut,
            DecodedCommand::V3SwapExactIn { .. } => CommandKind::V3SwapExactIn,
            DecodedCommand::V3SwapExactOut { .. } => CommandKind::V3SwapExactOut,
            DecodedCommand::Other(byte) => CommandKind::Other(*byte),
        }
    }

    /// The swap's route endpoints as (token in, token out).
    ///
    /// V2 commands carry the route as explicit addresses in trade order.
    /// V3 commands carry a packed encoding whose endpoint order depends
    /// on the trade direction; see [`route_endpoints`].
    pub fn route_endpoints(&self) -> Result<(Address, Address), DecodeError> {
        match self {
            DecodedCommand::V2SwapExactIn { path, .. }
            | DecodedCommand::V2SwapExactOut { path, .. } => {
                match (path.first(), path.last()) {
                    (Some(first), Some(last)) if path.len() >= 2 => Ok((*first, *last)),
                    _ => Err(DecodeError::invalid_route(
                        "v2 route holds fewer than two tokens",
                    )),
                }
            }
            DecodedCommand::V3SwapExactIn { route, .. } => {
                let tokens = decode_route(route)?;
                Ok(route_endpoints(&tokens, TradeDirection::ExactIn))
            }
            DecodedCommand::V3SwapExactOut { route, .. } => {
                let tokens = decode_route(route)?;
                Ok(route_endpoints(&tokens, TradeDirection::ExactOut))
            }
            DecodedCommand::Other(byte) => Err(DecodeError::invalid_command_input(
                *byte,
                "untracked commands carry no token route",
            )),
        }
    }
}

/// Decode a router call payload into its ordered command sequence.
///
/// The payload's leading selector must match one of the two `execute`
/// entry points. Each allow-listed command byte's input blob is decoded
/// into its parameter struct; untracked bytes become
/// [`DecodedCommand::Other`] without touching their inputs.
///
/// # Errors
///
/// Returns [`DecodeError`] if the selector is unrecognized, the calldata
/// does not match the entry point ABI, the command and input sequences
/// have different lengths, or a tracked command's input blob is
/// malformed.
pub fn decode_call_payload(input: &[u8]) -> Result<Vec<DecodedCommand>, DecodeError> {
    if input.len() < 4 {
        return Err(DecodeError::invalid_calldata(
            "payload is shorter than a function selector",
        ));
    }

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&input[..4]);

    let (commands, inputs) = if selector == UniversalRouter::executeCall::SELECTOR {
        let call = UniversalRouter::executeCall::abi_decode(input)
            .map_err(|e| DecodeError::invalid_calldata(e.to_string()))?;
        (call.commands, call.inputs)
    } else if selector == UniversalRouterDeadline::executeCall::SELECTOR {
        let call = UniversalRouterDeadline::executeCall::abi_decode(input)
            .map_err(|e| DecodeError::invalid_calldata(e.to_string()))?;
        (call.commands, call.inputs)
    } else {
        return Err(DecodeError::unknown_selector(selector));
    };

    if commands.len() != inputs.len() {
        return Err(DecodeError::invalid_calldata(format!(
            "{} command bytes but {} input blobs",
            commands.len(),
            inputs.len()
        )));
    }

    commands
        .iter()
        .zip(inputs.iter())
        .map(|(&byte, blob)| decode_command(byte, blob))
        .collect()
}

/// Decode one command byte and its input blob.
fn decode_command(byte: u8, blob: &Bytes) -> Result<DecodedCommand, DecodeError> {
    let command = byte & COMMAND_MASK;
    match command {
        CMD_V2_SWAP_EXACT_IN => {
            let params = V2SwapExactInParams::abi_decode(blob.as_ref())
                .map_err(|e| DecodeError::invalid_command_input(command, e.to_string()))?;
            Ok(DecodedCommand::V2SwapExactIn {
                recipient: params.recipient,
                amount_in: params.amountIn,
                amount_out_min: params.amountOutMin,
                path: params.path,
                payer_is_user: params.payerIsUser,
            })
        }
        CMD_V2_SWAP_EXACT_OUT => {
            let params = V2SwapExactOutParams::abi_decode(blob.as_ref())
                .map_err(|e| DecodeError::invalid_command_input(command, e.to_string()))?;
            Ok(DecodedCommand::V2SwapExactOut {
                recipient: params.recipient,
                amount_out: params.amountOut,
                amount_in_max: params.amountInMax,
                path: params.path,
                payer_is_user: params.payerIsUser,
            })
        }
        CMD_V3_SWAP_EXACT_IN => {
            let params = V3SwapExactInParams::abi_decode(blob.as_ref())
                .map_err(|e| DecodeError::invalid_command_input(command, e.to_string()))?;
            Ok(DecodedCommand::V3SwapExactIn {
                recipient: params.recipient,
                amount_in: params.amountIn,
                amount_out_min: params.amountOutMin,
                route: params.path,
                payer_is_user: params.payerIsUser,
            })
        }
        CMD_V3_SWAP_EXACT_OUT => {
            let params = V3SwapExactOutParams::abi_decode(blob.as_ref())
                .map_err(|e| DecodeError::invalid_command_input(command, e.to_string()))?;
            Ok(DecodedCommand::V3SwapExactOut {
                recipient: params.recipient,
                amount_out: params.amountOut,
                amount_in_max: params.amountInMax,
                route: params.path,
                payer_is_user: params.payerIsUser,
            })
        }
        other => Ok(DecodedCommand::Other(other)),
    }
}

/// Select the first command whose kind is in the allow-list.
///
/// Later tracked commands in the same call are intentionally ignored: a
/// transaction batching several tracked swaps contributes only its
/// first. Returns `None` when the call holds no tracked command, which
/// callers treat as "not a tracked swap", not as an error.
pub fn first_tracked<'a>(
    commands: &'a [DecodedCommand],
    tracked: &[CommandKind],
) -> Option<&'a DecodedCommand> {
    commands
        .iter()
        .find(|command| tracked.contains(&command.kind()))
}
