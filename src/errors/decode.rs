// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for calldata, route, and event decoding.
//!
//! Decode failures are deterministic: the same bytes always produce the
//! same error. They are reported, never retried.

/// Errors that can occur while decoding router calldata, a packed token
/// route, or a swap event payload.
///
/// Every variant is attributable to a single (transaction, log) pair and
/// never affects the processing of other pairs.
///
/// # Examples
///
/// ```rust
/// use semioswap::DecodeError;
///
/// let error = DecodeError::unknown_selector([0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(
///     error.to_string(),
///     "unrecognized function selector 0xdeadbeef"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The calldata's leading 4-byte selector does not match either
    /// router entry point.
    #[error("unrecognized function selector 0x{selector}")]
    UnknownSelector {
        /// Hex-encoded selector bytes (without the 0x prefix)
        selector: String,
    },

    /// The calldata is truncated or its argument layout does not match
    /// the router entry point's ABI.
    #[error("malformed router calldata: {details}")]
    InvalidCalldata {
        /// Details about why the decode failed
        details: String,
    },

    /// A command's input blob does not match the parameter layout for
    /// that command byte.
    #[error("command 0x{command:02x} has malformed input: {details}")]
    InvalidCommandInput {
        /// The (masked) command byte whose input failed to decode
        command: u8,
        /// Details about why the decode failed
        details: String,
    },

    /// A packed token route encoding is truncated, carries trailing
    /// bytes, or holds fewer than two tokens.
    #[error("malformed token route encoding: {details}")]
    InvalidRoute {
        /// Details about why the decode failed
        details: String,
    },

    /// A log's data payload or topic list does not match the layout of
    /// the matched event kind.
    #[error("log does not match the {event} layout: {details}")]
    InvalidEventData {
        /// Name of the event kind whose layout was expected
        event: String,
        /// Details about why the decode failed
        details: String,
    },
}

impl DecodeError {
    /// Create an `UnknownSelector` error from the raw selector bytes.
    pub fn unknown_selector(selector: [u8; 4]) -> Self {
        DecodeError::UnknownSelector {
            selector: alloy_primitives::hex::encode(selector),
        }
    }

    /// Create an `InvalidCalldata` error with details.
    pub fn invalid_calldata(details: impl Into<String>) -> Self {
        DecodeError::InvalidCalldata {
            details: details.into(),
        }
    }

    /// Create an `InvalidCommandInput` error for a specific command byte.
    pub fn invalid_command_input(command: u8, details: impl Into<String>) -> Self {
        DecodeError::InvalidCommandInput {
            command,
            details: details.into(),
        }
    }

    /// Create an `InvalidRoute` error with details.
    pub fn invalid_route(details: impl Into<String>) -> Self {
        DecodeError::InvalidRoute {
            details: details.into(),
        }
    }

    /// Create an `InvalidEventData` error for a specific event kind.
    pub fn invalid_event_data(event: impl Into<String>, details: impl Into<String>) -> Self {
        DecodeError::InvalidEventData {
            event: event.into(),
            details: details.into(),
        }
    }
}
