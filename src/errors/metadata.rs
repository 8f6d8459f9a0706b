// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the token metadata resolver boundary.

use alloy_primitives::Address;

/// Errors that can occur while resolving a contract interface or a
/// token's display name and symbol.
///
/// `NotFound` is a definitive answer from the directory service and is
/// never retried. `Call` covers transient transport and call failures
/// and is retried with bounded backoff before the owning pair is
/// converted to a failure.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::Address;
/// use semioswap::MetadataError;
///
/// let error = MetadataError::not_found(Address::ZERO);
/// assert!(!error.is_transient());
///
/// let error = MetadataError::call(Address::ZERO, "connection reset");
/// assert!(error.is_transient());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The directory service has no interface description for the
    /// address (unknown or unverified contract).
    #[error("no interface description found for contract {address}")]
    NotFound {
        /// The contract address that could not be resolved
        address: Address,
    },

    /// An interface or token display lookup failed for a transient
    /// reason (network failure, rate limiting, malformed response).
    #[error("metadata call failed for contract {address}: {details}")]
    Call {
        /// The contract address whose lookup failed
        address: Address,
        /// Details about the failure
        details: String,
    },
}

impl MetadataError {
    /// Create a `NotFound` error for a specific address.
    pub fn not_found(address: Address) -> Self {
        MetadataError::NotFound { address }
    }

    /// Create a `Call` error with details.
    pub fn call(address: Address, details: impl Into<String>) -> Self {
        MetadataError::Call {
            address,
            details: details.into(),
        }
    }

    /// Whether this failure is transient and worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, MetadataError::Call { .. })
    }
}
