// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the semioswap library.
//!
//! This module provides strongly-typed errors for all public APIs in semioswap.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`DecodeError`,
//!   `MetadataError`, etc.)
//! - **Unified error type** (`SemioswapError`) for convenience when you don't
//!   need to distinguish between error sources
//!
//! # Architecture
//!
//! Each major concern has its own error type:
//! - [`DecodeError`] - Calldata, route, and event payload decoding failures
//! - [`CorrelationError`] - A log reached decoding without a tracked event match
//! - [`MetadataError`] - Interface/token display resolution failures
//! - [`DatasetError`] - Input/output dataset access failures (the only fatal class)
//!
//! # Retry semantics
//!
//! [`DecodeError`] and [`CorrelationError`] are deterministic given the same
//! bytes and are never retried. Transient [`MetadataError::Call`] failures are
//! retried with bounded backoff at the resolver boundary; exhausting retries
//! converts the owning pair to a failure. A [`DatasetError`] on an input
//! dataset aborts the run.
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use semioswap::{decode_call_payload, DecodeError};
//!
//! match decode_call_payload(&calldata) {
//!     Ok(commands) => println!("{} commands", commands.len()),
//!     Err(DecodeError::UnknownSelector { selector }) => {
//!         eprintln!("not a router call: 0x{selector}");
//!     }
//!     Err(e) => eprintln!("decode failed: {e}"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use semioswap::SemioswapError;
//!
//! fn process(calldata: &[u8]) -> Result<(), SemioswapError> {
//!     let commands = semioswap::decode_call_payload(calldata)?;
//!     // DecodeError converts to SemioswapError via From
//!     Ok(())
//! }
//! ```

mod correlation;
mod datasets;
mod decode;
mod metadata;

pub use correlation::CorrelationError;
pub use datasets::DatasetError;
pub use decode::DecodeError;
pub use metadata::MetadataError;

/// Unified error type for all semioswap operations.
///
/// This enum wraps all module-specific error types, providing a convenient way
/// to handle errors when you don't need to distinguish between error sources.
///
/// All module-specific error types automatically convert to `SemioswapError`
/// via `From` implementations, so you can use `?` to propagate errors
/// naturally.
#[derive(Debug, thiserror::Error)]
pub enum SemioswapError {
    /// Error from calldata, route, or event decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A log reached decoding without matching a tracked event.
    #[error("correlation error: {0}")]
    Correlation(#[from] CorrelationError),

    /// Error from the token metadata resolver.
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Error from dataset access.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

impl SemioswapError {
    /// Short machine-readable label used in run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            SemioswapError::Decode(_) => "decode",
            SemioswapError::Correlation(_) => "correlation",
            SemioswapError::Metadata(MetadataError::NotFound { .. }) => "metadata-not-found",
            SemioswapError::Metadata(MetadataError::Call { .. }) => "metadata-call",
            SemioswapError::Dataset(_) => "dataset",
        }
    }
}
