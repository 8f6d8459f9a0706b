// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical swap event definitions for blockchain event decoding.
//!
//! This module provides strongly-typed definitions of the two tracked
//! pool swap events. Both pool families name their event `Swap`, so each
//! lives in its own submodule.
//!
//! # Event Signatures
//!
//! - **V2**: `Swap(address,uint256,uint256,uint256,uint256,address)`
//! - **V3**: `Swap(address,address,int256,int256,uint160,uint128,int24)`
//!
//! The `sol!` macro generates a `SIGNATURE_HASH` constant for each
//! event; those hashes are the tracked-event table defaults in
//! [`RouterConfig`](crate::config::RouterConfig).

/// The V2 pair swap event.
pub mod v2 {
    use std::fmt::Debug;

    use alloy_sol_types::sol;

    sol! {
        /// Emitted by a V2 pair when reserves move through a swap.
        ///
        /// All four amounts are unsigned; the pair reports how much of
        /// each reserve entered (`In`) and left (`Out`) the pool.
        event Swap(
            address indexed sender,
            uint256 amount0In,
            uint256 amount1In,
            uint256 amount0Out,
            uint256 amount1Out,
            address indexed to
        );
    }

    impl Debug for Swap {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "Swap(sender: {}, amount0In: {}, amount1In: {}, amount0Out: {}, amount1Out: {}, to: {})",
                self.sender, self.amount0In, self.amount1In, self.amount0Out, self.amount1Out, self.to
            )
        }
    }
}

/// The V3 concentrated-liquidity pool swap event.
pub mod v3 {
    use std::fmt::Debug;

    use alloy_sol_types::sol;

    sol! {
        /// Emitted by a V3 pool when a swap executes.
        ///
        /// Amounts are signed balance deltas from the pool's
        /// perspective: positive values entered the pool, negative
        /// values left it.
        event Swap(
            address indexed sender,
            address indexed recipient,
            int256 amount0,
            int256 amount1,
            uint160 sqrtPriceX96,
            uint128 liquidity,
            int24 tick
        );
    }

    impl Debug for Swap {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "Swap(sender: {}, recipient: {}, amount0: {}, amount1: {}, sqrtPriceX96: {}, liquidity: {}, tick: {})",
                self.sender, self.recipient, self.amount0, self.amount1, self.sqrtPriceX96, self.liquidity, self.tick
            )
        }
    }
}
