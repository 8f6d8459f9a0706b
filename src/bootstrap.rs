// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Binary orchestration: wire datasets, correlation, and extraction.
//!
//! The binary takes three location parameters - the transactions
//! dataset, the logs dataset, and the output location - and reads its
//! resolver credentials from the environment. Everything here is
//! orchestration; the engine itself lives behind
//! [`SwapExtractor`](crate::extractor::SwapExtractor).

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use url::Url;

use crate::config::RouterConfig;
use crate::correlate::correlate_pairs;
use crate::datasets;
use crate::extractor::{CancelToken, SwapExtractor};
use crate::metadata::EtherscanResolver;

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (Some(transactions_path), Some(logs_path), Some(output_path)) =
        (args.next(), args.next(), args.next())
    else {
        anyhow::bail!("usage: semioswap <transactions> <logs> <output>");
    };

    let rpc_url = dotenvy::var("RPC_URL")
        .context("RPC_URL must be set")?
        .parse::<Url>()
        .context("Invalid RPC_URL")?;
    let api_key = dotenvy::var("ETHERSCAN_API_KEY").context("ETHERSCAN_API_KEY must be set")?;

    // Default to the mainnet Universal Router unless overridden
    let mut builder = RouterConfig::builder();
    if let Ok(router) = dotenvy::var("ROUTER_ADDRESS") {
        builder = builder.router(router.parse().context("Invalid ROUTER_ADDRESS")?);
    }
    let config = builder.build();

    let transactions = datasets::read_transactions(&transactions_path)?;
    let logs = datasets::read_logs(&logs_path)?;
    let pairs = correlate_pairs(&config, transactions, logs);

    let provider = alloy_provider::ProviderBuilder::new().connect_http(rpc_url);
    let resolver = Arc::new(EtherscanResolver::new(provider, api_key));
    let extractor = SwapExtractor::new(config, resolver);

    let report = extractor.run(pairs, &CancelToken::new()).await;
    datasets::write_swap_records(&output_path, &report.records)?;

    info!(
        records = report.records.len(),
        output = %output_path,
        "Swap extraction complete"
    );
    Ok(())
}
