// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Etherscan-backed metadata resolver.
//!
//! Interface descriptions come from the Etherscan contract directory
//! (`module=contract&action=getabi`); token display values are read
//! on-chain by calling `name()` and `symbol()` through the fetched
//! interface with a dynamically-typed contract instance.

use alloy_contract::{ContractInstance, Interface};
use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use alloy_provider::Provider;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::errors::MetadataError;
use crate::metadata::MetadataResolver;

/// Default Etherscan API endpoint for Ethereum mainnet.
pub const DEFAULT_DIRECTORY_URL: &str = "https://api.etherscan.io/api";

/// Resolves interfaces via the Etherscan directory and token display
/// values via `eth_call` through an RPC provider.
///
/// # Example
///
/// ```rust,ignore
/// use alloy_provider::ProviderBuilder;
/// use semioswap::EtherscanResolver;
///
/// let provider = ProviderBuilder::new().connect_http(rpc_url.parse()?);
/// let resolver = EtherscanResolver::new(provider, api_key);
/// let interface = resolver.resolve_interface(token).await?;
/// let (name, symbol) = resolver.resolve_token_display(token, &interface).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EtherscanResolver<P> {
    http: reqwest::Client,
    directory_url: String,
    api_key: String,
    provider: P,
}

/// Response envelope of the Etherscan `getabi` endpoint.
#[derive(Debug, Deserialize)]
struct DirectoryEnvelope {
    status: String,
    message: String,
    result: String,
}

impl<P> EtherscanResolver<P> {
    /// Create a resolver against the mainnet Etherscan endpoint.
    pub fn new(provider: P, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            api_key: api_key.into(),
            provider,
        }
    }

    /// Override the directory endpoint (testnets, mirrors, test servers).
    pub fn with_directory_url(mut self, url: impl Into<String>) -> Self {
        self.directory_url = url.into();
        self
    }

    /// Interpret a directory response for `address`.
    ///
    /// Unverified contracts are a definitive `NotFound`; every other
    /// non-success status (rate limiting included) is a transient
    /// `Call` failure.
    fn parse_directory_envelope(
        address: Address,
        envelope: DirectoryEnvelope,
    ) -> Result<JsonAbi, MetadataError> {
        if envelope.status != "1" {
            if envelope.result.contains("not verified") {
                return Err(MetadataError::not_found(address));
            }
            return Err(MetadataError::call(
                address,
                format!("directory error: {} ({})", envelope.message, envelope.result),
            ));
        }

        serde_json::from_str(&envelope.result).map_err(|e| {
            MetadataError::call(address, format!("invalid interface description: {e}"))
        })
    }
}

impl<P: Provider + Clone + 'static> EtherscanResolver<P> {
    /// Call a zero-argument string accessor on a contract.
    async fn call_string(
        &self,
        interface: &JsonAbi,
        address: Address,
        function: &str,
    ) -> Result<String, MetadataError> {
        let contract =
            ContractInstance::new(address, self.provider.clone(), Interface::new(interface.clone()));

        let outputs = contract
            .function(function, &[])
            .map_err(|e| MetadataError::call(address, e.to_string()))?
            .call()
            .await
            .map_err(|e| MetadataError::call(address, e.to_string()))?;

        match outputs.first() {
            Some(DynSolValue::String(value)) => Ok(value.clone()),
            Some(other) => Err(MetadataError::call(
                address,
                format!("{function}() returned a non-string value: {other:?}"),
            )),
            None => Err(MetadataError::call(
                address,
                format!("{function}() returned no values"),
            )),
        }
    }
}

#[async_trait]
impl<P: Provider + Clone + 'static> MetadataResolver for EtherscanResolver<P> {
    async fn resolve_interface(&self, address: Address) -> Result<JsonAbi, MetadataError> {
        let url = Url::parse_with_params(
            &self.directory_url,
            &[
                ("module", "contract"),
                ("action", "getabi"),
                ("address", address.to_string().as_str()),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| MetadataError::call(address, e.to_string()))?;

        debug!(contract = %address, "Fetching interface description");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MetadataError::call(address, e.to_string()))?;
        let envelope: DirectoryEnvelope = response
            .json()
            .await
            .map_err(|e| MetadataError::call(address, e.to_string()))?;

        Self::parse_directory_envelope(address, envelope)
    }

    async fn resolve_token_display(
        &self,
        address: Address,
        interface: &JsonAbi,
    ) -> Result<(String, String), MetadataError> {
        let name = self.call_string(interface, address, "name").await?;
        let symbol = self.call_string(interface, address, "symbol").await?;
        debug!(token = %address, name = %name, symbol = %symbol, "Resolved token display");
        Ok((name, symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(status: &str, message: &str, result: &str) -> DirectoryEnvelope {
        DirectoryEnvelope {
            status: status.to_string(),
            message: message.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn test_parses_a_verified_interface() {
        let abi_json = r#"[{"type":"function","name":"symbol","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"}]"#;
        let interface = EtherscanResolver::<()>::parse_directory_envelope(
            Address::ZERO,
            envelope("1", "OK", abi_json),
        )
        .unwrap();
        assert!(interface.function("symbol").is_some());
    }

    #[test]
    fn test_unverified_contract_maps_to_not_found() {
        let err = EtherscanResolver::<()>::parse_directory_envelope(
            Address::ZERO,
            envelope("0", "NOTOK", "Contract source code not verified"),
        )
        .unwrap_err();
        assert!(matches!(err, MetadataError::NotFound { .. }));
    }

    #[test]
    fn test_rate_limit_maps_to_transient_call_failure() {
        let err = EtherscanResolver::<()>::parse_directory_envelope(
            Address::ZERO,
            envelope("0", "NOTOK", "Max rate limit reached"),
        )
        .unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn test_garbage_interface_json_maps_to_call_failure() {
        let err = EtherscanResolver::<()>::parse_directory_envelope(
            Address::ZERO,
            envelope("1", "OK", "not an abi"),
        )
        .unwrap_err();
        assert!(matches!(err, MetadataError::Call { .. }));
    }
}
