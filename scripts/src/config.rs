//! Selection of the RPC endpoint the scripts connect to

use crate::{constants::DEFAULT_RPC_URL, errors::ScriptError, types::Network};

/// Build the Alchemy RPC URL for the given network
pub fn alchemy_url(network: Network, api_key: &str) -> String {
    format!("https://{}.g.alchemy.com/v2/{}", network.alchemy_slug(), api_key)
}

/// Resolve the RPC URL to connect to.
///
/// An explicit URL wins, then a known network (which requires an Alchemy API
/// key), and finally the local devnet default.
pub fn resolve_rpc_url(
    rpc_url: Option<&str>,
    network: Option<Network>,
    alchemy_api_key: Option<&str>,
) -> Result<String, ScriptError> {
    if let Some(url) = rpc_url {
        return Ok(url.to_string());
    }

    match network {
        Some(network) => {
            let api_key = alchemy_api_key.ok_or_else(|| {
                ScriptError::ClientInitialization(format!(
                    "an Alchemy API key is required to connect to {network}"
                ))
            })?;
            Ok(alchemy_url(network, api_key))
        }
        None => Ok(DEFAULT_RPC_URL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins() {
        let url = resolve_rpc_url(
            Some("http://10.0.0.1:8545"),
            Some(Network::Arbitrum),
            Some("key"),
        )
        .unwrap();
        assert_eq!(url, "http://10.0.0.1:8545");
    }

    #[test]
    fn test_network_url() {
        let url = resolve_rpc_url(None, Some(Network::ArbitrumSepolia), Some("abc")).unwrap();
        assert_eq!(url, "https://arb-sepolia.g.alchemy.com/v2/abc");
    }

    #[test]
    fn test_network_requires_api_key() {
        let res = resolve_rpc_url(None, Some(Network::Base), None);
        assert!(matches!(res, Err(ScriptError::ClientInitialization(_))));
    }

    #[test]
    fn test_devnet_default() {
        assert_eq!(resolve_rpc_url(None, None, None).unwrap(), DEFAULT_RPC_URL);
    }
}
