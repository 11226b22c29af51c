//! Utilities for the deployment and task scripts.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    contract::{CallBuilder, CallDecoder},
    network::Ethereum,
    primitives::{Address, Bytes, U256},
    providers::{DynProvider, ProviderBuilder},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};

use crate::{
    constants::ARTIFACT_BYTECODE_KEY,
    contracts::{RpcClient, TxReceipt},
    errors::ScriptError,
};

/// The call builder type used by the scripts
pub type ScriptCallBuilder<'a, C> = CallBuilder<&'a DynProvider, C, Ethereum>;

/// Sets up the RPC client from the signer's private key and the RPC url
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<RpcClient, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let signer_address = signer.address();
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    Ok(RpcClient::new(DynProvider::new(provider), signer_address))
}

// ----------------
// | Transactions |
// ----------------

/// Send a transaction and wait for its receipt
pub async fn send_tx<C: CallDecoder>(
    tx: ScriptCallBuilder<'_, C>,
) -> Result<TransactionReceipt, ScriptError> {
    let pending_tx = tx
        .send()
        .await
        .map_err(|e| ScriptError::TransactionFailure(e.to_string()))?;

    pending_tx
        .get_receipt()
        .await
        .map_err(|e| ScriptError::TransactionFailure(e.to_string()))
}

/// Send a transaction, wait for its receipt, and ensure it was successful
pub async fn wait_for_tx_success<C: CallDecoder>(
    tx: ScriptCallBuilder<'_, C>,
) -> Result<TxReceipt, ScriptError> {
    let receipt = send_tx(tx).await?;
    if !receipt.status() {
        return Err(ScriptError::TransactionFailure(format!(
            "transaction {:#x} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(TxReceipt {
        tx_hash: receipt.transaction_hash,
    })
}

// -----------
// | Parsing |
// -----------

/// Parse a hex address given on the command line
pub fn parse_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address)
        .map_err(|e| ScriptError::CalldataConstruction(format!("invalid address {address}: {e}")))
}

/// Parse a token id given on the command line
///
/// Accepts decimal digits or `0x`-prefixed hex digits only
pub fn parse_token_id(token_id: &str) -> Result<U256, ScriptError> {
    let invalid = |reason: String| {
        ScriptError::CalldataConstruction(format!("invalid token id {token_id:?}: {reason}"))
    };

    let (digits, radix) = match token_id.strip_prefix("0x") {
        Some(hex) => (hex, 16u32),
        None => (token_id, 10u32),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid("expected a decimal or 0x-prefixed hex integer".to_string()));
    }

    U256::from_str_radix(digits, u64::from(radix)).map_err(|e| invalid(e.to_string()))
}

// -------------
// | Artifacts |
// -------------

/// The path of a compiled contract's artifact, in the hardhat layout
/// `<artifacts_dir>/<Contract>.sol/<Contract>.json`
pub fn artifact_path(artifacts_dir: &Path, contract_name: &str) -> PathBuf {
    artifacts_dir
        .join(format!("{contract_name}.sol"))
        .join(format!("{contract_name}.json"))
}

/// Read the creation bytecode of a contract from its compilation artifact
pub fn read_artifact_bytecode(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<Bytes, ScriptError> {
    let path = artifact_path(artifacts_dir, contract_name);
    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
    let artifact: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    let bytecode_hex = artifact[ARTIFACT_BYTECODE_KEY].as_str().ok_or_else(|| {
        ScriptError::ArtifactParsing(format!("no bytecode in {}", path.display()))
    })?;
    let bytecode =
        Bytes::from_str(bytecode_hex).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{contract_name} has empty bytecode"
        )));
    }

    Ok(bytecode)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_read_artifact_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        let contract_dir = dir.path().join("OctoChest.sol");
        fs::create_dir_all(&contract_dir).unwrap();
        fs::write(
            contract_dir.join("OctoChest.json"),
            r#"{ "contractName": "OctoChest", "bytecode": "0x6080604052" }"#,
        )
        .unwrap();

        let bytecode = read_artifact_bytecode(dir.path(), "OctoChest").unwrap();
        assert_eq!(bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let contract_dir = dir.path().join("IMarketplace.sol");
        fs::create_dir_all(&contract_dir).unwrap();
        fs::write(
            contract_dir.join("IMarketplace.json"),
            r#"{ "bytecode": "0x" }"#,
        )
        .unwrap();

        let res = read_artifact_bytecode(dir.path(), "IMarketplace");
        assert!(matches!(res, Err(ScriptError::ArtifactParsing(_))));
    }

    #[test]
    fn test_parse_token_id() {
        assert_eq!(parse_token_id("5").unwrap(), U256::from(5));
        assert_eq!(parse_token_id("0x05").unwrap(), U256::from(5));
        assert_eq!(parse_token_id("0").unwrap(), U256::ZERO);

        for token_id in ["", "-1", "1_0", "0b101", "0x", " 5", "5a"] {
            assert!(
                matches!(
                    parse_token_id(token_id),
                    Err(ScriptError::CalldataConstruction(_))
                ),
                "accepted {token_id:?}"
            );
        }
    }
}
