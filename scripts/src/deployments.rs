//! Reading and writing the per-chain deployment records, and resolving
//! deployed contract addresses from them.
//!
//! A chain's record lives at `<base_dir>/chain-<chain_id>/deployed_addresses.json`
//! and maps `"<module>#<contract>"` keys to address strings.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::{CHAIN_DIR_PREFIX, DEPLOYED_ADDRESSES_FILE, RECORD_KEY_SEPARATOR},
    errors::ScriptError,
};

/// Build the record key identifying a contract within a deployment module
pub fn record_key(module_name: &str, contract_name: &str) -> String {
    format!("{module_name}{RECORD_KEY_SEPARATOR}{contract_name}")
}

/// The path of the deployment record for the given chain
pub fn deployment_record_path(base_dir: &Path, chain_id: u64) -> PathBuf {
    base_dir
        .join(format!("{CHAIN_DIR_PREFIX}{chain_id}"))
        .join(DEPLOYED_ADDRESSES_FILE)
}

/// The deployed addresses on a single chain, keyed by `module#contract`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentRecord(BTreeMap<String, String>);

impl DeploymentRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the address of a deployed contract, replacing any previous entry
    pub fn insert(&mut self, module_name: &str, contract_name: &str, address: Address) {
        self.0.insert(
            record_key(module_name, contract_name),
            address.to_checksum(None /* chain_id */),
        );
    }

    /// Get the raw address string stored under the given key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The number of contracts in the record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read the record stored at the given path
    pub fn read(path: &Path) -> Result<Self, ScriptError> {
        if !path.exists() {
            return Err(ScriptError::DeploymentRecordMissing(format!(
                "no deployment file at {}",
                path.display()
            )));
        }

        let contents =
            fs::read_to_string(path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| {
            ScriptError::ReadDeployments(format!("malformed record {}: {}", path.display(), e))
        })
    }

    /// Write the record for the given chain, overwriting any existing record
    /// wholesale. Returns the path written to.
    pub fn write(&self, base_dir: &Path, chain_id: u64) -> Result<PathBuf, ScriptError> {
        let path = deployment_record_path(base_dir, chain_id);
        if let Some(chain_dir) = path.parent() {
            fs::create_dir_all(chain_dir)
                .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        fs::write(&path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

        Ok(path)
    }
}

/// Resolves `(module, contract, chain)` triples to deployed addresses.
///
/// Holds no state besides the records directory; every lookup re-reads the
/// chain's record.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    /// The root directory of the per-chain records
    base_dir: PathBuf,
}

impl AddressResolver {
    /// Create a resolver over the given records directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the address of `contract_name` in `module_name` on `chain_id`
    pub fn resolve(
        &self,
        module_name: &str,
        contract_name: &str,
        chain_id: u64,
    ) -> Result<Address, ScriptError> {
        let path = deployment_record_path(&self.base_dir, chain_id);
        let record = DeploymentRecord::read(&path)?;

        let key = record_key(module_name, contract_name);
        let addr_str = record
            .get(&key)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ScriptError::ContractKeyMissing(format!("\"{}\" in {}", key, path.display()))
            })?;

        let address = Address::from_str(addr_str).map_err(|e| {
            ScriptError::ReadDeployments(format!("invalid address {addr_str} for {key}: {e}"))
        })?;
        debug!("resolved {key} on chain {chain_id} to {address:#x}");

        Ok(address)
    }
}
