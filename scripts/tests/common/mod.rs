//! Shared test doubles for the task and deployment tests

#![allow(dead_code)]

use std::{
    path::Path,
    sync::{
        atomic::{AtomicU8, Ordering},
        Mutex,
    },
};

use alloy::primitives::{address, Address, Bytes, TxHash, B256};
use async_trait::async_trait;
use octo_scripts::{
    contracts::{ChainClient, ContractTx, TxReceipt},
    deployments::DeploymentRecord,
    errors::ScriptError,
    plan::ContractDeployer,
};

/// The address of the signer used by the test chain
pub const SIGNER: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");

/// The minter role identifier reported by the test chain
pub const MINTER_ROLE: B256 = B256::repeat_byte(0x9f);

/// An observed interaction with the test chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainCall {
    /// `chain_id` was queried
    ChainId,
    /// The minter role of the given token was queried
    MinterRole(Address),
    /// Role membership was queried
    HasRole {
        token: Address,
        role: B256,
        account: Address,
    },
    /// A transaction was submitted
    Submitted(ContractTx),
    /// A submitted transaction was confirmed
    Confirmed(ContractTx),
}

/// A chain client that records every call in order
pub struct MockChain {
    chain_id: u64,
    is_minter: Mutex<bool>,
    failing_method: Option<&'static str>,
    calls: Mutex<Vec<ChainCall>>,
    next_hash: AtomicU8,
}

impl MockChain {
    /// A chain on which the signer holds no role yet
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            is_minter: Mutex::new(false),
            failing_method: None,
            calls: Mutex::new(Vec::new()),
            next_hash: AtomicU8::new(1),
        }
    }

    /// Make the signer a minter from the start
    pub fn with_minter(self) -> Self {
        *self.is_minter.lock().unwrap() = true;
        self
    }

    /// Make every transaction calling `method` fail
    pub fn failing(mut self, method: &'static str) -> Self {
        self.failing_method = Some(method);
        self
    }

    /// Every call observed so far
    pub fn calls(&self) -> Vec<ChainCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The transactions submitted so far, in order
    pub fn submitted(&self) -> Vec<ContractTx> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ChainCall::Submitted(tx) => Some(tx),
                _ => None,
            })
            .collect()
    }

    /// The position of the first call matching `call`
    pub fn position(&self, call: &ChainCall) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    fn record(&self, call: ChainCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> Result<u64, ScriptError> {
        self.record(ChainCall::ChainId);
        Ok(self.chain_id)
    }

    fn signer_address(&self) -> Address {
        SIGNER
    }

    async fn minter_role(&self, token: Address) -> Result<B256, ScriptError> {
        self.record(ChainCall::MinterRole(token));
        Ok(MINTER_ROLE)
    }

    async fn has_role(
        &self,
        token: Address,
        role: B256,
        account: Address,
    ) -> Result<bool, ScriptError> {
        self.record(ChainCall::HasRole {
            token,
            role,
            account,
        });
        Ok(role == MINTER_ROLE && account == SIGNER && *self.is_minter.lock().unwrap())
    }

    async fn submit(&self, tx: ContractTx) -> Result<TxReceipt, ScriptError> {
        self.record(ChainCall::Submitted(tx));
        if self.failing_method == Some(tx.method()) {
            return Err(ScriptError::TransactionFailure(format!(
                "{} reverted",
                tx.method()
            )));
        }

        if let ContractTx::GrantRole { role, account, .. } = tx {
            if role == MINTER_ROLE && account == SIGNER {
                *self.is_minter.lock().unwrap() = true;
            }
        }

        self.record(ChainCall::Confirmed(tx));
        let n = self.next_hash.fetch_add(1, Ordering::SeqCst);
        Ok(TxReceipt {
            tx_hash: TxHash::with_last_byte(n),
        })
    }
}

/// A deployer that hands out sequential addresses and records what it deployed
pub struct RecordingDeployer {
    deployed: Mutex<Vec<(String, Bytes)>>,
}

impl RecordingDeployer {
    pub fn new() -> Self {
        Self {
            deployed: Mutex::new(Vec::new()),
        }
    }

    /// The `(contract, constructor args)` pairs deployed so far, in order
    pub fn deployed(&self) -> Vec<(String, Bytes)> {
        self.deployed.lock().unwrap().clone()
    }

    /// The address the deployer assigns to its `n`th deployment
    pub fn address_of(n: usize) -> Address {
        Address::with_last_byte(0xa0 + n as u8)
    }
}

#[async_trait]
impl ContractDeployer for RecordingDeployer {
    async fn deploy(
        &self,
        contract_name: &str,
        constructor_args: Bytes,
    ) -> Result<Address, ScriptError> {
        let mut deployed = self.deployed.lock().unwrap();
        let address = Self::address_of(deployed.len());
        deployed.push((contract_name.to_string(), constructor_args));
        Ok(address)
    }
}

/// Write a raw JSON deployment record for `chain_id` under `base_dir`
pub fn write_raw_record(base_dir: &Path, chain_id: u64, json: &str) {
    let path = octo_scripts::deployments::deployment_record_path(base_dir, chain_id);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, json).unwrap();
}

/// Write a record holding the given token and marketplace addresses
pub fn write_record(
    base_dir: &Path,
    chain_id: u64,
    token: Address,
    marketplace: Option<Address>,
) -> DeploymentRecord {
    let mut record = DeploymentRecord::new();
    record.insert("OctoChestModule", "OctoChest", token);
    if let Some(marketplace) = marketplace {
        record.insert("OctoChestModule", "Marketplace", marketplace);
    }
    record.write(base_dir, chain_id).unwrap();
    record
}
