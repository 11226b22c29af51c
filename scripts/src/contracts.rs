//! Handles on the deployed token and marketplace contracts, and the chain
//! client they submit calls through.
//!
//! The tasks only ever talk to the chain through [`ChainClient`], so they can
//! run against [`RpcClient`] or any test double.

use std::path::PathBuf;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, B256, U256},
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

use crate::{
    errors::ScriptError,
    plan::ContractDeployer,
    solidity::{IMarketplace, IOctoChest},
    utils::{read_artifact_bytecode, wait_for_tx_success},
};

/// A state-changing contract call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractTx {
    /// Grant `role` to `account` on the token contract
    GrantRole {
        /// The token contract
        token: Address,
        /// The role identifier
        role: B256,
        /// The account receiving the role
        account: Address,
    },
    /// Mint a level 1 token to `to`
    SafeMintLevel1 {
        /// The token contract
        token: Address,
        /// The recipient
        to: Address,
    },
    /// Mint a level 2 token to `to`
    SafeMintLevel2 {
        /// The token contract
        token: Address,
        /// The recipient
        to: Address,
    },
    /// Mint a token to `to` on a contract without levels
    SafeMint {
        /// The token contract
        token: Address,
        /// The recipient
        to: Address,
    },
    /// Approve `spender` to transfer `token_id`
    Approve {
        /// The token contract
        token: Address,
        /// The approved spender
        spender: Address,
        /// The token id
        token_id: U256,
    },
    /// List `token_id` for sale at `price`
    CreateListing {
        /// The marketplace contract
        marketplace: Address,
        /// The token id
        token_id: U256,
        /// The price, in the chain's smallest native unit
        price: U256,
    },
}

impl ContractTx {
    /// The Solidity method invoked by the call
    pub fn method(&self) -> &'static str {
        match self {
            ContractTx::GrantRole { .. } => "grantRole",
            ContractTx::SafeMintLevel1 { .. } => "safeMintLevel1",
            ContractTx::SafeMintLevel2 { .. } => "safeMintLevel2",
            ContractTx::SafeMint { .. } => "safeMint",
            ContractTx::Approve { .. } => "approve",
            ContractTx::CreateListing { .. } => "createListing",
        }
    }
}

/// The confirmation of a successful transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    /// The hash of the confirmed transaction
    pub tx_hash: TxHash,
}

/// The chain operations the tasks depend on
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The id of the connected chain
    async fn chain_id(&self) -> Result<u64, ScriptError>;

    /// The address of the account signing transactions
    fn signer_address(&self) -> Address;

    /// Query the minter role identifier of the token contract
    async fn minter_role(&self, token: Address) -> Result<B256, ScriptError>;

    /// Query whether `account` holds `role` on the token contract
    async fn has_role(
        &self,
        token: Address,
        role: B256,
        account: Address,
    ) -> Result<bool, ScriptError>;

    /// Submit a transaction and wait for its confirmation
    async fn submit(&self, tx: ContractTx) -> Result<TxReceipt, ScriptError>;
}

// -----------
// | Handles |
// -----------

/// A handle on a deployed token contract
pub struct OctoChestHandle<'a, C: ?Sized> {
    /// The token contract address
    address: Address,
    /// The client calls are submitted through
    client: &'a C,
}

impl<'a, C: ChainClient + ?Sized> OctoChestHandle<'a, C> {
    /// Bind a handle to the token contract at `address`
    pub fn new(address: Address, client: &'a C) -> Self {
        Self { address, client }
    }

    /// The token contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// The minter role identifier
    pub async fn minter_role(&self) -> Result<B256, ScriptError> {
        self.client.minter_role(self.address).await
    }

    /// Whether `account` holds `role`
    pub async fn has_role(&self, role: B256, account: Address) -> Result<bool, ScriptError> {
        self.client.has_role(self.address, role, account).await
    }

    /// Grant `role` to `account`
    pub async fn grant_role(&self, role: B256, account: Address) -> Result<TxReceipt, ScriptError> {
        self.client
            .submit(ContractTx::GrantRole {
                token: self.address,
                role,
                account,
            })
            .await
    }

    /// Mint a level 1 token
    pub async fn safe_mint_level1(&self, to: Address) -> Result<TxReceipt, ScriptError> {
        let token = self.address;
        self.client
            .submit(ContractTx::SafeMintLevel1 { token, to })
            .await
    }

    /// Mint a level 2 token
    pub async fn safe_mint_level2(&self, to: Address) -> Result<TxReceipt, ScriptError> {
        let token = self.address;
        self.client
            .submit(ContractTx::SafeMintLevel2 { token, to })
            .await
    }

    /// Mint a token on a contract without levels
    pub async fn safe_mint(&self, to: Address) -> Result<TxReceipt, ScriptError> {
        let token = self.address;
        self.client.submit(ContractTx::SafeMint { token, to }).await
    }

    /// Approve `spender` to transfer `token_id`
    pub async fn approve(&self, spender: Address, token_id: U256) -> Result<TxReceipt, ScriptError> {
        self.client
            .submit(ContractTx::Approve {
                token: self.address,
                spender,
                token_id,
            })
            .await
    }
}

/// A handle on a deployed marketplace contract
pub struct MarketplaceHandle<'a, C: ?Sized> {
    /// The marketplace contract address
    address: Address,
    /// The client calls are submitted through
    client: &'a C,
}

impl<'a, C: ChainClient + ?Sized> MarketplaceHandle<'a, C> {
    /// Bind a handle to the marketplace contract at `address`
    pub fn new(address: Address, client: &'a C) -> Self {
        Self { address, client }
    }

    /// The marketplace contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// List `token_id` for sale at `price`
    pub async fn create_listing(
        &self,
        token_id: U256,
        price: U256,
    ) -> Result<TxReceipt, ScriptError> {
        self.client
            .submit(ContractTx::CreateListing {
                marketplace: self.address,
                token_id,
                price,
            })
            .await
    }
}

// --------------
// | RPC Client |
// --------------

/// A [`ChainClient`] backed by an RPC provider with a local signer attached
#[derive(Clone)]
pub struct RpcClient {
    /// The provider, with the signer's wallet attached
    provider: DynProvider,
    /// The address of the signer
    signer_address: Address,
}

impl RpcClient {
    /// Create a client over a provider whose wallet signs for `signer_address`
    pub fn new(provider: DynProvider, signer_address: Address) -> Self {
        Self {
            provider,
            signer_address,
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn chain_id(&self) -> Result<u64, ScriptError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
    }

    fn signer_address(&self) -> Address {
        self.signer_address
    }

    async fn minter_role(&self, token: Address) -> Result<B256, ScriptError> {
        IOctoChest::new(token, self.provider.clone())
            .MINTER_ROLE()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn has_role(
        &self,
        token: Address,
        role: B256,
        account: Address,
    ) -> Result<bool, ScriptError> {
        IOctoChest::new(token, self.provider.clone())
            .hasRole(role, account)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn submit(&self, tx: ContractTx) -> Result<TxReceipt, ScriptError> {
        match tx {
            ContractTx::GrantRole {
                token,
                role,
                account,
            } => {
                let contract = IOctoChest::new(token, self.provider.clone());
                wait_for_tx_success(contract.grantRole(role, account)).await
            }
            ContractTx::SafeMintLevel1 { token, to } => {
                let contract = IOctoChest::new(token, self.provider.clone());
                wait_for_tx_success(contract.safeMintLevel1(to)).await
            }
            ContractTx::SafeMintLevel2 { token, to } => {
                let contract = IOctoChest::new(token, self.provider.clone());
                wait_for_tx_success(contract.safeMintLevel2(to)).await
            }
            ContractTx::SafeMint { token, to } => {
                let contract = IOctoChest::new(token, self.provider.clone());
                wait_for_tx_success(contract.safeMint(to)).await
            }
            ContractTx::Approve {
                token,
                spender,
                token_id,
            } => {
                let contract = IOctoChest::new(token, self.provider.clone());
                wait_for_tx_success(contract.approve(spender, token_id)).await
            }
            ContractTx::CreateListing {
                marketplace,
                token_id,
                price,
            } => {
                let contract = IMarketplace::new(marketplace, self.provider.clone());
                wait_for_tx_success(contract.createListing(token_id, price)).await
            }
        }
    }
}

/// Deploys contracts through an [`RpcClient`], reading creation bytecode
/// from compilation artifacts
pub struct ArtifactDeployer<'a> {
    /// The client deployments are sent through
    client: &'a RpcClient,
    /// The directory containing the compilation artifacts
    artifacts_dir: PathBuf,
}

impl<'a> ArtifactDeployer<'a> {
    /// Create a deployer reading artifacts from `artifacts_dir`
    pub fn new(client: &'a RpcClient, artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            artifacts_dir: artifacts_dir.into(),
        }
    }
}

#[async_trait]
impl<'a> ContractDeployer for ArtifactDeployer<'a> {
    async fn deploy(
        &self,
        contract_name: &str,
        constructor_args: Bytes,
    ) -> Result<Address, ScriptError> {
        let bytecode = read_artifact_bytecode(&self.artifacts_dir, contract_name)?;
        let mut deploy_code = bytecode.to_vec();
        deploy_code.extend_from_slice(&constructor_args);
        let tx = TransactionRequest::default().with_deploy_code(deploy_code);

        let receipt = self
            .client
            .provider()
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "deployment of {} reverted in {:#x}",
                contract_name, receipt.transaction_hash
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in the receipt for {contract_name}"
            ))
        })
    }
}
