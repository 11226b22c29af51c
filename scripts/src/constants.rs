//! Constants used in the deployment and task scripts

/// The name of the deployment module declaring the token and marketplace contracts
pub const MODULE_NAME: &str = "OctoChestModule";

/// The name of the token contract within the deployment module
pub const TOKEN_CONTRACT_NAME: &str = "OctoChest";

/// The name of the marketplace contract within the deployment module
pub const MARKETPLACE_CONTRACT_NAME: &str = "Marketplace";

/// The separator between the module name and contract name in a record key
pub const RECORD_KEY_SEPARATOR: char = '#';

/// The default root directory of the per-chain deployment records
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "ignition/deployments";

/// The prefix of a per-chain deployment directory, followed by the chain id
pub const CHAIN_DIR_PREFIX: &str = "chain-";

/// The name of the deployment record file within a chain directory
pub const DEPLOYED_ADDRESSES_FILE: &str = "deployed_addresses.json";

/// The default directory containing compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/contracts";

/// The bytecode key in a compiled contract artifact
pub const ARTIFACT_BYTECODE_KEY: &str = "bytecode";

/// The RPC URL used when neither an explicit URL nor a network is configured
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

// --- Deployment parameters --- //

/// The token contract's default admin parameter
pub const DEFAULT_ADMIN_PARAM: &str = "defaultAdmin";

/// The token contract's minter parameter
pub const MINTER_PARAM: &str = "minter";

/// The marketplace contract's fee parameter
pub const FEE_PARAM: &str = "fee";

/// The marketplace contract's accepted payment tokens parameter
pub const PAYMENT_TOKENS_PARAM: &str = "paymentTokens";

// --- Mint levels --- //

/// The level minted through `safeMintLevel1`
pub const LEVEL_1: u64 = 1;

/// The level minted through `safeMintLevel2`
pub const LEVEL_2: u64 = 2;

/// The number of decimals in the native unit of a listing price
pub const PRICE_DECIMALS: usize = 18;
