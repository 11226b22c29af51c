//! Definitions of errors that can occur during the execution of the deployment and task scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment and task scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// No deployment record exists for the requested chain
    DeploymentRecordMissing(String),
    /// The deployment record exists but lacks the requested `module#contract` key
    ContractKeyMissing(String),
    /// Error reading or decoding a deployment record
    ReadDeployments(String),
    /// Error writing a deployment record
    WriteDeployments(String),
    /// Error reading or decoding a deployment parameters file
    ReadParameters(String),
    /// A parameter required by the deployment plan was not provided
    MissingParameter(String),
    /// The deployment plan references a contract before it is deployed
    InvalidPlan(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error constructing calldata (addresses, token ids, constructor args)
    CalldataConstruction(String),
    /// Error parsing a human-readable price into the native smallest unit
    PriceParsing(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a read-only contract method
    ContractInteraction(String),
    /// A submitted transaction failed to send, confirm, or execute
    TransactionFailure(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::DeploymentRecordMissing(s) => {
                write!(f, "deployment record not found: {}", s)
            }
            ScriptError::ContractKeyMissing(s) => write!(f, "contract key not found: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ReadParameters(s) => write!(f, "error reading parameters: {}", s),
            ScriptError::MissingParameter(s) => write!(f, "missing deployment parameter: {}", s),
            ScriptError::InvalidPlan(s) => write!(f, "invalid deployment plan: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::PriceParsing(s) => write!(f, "error parsing price: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::TransactionFailure(s) => write!(f, "transaction failed: {}", s),
        }
    }
}

impl Error for ScriptError {}
