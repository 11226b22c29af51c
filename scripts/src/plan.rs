//! The declarative deployment plan for the token and marketplace contracts.
//!
//! A plan lists the contracts of a deployment module in order, along with
//! their constructor arguments. An argument is either a named parameter
//! supplied by the parameters file, or the address of a contract deployed
//! earlier in the same plan. The plan itself performs no chain I/O; it is
//! executed against a [`ContractDeployer`].

use std::{collections::HashMap, fs, path::Path, str::FromStr};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes, U256},
};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::{
    constants::{
        DEFAULT_ADMIN_PARAM, FEE_PARAM, MARKETPLACE_CONTRACT_NAME, MINTER_PARAM, MODULE_NAME,
        PAYMENT_TOKENS_PARAM, TOKEN_CONTRACT_NAME,
    },
    deployments::DeploymentRecord,
    errors::ScriptError,
    types::PlanKind,
};

/// A collaborator capable of deploying a contract and awaiting its confirmation
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Deploy `contract_name` with the given ABI-encoded constructor
    /// arguments, returning the address of the confirmed deployment
    async fn deploy(
        &self,
        contract_name: &str,
        constructor_args: Bytes,
    ) -> Result<Address, ScriptError>;
}

// --------------
// | Parameters |
// --------------

/// The parameters consumed by the deployment plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentParameters {
    /// The admin of the token contract
    #[serde(default)]
    pub default_admin: Option<Address>,
    /// The account granted the minter role on the token contract
    #[serde(default)]
    pub minter: Option<Address>,
    /// The marketplace fee
    #[serde(default, deserialize_with = "deserialize_fee")]
    pub fee: Option<U256>,
    /// The tokens the marketplace accepts as payment
    #[serde(default)]
    pub payment_tokens: Option<Vec<Address>>,
}

impl DeploymentParameters {
    /// Read the parameters for `module_name` from a JSON file
    pub fn from_file(path: &Path, module_name: &str) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadParameters(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents, module_name)
    }

    /// Parse the parameters for `module_name` from a JSON string.
    ///
    /// Accepts both the module-keyed layout `{ "<module>": { ... } }` and a
    /// flat object holding the parameters directly.
    pub fn from_json_str(json: &str, module_name: &str) -> Result<Self, ScriptError> {
        let mut value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ScriptError::ReadParameters(e.to_string()))?;

        let params = if value.get(module_name).is_some() {
            value[module_name].take()
        } else {
            value
        };

        serde_json::from_value(params).map_err(|e| ScriptError::ReadParameters(e.to_string()))
    }

    /// Get the ABI value of the named parameter
    pub fn value(&self, name: &str) -> Result<DynSolValue, ScriptError> {
        let missing = || ScriptError::MissingParameter(name.to_string());
        match name {
            DEFAULT_ADMIN_PARAM => self.default_admin.map(DynSolValue::Address).ok_or_else(missing),
            MINTER_PARAM => self.minter.map(DynSolValue::Address).ok_or_else(missing),
            FEE_PARAM => self
                .fee
                .map(|fee| DynSolValue::Uint(fee, 256))
                .ok_or_else(missing),
            PAYMENT_TOKENS_PARAM => self
                .payment_tokens
                .as_ref()
                .map(|tokens| {
                    DynSolValue::Array(tokens.iter().copied().map(DynSolValue::Address).collect())
                })
                .ok_or_else(missing),
            _ => Err(missing()),
        }
    }
}

/// A fee may be given either as a JSON number or as a decimal / hex string
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    /// A JSON number
    Number(u64),
    /// A decimal or `0x`-prefixed hex string
    String(String),
}

/// Deserialize an optional fee from a number or a string
fn deserialize_fee<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<U256>, D::Error> {
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(|raw| match raw {
            NumberOrString::Number(n) => Ok(U256::from(n)),
            NumberOrString::String(s) => U256::from_str(&s).map_err(serde::de::Error::custom),
        })
        .transpose()
}

// --------
// | Plan |
// --------

/// A constructor argument of a planned contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanArg {
    /// A named deployment parameter
    Parameter(&'static str),
    /// The address of a contract deployed earlier in the plan
    Contract(&'static str),
}

/// A contract to deploy, with its constructor arguments in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedContract {
    /// The contract name
    pub name: &'static str,
    /// The constructor arguments
    pub args: Vec<PlanArg>,
}

/// An ordered list of contracts to deploy within one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    /// The plan variant
    kind: PlanKind,
    /// The module name used to key the deployment record
    module_name: &'static str,
    /// The contracts to deploy, in deployment order
    contracts: Vec<PlannedContract>,
}

impl DeploymentPlan {
    /// Build the plan for the given variant
    pub fn new(kind: PlanKind) -> Self {
        let mut contracts = vec![PlannedContract {
            name: TOKEN_CONTRACT_NAME,
            args: vec![
                PlanArg::Parameter(DEFAULT_ADMIN_PARAM),
                PlanArg::Parameter(MINTER_PARAM),
            ],
        }];

        if kind == PlanKind::TokenAndMarketplace {
            contracts.push(PlannedContract {
                name: MARKETPLACE_CONTRACT_NAME,
                args: vec![
                    PlanArg::Contract(TOKEN_CONTRACT_NAME),
                    PlanArg::Parameter(FEE_PARAM),
                    PlanArg::Parameter(PAYMENT_TOKENS_PARAM),
                ],
            });
        }

        Self {
            kind,
            module_name: MODULE_NAME,
            contracts,
        }
    }

    /// The plan variant
    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    /// The module name used to key the deployment record
    pub fn module_name(&self) -> &'static str {
        self.module_name
    }

    /// The contracts to deploy, in deployment order
    pub fn contracts(&self) -> &[PlannedContract] {
        &self.contracts
    }

    /// The names of the parameters the plan consumes, without duplicates
    pub fn required_parameters(&self) -> Vec<&'static str> {
        let mut params = Vec::new();
        for arg in self.contracts.iter().flat_map(|c| c.args.iter()) {
            if let PlanArg::Parameter(name) = arg {
                if !params.contains(name) {
                    params.push(*name);
                }
            }
        }

        params
    }

    /// Check that contract names are unique and that every contract-valued
    /// argument refers to a contract deployed earlier in the plan
    pub fn validate(&self) -> Result<(), ScriptError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.contracts.len());
        for contract in &self.contracts {
            for arg in &contract.args {
                if let PlanArg::Contract(dep) = arg {
                    if !seen.contains(dep) {
                        return Err(ScriptError::InvalidPlan(format!(
                            "{} depends on {}, which is not deployed before it",
                            contract.name, dep
                        )));
                    }
                }
            }

            if seen.contains(&contract.name) {
                return Err(ScriptError::InvalidPlan(format!(
                    "{} is declared more than once",
                    contract.name
                )));
            }
            seen.push(contract.name);
        }

        Ok(())
    }

    /// Check that every parameter the plan consumes is present
    pub fn check_parameters(&self, params: &DeploymentParameters) -> Result<(), ScriptError> {
        for name in self.required_parameters() {
            params.value(name)?;
        }

        Ok(())
    }

    /// Deploy the planned contracts in order, returning the resulting record.
    ///
    /// The plan and its parameters are fully checked before the first
    /// deployment is submitted.
    pub async fn execute<D: ContractDeployer + ?Sized>(
        &self,
        params: &DeploymentParameters,
        deployer: &D,
    ) -> Result<DeploymentRecord, ScriptError> {
        self.validate()?;
        self.check_parameters(params)?;

        let mut deployed: HashMap<&str, Address> = HashMap::new();
        let mut record = DeploymentRecord::new();
        for contract in &self.contracts {
            let args = contract
                .args
                .iter()
                .map(|arg| match arg {
                    PlanArg::Parameter(name) => params.value(name),
                    PlanArg::Contract(dep) => deployed
                        .get(dep)
                        .copied()
                        .map(DynSolValue::Address)
                        .ok_or_else(|| ScriptError::InvalidPlan(format!("{dep} not deployed"))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let constructor_args = DynSolValue::Tuple(args).abi_encode_params();

            info!("Deploying {}#{}", self.module_name, contract.name);
            let address = deployer
                .deploy(contract.name, constructor_args.into())
                .await?;
            info!("{} deployed at {:#x}", contract.name, address);

            deployed.insert(contract.name, address);
            record.insert(self.module_name, contract.name, address);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, U256};

    use super::*;

    #[test]
    fn test_token_only_plan() {
        let plan = DeploymentPlan::new(PlanKind::TokenOnly);
        assert_eq!(plan.kind(), PlanKind::TokenOnly);
        assert_eq!(plan.module_name(), MODULE_NAME);
        assert_eq!(plan.contracts().len(), 1);
        assert_eq!(
            plan.required_parameters(),
            vec![DEFAULT_ADMIN_PARAM, MINTER_PARAM]
        );
        plan.validate().unwrap();
    }

    #[test]
    fn test_marketplace_depends_on_token() {
        let plan = DeploymentPlan::new(PlanKind::TokenAndMarketplace);
        let names: Vec<_> = plan.contracts().iter().map(|c| c.name).collect();
        assert_eq!(names, vec![TOKEN_CONTRACT_NAME, MARKETPLACE_CONTRACT_NAME]);
        assert_eq!(
            plan.contracts()[1].args[0],
            PlanArg::Contract(TOKEN_CONTRACT_NAME)
        );
        plan.validate().unwrap();
    }

    #[test]
    fn test_out_of_order_plan_rejected() {
        let mut plan = DeploymentPlan::new(PlanKind::TokenAndMarketplace);
        plan.contracts.reverse();
        assert!(matches!(plan.validate(), Err(ScriptError::InvalidPlan(_))));
    }

    #[test]
    fn test_module_keyed_parameters() {
        let json = r#"{
            "OctoChestModule": {
                "defaultAdmin": "0x1111111111111111111111111111111111111111",
                "minter": "0x2222222222222222222222222222222222222222",
                "fee": 250,
                "paymentTokens": ["0x3333333333333333333333333333333333333333"]
            }
        }"#;
        let params = DeploymentParameters::from_json_str(json, MODULE_NAME).unwrap();

        assert_eq!(
            params.default_admin,
            Some(address!("1111111111111111111111111111111111111111"))
        );
        assert_eq!(params.fee, Some(U256::from(250)));
        assert_eq!(params.payment_tokens.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_flat_parameters_with_string_fee() {
        let json = r#"{
            "defaultAdmin": "0x1111111111111111111111111111111111111111",
            "minter": "0x2222222222222222222222222222222222222222",
            "fee": "0x64"
        }"#;
        let params = DeploymentParameters::from_json_str(json, MODULE_NAME).unwrap();
        assert_eq!(params.fee, Some(U256::from(100)));
        assert_eq!(params.payment_tokens, None);
    }

    #[test]
    fn test_missing_parameter() {
        let params = DeploymentParameters {
            default_admin: Some(Address::ZERO),
            minter: Some(Address::ZERO),
            ..Default::default()
        };

        DeploymentPlan::new(PlanKind::TokenOnly)
            .check_parameters(&params)
            .unwrap();
        let err = DeploymentPlan::new(PlanKind::TokenAndMarketplace)
            .check_parameters(&params)
            .unwrap_err();
        assert_eq!(err, ScriptError::MissingParameter(FEE_PARAM.to_string()));
    }
}
