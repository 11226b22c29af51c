//! The mint workflow

use alloy::primitives::{Address, TxHash};
use tracing::info;

use crate::{
    constants::{LEVEL_1, LEVEL_2, MODULE_NAME, TOKEN_CONTRACT_NAME},
    contracts::{ChainClient, OctoChestHandle},
    deployments::AddressResolver,
    errors::ScriptError,
};

/// The shape of the token contract being minted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintTaskKind {
    /// Per-level mint entry points, callable by holders of the minter role
    Leveled {
        /// The requested level
        level: u64,
    },
    /// A single mint entry point without levels
    Simple,
}

impl MintTaskKind {
    /// Select the task shape from an optional level argument
    pub fn from_level(level: Option<u64>) -> Self {
        match level {
            Some(level) => MintTaskKind::Leveled { level },
            None => MintTaskKind::Simple,
        }
    }

    /// Whether the contract takes a level parameter
    pub fn has_level_parameter(&self) -> bool {
        matches!(self, MintTaskKind::Leveled { .. })
    }

    /// The requested level, if the contract takes one
    pub fn level(&self) -> Option<u64> {
        match self {
            MintTaskKind::Leveled { level } => Some(*level),
            MintTaskKind::Simple => None,
        }
    }

    /// The mint entry point to dispatch to, or `None` for a level that
    /// cannot be minted
    pub fn entry_point(&self) -> Option<MintEntryPoint> {
        match self {
            MintTaskKind::Leveled { level: LEVEL_1 } => Some(MintEntryPoint::Level1),
            MintTaskKind::Leveled { level: LEVEL_2 } => Some(MintEntryPoint::Level2),
            MintTaskKind::Leveled { .. } => None,
            MintTaskKind::Simple => Some(MintEntryPoint::Unleveled),
        }
    }
}

/// The token contract's mint entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintEntryPoint {
    /// `safeMintLevel1`
    Level1,
    /// `safeMintLevel2`
    Level2,
    /// `safeMint`
    Unleveled,
}

/// A single invocation of the mint task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintInvocation {
    /// The recipient of the minted token
    pub to: Address,
    /// The contract shape, carrying the level when there is one
    pub kind: MintTaskKind,
}

/// The result of a mint task that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintOutcome {
    /// A token was minted
    Minted {
        /// The recipient
        to: Address,
        /// The minted level, if the contract has levels
        level: Option<u64>,
        /// Whether the minter role had to be granted to the signer first
        role_granted: bool,
        /// The mint transaction hash
        tx_hash: TxHash,
    },
    /// The requested level cannot be minted; nothing was submitted
    InvalidLevel {
        /// The rejected level
        level: u64,
    },
}

/// Mint a token on the token contract deployed on `chain_id`.
///
/// For leveled contracts the level is checked first: a level other than 1 or
/// 2 is reported and the task ends without touching the chain. The signer is
/// then granted the minter role if it does not hold it yet, and the mint is
/// dispatched to the entry point for the level.
pub async fn mint<C: ChainClient + ?Sized>(
    client: &C,
    resolver: &AddressResolver,
    chain_id: u64,
    invocation: MintInvocation,
) -> Result<MintOutcome, ScriptError> {
    let MintInvocation { to, kind } = invocation;

    let token_address = resolver.resolve(MODULE_NAME, TOKEN_CONTRACT_NAME, chain_id)?;
    let token = OctoChestHandle::new(token_address, client);

    let Some(entry_point) = kind.entry_point() else {
        let level = kind.level().unwrap_or_default();
        info!("Not possible to mint level {level}");
        return Ok(MintOutcome::InvalidLevel { level });
    };

    let role_granted = if kind.has_level_parameter() {
        ensure_minter_role(&token, client.signer_address()).await?
    } else {
        false
    };

    let receipt = match entry_point {
        MintEntryPoint::Level1 => token.safe_mint_level1(to).await?,
        MintEntryPoint::Level2 => token.safe_mint_level2(to).await?,
        MintEntryPoint::Unleveled => token.safe_mint(to).await?,
    };
    info!("Token successfully minted to {to:#x}");
    info!("transaction {:#x}", receipt.tx_hash);

    Ok(MintOutcome::Minted {
        to,
        level: kind.level(),
        role_granted,
        tx_hash: receipt.tx_hash,
    })
}

/// Grant the minter role to `signer` unless it already holds it, awaiting
/// the grant's confirmation. Returns whether a grant was submitted.
async fn ensure_minter_role<C: ChainClient + ?Sized>(
    token: &OctoChestHandle<'_, C>,
    signer: Address,
) -> Result<bool, ScriptError> {
    let minter_role = token.minter_role().await?;
    if token.has_role(minter_role, signer).await? {
        return Ok(false);
    }

    info!("Account is not minter. Grant Minter rights");
    let receipt = token.grant_role(minter_role, signer).await?;
    info!("grant role transaction {:#x}", receipt.tx_hash);

    Ok(true)
}
