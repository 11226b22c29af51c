//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use clap::ValueEnum;

/// The networks for which an Alchemy RPC endpoint can be derived
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// Ethereum mainnet
    Mainnet,
    /// Base mainnet
    Base,
    /// Arbitrum One
    Arbitrum,
    /// Optimism mainnet
    Optimism,
    /// Arbitrum Sepolia testnet
    ArbitrumSepolia,
}

impl Network {
    /// The Alchemy subdomain slug of the network
    pub fn alchemy_slug(&self) -> &'static str {
        match self {
            Network::Mainnet => "eth-mainnet",
            Network::Base => "base-mainnet",
            Network::Arbitrum => "arb-mainnet",
            Network::Optimism => "opt-mainnet",
            Network::ArbitrumSepolia => "arb-sepolia",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alchemy_slug())
    }
}

/// The deployment plan variants
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlanKind {
    /// Deploy only the token contract
    TokenOnly,
    /// Deploy the token contract, then the marketplace wired to it
    TokenAndMarketplace,
}

impl Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKind::TokenOnly => write!(f, "token-only"),
            PlanKind::TokenAndMarketplace => write!(f, "token-and-marketplace"),
        }
    }
}
