//! The create-listing workflow

use alloy::primitives::{utils::parse_ether, TxHash, U256};
use tracing::info;

use crate::{
    constants::{MARKETPLACE_CONTRACT_NAME, MODULE_NAME, PRICE_DECIMALS, TOKEN_CONTRACT_NAME},
    contracts::{ChainClient, MarketplaceHandle, OctoChestHandle},
    deployments::AddressResolver,
    errors::ScriptError,
};

/// A single invocation of the create-listing task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingInvocation {
    /// The token to list
    pub token_id: U256,
    /// The price as a decimal string in the chain's native unit, e.g. `"0.1"`
    pub price: String,
}

/// The result of a completed listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOutcome {
    /// The listed token
    pub token_id: U256,
    /// The listing price in the chain's smallest native unit
    pub price: U256,
    /// The approval transaction hash
    pub approve_tx: TxHash,
    /// The listing transaction hash
    pub listing_tx: TxHash,
}

/// Convert a decimal price in the native unit into its smallest-unit amount
pub fn parse_price(price: &str) -> Result<U256, ScriptError> {
    let price = price.trim();
    if price.is_empty() {
        return Err(ScriptError::PriceParsing("empty price".to_string()));
    }
    if price.starts_with('-') {
        return Err(ScriptError::PriceParsing(format!(
            "price must not be negative: {price}"
        )));
    }

    // Plain decimals only, with no more fractional digits than the unit has
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let (whole, fraction) = match price.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (price, None),
    };
    let fraction_ok = fraction.is_none_or(|f| is_digits(f) && f.len() <= PRICE_DECIMALS);
    if !is_digits(whole) || !fraction_ok {
        return Err(ScriptError::PriceParsing(format!(
            "expected a decimal with at most {PRICE_DECIMALS} fractional digits: {price}"
        )));
    }

    parse_ether(price).map_err(|e| ScriptError::PriceParsing(format!("{price}: {e}")))
}

/// List a token on the marketplace deployed on `chain_id`.
///
/// Both contract addresses and the price are resolved before anything is
/// submitted. The marketplace is then approved for the token, and only once
/// that approval is confirmed is the listing created. If the listing fails,
/// the confirmed approval stays in place.
pub async fn create_listing<C: ChainClient + ?Sized>(
    client: &C,
    resolver: &AddressResolver,
    chain_id: u64,
    invocation: ListingInvocation,
) -> Result<ListingOutcome, ScriptError> {
    let marketplace_address =
        resolver.resolve(MODULE_NAME, MARKETPLACE_CONTRACT_NAME, chain_id)?;
    let token_address = resolver.resolve(MODULE_NAME, TOKEN_CONTRACT_NAME, chain_id)?;
    let price = parse_price(&invocation.price)?;
    let token_id = invocation.token_id;

    let token = OctoChestHandle::new(token_address, client);
    let marketplace = MarketplaceHandle::new(marketplace_address, client);

    let approve_receipt = token.approve(marketplace.address(), token_id).await?;
    info!("approve trx {:#x}", approve_receipt.tx_hash);

    let listing_receipt = marketplace.create_listing(token_id, price).await?;
    info!("listing created in {:#x}", listing_receipt.tx_hash);

    Ok(ListingOutcome {
        token_id,
        price,
        approve_tx: approve_receipt.tx_hash,
        listing_tx: listing_receipt.tx_hash,
    })
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::parse_price;
    use crate::errors::ScriptError;

    #[test]
    fn test_parse_price() {
        assert_eq!(
            parse_price("0.1").unwrap(),
            U256::from(100_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_price("2").unwrap(),
            U256::from(2_000_000_000_000_000_000u64)
        );
        assert_eq!(parse_price(" 0 ").unwrap(), U256::ZERO);
        assert_eq!(parse_price("0.000000000000000001").unwrap(), U256::from(1));
    }

    #[test]
    fn test_malformed_price() {
        for price in [
            "",
            "abc",
            "0.1.2",
            "-0.1",
            "1,5",
            "1_000",
            "1.",
            ".5",
            "0x10",
            "1e18",
            "0.0000000000000000001",
            "1.0000000000000000009",
        ] {
            assert!(
                matches!(parse_price(price), Err(ScriptError::PriceParsing(_))),
                "accepted {price:?}"
            );
        }
    }
}
