//! The operator task workflows.
//!
//! Each workflow resolves its contracts through an [`AddressResolver`] for an
//! explicit chain id, checks its inputs, and then submits its transactions
//! strictly one after another, awaiting each confirmation before the next
//! step. A failure after a confirmed step is surfaced as-is; confirmed steps
//! are never undone.
//!
//! [`AddressResolver`]: crate::deployments::AddressResolver

pub mod listing;
pub mod mint;

pub use listing::{create_listing, parse_price, ListingInvocation, ListingOutcome};
pub use mint::{mint, MintEntryPoint, MintInvocation, MintOutcome, MintTaskKind};
