//! Ante pipeline plumbing.
//!
//! Defines the per-transaction [`ValidationContext`], the
//! [`AnteDecorator`]/[`AnteHandler`] pair that stages implement, the
//! collaborator traits stages call out to, and the error types they return.

mod context;
mod error;
mod keepers;
mod traits;

pub use context::ValidationContext;
pub use error::{
    AnteError, KeeperError, CODE_INSUFFICIENT_FEE, CODE_INSUFFICIENT_FUNDS, CODE_INTERNAL,
    CODE_INVALID_COINS, CODE_INVALID_GAS_LIMIT, CODE_INVALID_REQUEST, CODE_TX_DECODE,
    CODE_UNAUTHORIZED, CODE_UNKNOWN_ADDRESS,
};
pub use keepers::{AccountKeeper, BankKeeper, FeeGrantKeeper, TaxCalculator, TreasuryKeeper};
pub use traits::{AnteChain, AnteDecorator, AnteHandler, Terminator};
