//! Test fixtures for ante stages.
//!
//! In-memory implementations of every collaborator trait in
//! `tollgate-core`, plus transaction builders. Intended as a
//! dev-dependency only.

mod feegrant;
mod ledger;
mod treasury;
mod tx;

pub use feegrant::{Allowance, MemFeeGrants};
pub use ledger::{LedgerOp, MemLedger};
pub use treasury::{FixedTaxCalculator, RateTaxCalculator, RecordingTreasury};
pub use tx::{NoFeeTx, TestTxBuilder};

pub use tollgate_types::test_utils::{test_address, test_coins, test_send_tx};
