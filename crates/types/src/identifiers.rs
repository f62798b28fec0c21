//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Block height.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// Genesis block height.
    pub const GENESIS: Self = BlockHeight(0);

    /// Get the next block height.
    pub fn next(self) -> Self {
        BlockHeight(self.0 + 1)
    }

    /// Get the previous block height (returns None if at genesis).
    pub fn prev(self) -> Option<Self> {
        if self.0 > 0 {
            Some(BlockHeight(self.0 - 1))
        } else {
            None
        }
    }

    /// Whether this is the genesis height.
    ///
    /// Gas limits are not enforced at genesis, where gentxs are delivered
    /// without a meaningful gas budget.
    pub fn is_genesis(self) -> bool {
        self == Self::GENESIS
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.0)
    }
}

/// Mempool scheduling priority. Higher is included earlier.
pub type Priority = i64;

/// Priority of a transaction nobody set a priority for.
pub const DEFAULT_PRIORITY: Priority = 0;

/// Highest representable priority, given to fee-exempt transactions.
pub const MAX_PRIORITY: Priority = Priority::MAX;

/// A resolved ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account address.
    pub address: crate::Address,

    /// Ledger-assigned account number.
    pub account_number: u64,

    /// Next expected sequence.
    pub sequence: u64,
}

impl Account {
    /// Create a fresh account with sequence zero.
    pub fn new(address: crate::Address, account_number: u64) -> Self {
        Self {
            address,
            account_number,
            sequence: 0,
        }
    }
}
