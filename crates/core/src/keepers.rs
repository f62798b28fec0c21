//! Collaborator interfaces consumed by ante stages.
//!
//! Storage, allowance bookkeeping and tax policy live outside the ante
//! pipeline. Stages see them only through these traits, held as
//! `Arc<dyn ...>` so a node can share one store between many concurrent
//! validation attempts. Isolation between attempts is the store's job.

use crate::{KeeperError, ValidationContext};
use tollgate_types::{Account, Address, Coins, Decimal, Message};

/// Account lookup.
pub trait AccountKeeper: Send + Sync {
    /// The account at `address`, if it exists.
    fn account(&self, ctx: &ValidationContext, address: &Address) -> Option<Account>;

    /// The address of the module account registered as `name`.
    fn module_address(&self, name: &str) -> Option<Address>;
}

/// Coin movement and minting.
///
/// Every transfer validates its amount first and fails with
/// [`KeeperError::InvalidCoins`] on a malformed set.
pub trait BankKeeper: Send + Sync {
    /// Move `amount` from a user account into a module account.
    fn send_coins_from_account_to_module(
        &self,
        ctx: &ValidationContext,
        from: &Address,
        to_module: &str,
        amount: &Coins,
    ) -> Result<(), KeeperError>;

    /// Move `amount` from a module account to a user account.
    fn send_coins_from_module_to_account(
        &self,
        ctx: &ValidationContext,
        from_module: &str,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), KeeperError>;

    /// Move `amount` between two module accounts.
    fn send_coins_from_module_to_module(
        &self,
        ctx: &ValidationContext,
        from_module: &str,
        to_module: &str,
        amount: &Coins,
    ) -> Result<(), KeeperError>;

    /// Create `amount` in the module account `module`.
    fn mint_coins(
        &self,
        ctx: &ValidationContext,
        module: &str,
        amount: &Coins,
    ) -> Result<(), KeeperError>;
}

/// Delegated fee payment.
pub trait FeeGrantKeeper: Send + Sync {
    /// Check that `granter` lets `grantee` spend `fee` on `messages`, and
    /// consume that much of the allowance.
    fn use_granted_fees(
        &self,
        ctx: &ValidationContext,
        granter: &Address,
        grantee: &Address,
        fee: &Coins,
        messages: &[Message],
    ) -> Result<(), KeeperError>;
}

/// Tax settlement.
pub trait TreasuryKeeper: Send + Sync {
    /// Share of collected tax kept for distribution; the rest is burned.
    fn burn_split_rate(&self, ctx: &ValidationContext) -> Decimal;

    /// Add `taxes` to this epoch's proceeds.
    fn record_epoch_tax_proceeds(
        &self,
        ctx: &ValidationContext,
        taxes: &Coins,
    ) -> Result<(), KeeperError>;
}

/// Tax policy.
pub trait TaxCalculator: Send + Sync {
    /// Tax owed on `messages`.
    fn compute_tax(&self, ctx: &ValidationContext, simulate: bool, messages: &[Message]) -> Coins;
}
