//! In-memory accounts and balances.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tollgate_core::{AccountKeeper, BankKeeper, KeeperError, ValidationContext};
use tollgate_types::{
    Account, Address, Coins, BURN_MODULE_NAME, FEE_COLLECTOR_NAME, MINT_MODULE_NAME,
};

/// A ledger operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerOp {
    /// [`BankKeeper::mint_coins`].
    Mint,
    /// [`BankKeeper::send_coins_from_account_to_module`].
    AccountToModule,
    /// [`BankKeeper::send_coins_from_module_to_account`].
    ModuleToAccount,
    /// [`BankKeeper::send_coins_from_module_to_module`].
    ModuleToModule,
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Address, Account>,
    balances: HashMap<Address, Coins>,
    modules: HashMap<String, Address>,
    supply: Coins,
    next_account_number: u64,
    mutations: usize,
    failing: HashSet<LedgerOp>,
}

impl LedgerState {
    fn ensure_account(&mut self, address: Address) -> Account {
        if let Some(account) = self.accounts.get(&address) {
            return account.clone();
        }
        let account = Account::new(address, self.next_account_number);
        self.next_account_number += 1;
        self.accounts.insert(address, account.clone());
        account
    }

    fn module(&self, name: &str) -> Result<Address, KeeperError> {
        self.modules
            .get(name)
            .copied()
            .ok_or_else(|| KeeperError::UnknownModuleAccount(name.to_string()))
    }

    fn check_failure(&self, op: LedgerOp) -> Result<(), KeeperError> {
        if self.failing.contains(&op) {
            return Err(KeeperError::Store(format!("injected {:?} failure", op)));
        }
        Ok(())
    }

    fn credit(&mut self, to: Address, amount: &Coins) -> Result<(), KeeperError> {
        self.ensure_account(to);
        let balance = self.balances.entry(to).or_default();
        *balance = balance.checked_add(amount)?;
        Ok(())
    }

    fn transfer(
        &mut self,
        op: LedgerOp,
        from: Address,
        to: Address,
        amount: &Coins,
    ) -> Result<(), KeeperError> {
        amount.validate()?;
        self.check_failure(op)?;

        let available = self.balances.get(&from).cloned().unwrap_or_default();
        if !available.is_all_gte(amount) {
            return Err(KeeperError::InsufficientFunds {
                address: from,
                available,
                required: amount.clone(),
            });
        }
        self.balances.insert(from, available.saturating_sub(amount));
        self.credit(to, amount)?;
        self.mutations += 1;
        Ok(())
    }
}

/// A ledger held in memory, implementing [`AccountKeeper`] and
/// [`BankKeeper`].
///
/// Every successful transfer or mint bumps a mutation counter so tests can
/// assert that a rejected transaction touched nothing.
#[derive(Default)]
pub struct MemLedger {
    state: Mutex<LedgerState>,
}

impl MemLedger {
    /// An empty ledger with no module accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger with the fee collector, mint and burn module accounts.
    pub fn standard() -> Self {
        Self::new().with_modules(&[FEE_COLLECTOR_NAME, MINT_MODULE_NAME, BURN_MODULE_NAME])
    }

    /// Register module accounts at their derived addresses.
    pub fn with_modules(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock();
            for name in names {
                let address = Address::module(name);
                state.ensure_account(address);
                state.modules.insert(name.to_string(), address);
            }
        }
        self
    }

    /// Forget a module account registration. Its balance is kept.
    pub fn remove_module(&self, name: &str) {
        self.state.lock().modules.remove(name);
    }

    /// Create an empty account if none exists at `address`.
    pub fn add_account(&self, address: Address) -> Account {
        self.state.lock().ensure_account(address)
    }

    /// Credit `amount` to `address`, creating the account if needed.
    ///
    /// Funding is setup, not a ledger mutation, and is not counted.
    pub fn fund(&self, address: Address, amount: &Coins) {
        let mut state = self.state.lock();
        if let Err(e) = state.credit(address, amount) {
            panic!("funding {} with {} failed: {}", address, amount, e);
        }
    }

    /// Balance of `address`.
    pub fn balance(&self, address: &Address) -> Coins {
        self.state
            .lock()
            .balances
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    /// Balance of the module account derived from `name`.
    pub fn module_balance(&self, name: &str) -> Coins {
        self.balance(&Address::module(name))
    }

    /// Total amount minted so far.
    pub fn supply(&self) -> Coins {
        self.state.lock().supply.clone()
    }

    /// Number of successful transfers and mints.
    pub fn mutations(&self) -> usize {
        self.state.lock().mutations
    }

    /// Make every future `op` fail with a store error.
    pub fn fail_on(&self, op: LedgerOp) {
        self.state.lock().failing.insert(op);
    }
}

impl AccountKeeper for MemLedger {
    fn account(&self, _ctx: &ValidationContext, address: &Address) -> Option<Account> {
        self.state.lock().accounts.get(address).cloned()
    }

    fn module_address(&self, name: &str) -> Option<Address> {
        self.state.lock().modules.get(name).copied()
    }
}

impl BankKeeper for MemLedger {
    fn send_coins_from_account_to_module(
        &self,
        _ctx: &ValidationContext,
        from: &Address,
        to_module: &str,
        amount: &Coins,
    ) -> Result<(), KeeperError> {
        let mut state = self.state.lock();
        let to = state.module(to_module)?;
        state.transfer(LedgerOp::AccountToModule, *from, to, amount)
    }

    fn send_coins_from_module_to_account(
        &self,
        _ctx: &ValidationContext,
        from_module: &str,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), KeeperError> {
        let mut state = self.state.lock();
        let from = state.module(from_module)?;
        state.transfer(LedgerOp::ModuleToAccount, from, *to, amount)
    }

    fn send_coins_from_module_to_module(
        &self,
        _ctx: &ValidationContext,
        from_module: &str,
        to_module: &str,
        amount: &Coins,
    ) -> Result<(), KeeperError> {
        let mut state = self.state.lock();
        let from = state.module(from_module)?;
        let to = state.module(to_module)?;
        state.transfer(LedgerOp::ModuleToModule, from, to, amount)
    }

    fn mint_coins(
        &self,
        _ctx: &ValidationContext,
        module: &str,
        amount: &Coins,
    ) -> Result<(), KeeperError> {
        let mut state = self.state.lock();
        amount.validate()?;
        state.check_failure(LedgerOp::Mint)?;
        let to = state.module(module)?;
        state.supply = state.supply.checked_add(amount)?;
        state.credit(to, amount)?;
        state.mutations += 1;
        Ok(())
    }
}
