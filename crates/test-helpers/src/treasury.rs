//! Treasury and tax policy fixtures.

use parking_lot::Mutex;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tollgate_core::{KeeperError, TaxCalculator, TreasuryKeeper, ValidationContext};
use tollgate_types::{Coin, Coins, Message};

/// A treasury with a fixed burn split rate that records every proceeds call.
pub struct RecordingTreasury {
    burn_split_rate: Decimal,
    recorded: Mutex<Vec<Coins>>,
    fail_recording: Mutex<bool>,
}

impl RecordingTreasury {
    /// A treasury keeping `burn_split_rate` of tax for distribution.
    pub fn new(burn_split_rate: Decimal) -> Self {
        Self {
            burn_split_rate,
            recorded: Mutex::new(Vec::new()),
            fail_recording: Mutex::new(false),
        }
    }

    /// Every amount passed to `record_epoch_tax_proceeds`, in order.
    pub fn recorded(&self) -> Vec<Coins> {
        self.recorded.lock().clone()
    }

    /// Make `record_epoch_tax_proceeds` fail.
    pub fn fail_recording(&self) {
        *self.fail_recording.lock() = true;
    }
}

impl Default for RecordingTreasury {
    fn default() -> Self {
        Self::new(Decimal::ZERO)
    }
}

impl TreasuryKeeper for RecordingTreasury {
    fn burn_split_rate(&self, _ctx: &ValidationContext) -> Decimal {
        self.burn_split_rate
    }

    fn record_epoch_tax_proceeds(
        &self,
        _ctx: &ValidationContext,
        taxes: &Coins,
    ) -> Result<(), KeeperError> {
        if *self.fail_recording.lock() {
            return Err(KeeperError::Store("epoch proceeds unavailable".into()));
        }
        self.recorded.lock().push(taxes.clone());
        Ok(())
    }
}

/// Charges the same tax on every transaction and counts calls.
#[derive(Default)]
pub struct FixedTaxCalculator {
    tax: Coins,
    calls: Mutex<Vec<bool>>,
}

impl FixedTaxCalculator {
    /// Always return `tax`.
    pub fn new(tax: Coins) -> Self {
        Self {
            tax,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The simulate flag of each call, in order.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().clone()
    }
}

impl TaxCalculator for FixedTaxCalculator {
    fn compute_tax(
        &self,
        _ctx: &ValidationContext,
        simulate: bool,
        _messages: &[Message],
    ) -> Coins {
        self.calls.lock().push(simulate);
        self.tax.clone()
    }
}

/// Charges `rate` of the funds each message moves, truncated, capped per
/// denomination.
pub struct RateTaxCalculator {
    rate: Decimal,
    cap: Option<u128>,
}

impl RateTaxCalculator {
    /// Tax `rate` of moved funds with no cap.
    pub fn new(rate: Decimal) -> Self {
        Self { rate, cap: None }
    }

    /// Cap the tax on each coin at `cap`.
    pub fn with_cap(mut self, cap: u128) -> Self {
        self.cap = Some(cap);
        self
    }

    fn tax_on(&self, coin: &Coin) -> u128 {
        let tax = Decimal::from_u128(coin.amount)
            .and_then(|amount| amount.checked_mul(self.rate))
            .and_then(|tax| tax.trunc().to_u128())
            .unwrap_or(u128::MAX);
        match self.cap {
            Some(cap) => tax.min(cap),
            None => tax,
        }
    }
}

impl TaxCalculator for RateTaxCalculator {
    fn compute_tax(
        &self,
        _ctx: &ValidationContext,
        _simulate: bool,
        messages: &[Message],
    ) -> Coins {
        messages
            .iter()
            .flat_map(|m| m.funds.iter())
            .fold(Coins::empty(), |total, coin| {
                let tax = Coin::new(coin.denom.clone(), self.tax_on(coin));
                total.checked_add_coin(&tax).unwrap_or(total)
            })
    }
}
