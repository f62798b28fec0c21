//! Staking module parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default unbonding period: three weeks.
pub const DEFAULT_UNBONDING_TIME_SECS: u64 = 60 * 60 * 24 * 7 * 3;

/// Default size of the active validator set.
pub const DEFAULT_MAX_VALIDATORS: u32 = 100;

/// Default cap on unbonding and redelegation entries per pair.
pub const DEFAULT_MAX_ENTRIES: u32 = 7;

/// Default number of historical info entries kept.
pub const DEFAULT_HISTORICAL_ENTRIES: u32 = 10_000;

/// Default bond denomination.
pub const DEFAULT_BOND_DENOM: &str = "stake";

/// Parameters of the staking module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingParams {
    /// Seconds a delegation stays locked after unbonding starts.
    pub unbonding_time_secs: u64,

    /// Maximum number of bonded validators.
    pub max_validators: u32,

    /// Maximum concurrent unbonding or redelegation entries.
    pub max_entries: u32,

    /// Historical info entries to keep.
    pub historical_entries: u32,

    /// Denomination that can be bonded.
    pub bond_denom: String,

    /// Lowest commission rate a validator may set.
    pub min_commission_rate: Decimal,
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            unbonding_time_secs: DEFAULT_UNBONDING_TIME_SECS,
            max_validators: DEFAULT_MAX_VALIDATORS,
            max_entries: DEFAULT_MAX_ENTRIES,
            historical_entries: DEFAULT_HISTORICAL_ENTRIES,
            bond_denom: DEFAULT_BOND_DENOM.to_string(),
            min_commission_rate: Decimal::ZERO,
        }
    }
}

impl StakingParams {
    /// Set the bond denomination.
    pub fn with_bond_denom(mut self, denom: impl Into<String>) -> Self {
        self.bond_denom = denom.into();
        self
    }

    /// Set the maximum number of validators.
    pub fn with_max_validators(mut self, max_validators: u32) -> Self {
        self.max_validators = max_validators;
        self
    }

    /// Set the minimum commission rate.
    pub fn with_min_commission_rate(mut self, rate: Decimal) -> Self {
        self.min_commission_rate = rate;
        self
    }
}
