//! Configuration for fee enforcement.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tollgate_core::ValidationContext;
use tollgate_types::{
    BlockHeight, DecCoins, BURN_MODULE_NAME, FEE_COLLECTOR_NAME, MINT_MODULE_NAME,
    MSG_AGGREGATE_EXCHANGE_RATE_PREVOTE, MSG_AGGREGATE_EXCHANGE_RATE_VOTE,
};

/// Errors loading a [`FeeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed.
    #[error("Invalid fee config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the fee decorator.
///
/// Module names must match the module accounts registered with the ledger.
/// Every field has a default, so a config file only lists what it changes:
///
/// ```toml
/// min_gas_prices = "0.15uluna,0.2uusd"
/// burn_module = "burn"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Module account fees are deducted into.
    pub fee_collector: String,

    /// Module account that mints simulation top-ups.
    pub mint_module: String,

    /// Module account the burned share of tax goes to.
    pub burn_module: String,

    /// Message types that skip the gas price check and get maximum priority.
    ///
    /// A transaction is exempt only if every message is of one of these
    /// types.
    pub exempt_message_types: Vec<String>,

    /// This node's minimum price per unit of gas, applied during check-tx.
    pub min_gas_prices: DecCoins,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            fee_collector: FEE_COLLECTOR_NAME.to_string(),
            mint_module: MINT_MODULE_NAME.to_string(),
            burn_module: BURN_MODULE_NAME.to_string(),
            exempt_message_types: vec![
                MSG_AGGREGATE_EXCHANGE_RATE_PREVOTE.to_string(),
                MSG_AGGREGATE_EXCHANGE_RATE_VOTE.to_string(),
            ],
            min_gas_prices: DecCoins::empty(),
        }
    }
}

impl FeeConfig {
    /// Parse a config from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Set the fee collector module name.
    pub fn with_fee_collector(mut self, name: impl Into<String>) -> Self {
        self.fee_collector = name.into();
        self
    }

    /// Set the mint module name.
    pub fn with_mint_module(mut self, name: impl Into<String>) -> Self {
        self.mint_module = name.into();
        self
    }

    /// Set the burn module name.
    pub fn with_burn_module(mut self, name: impl Into<String>) -> Self {
        self.burn_module = name.into();
        self
    }

    /// Replace the exempt message types.
    pub fn with_exempt_message_types(mut self, types: Vec<String>) -> Self {
        self.exempt_message_types = types;
        self
    }

    /// Set the minimum gas prices.
    pub fn with_min_gas_prices(mut self, prices: DecCoins) -> Self {
        self.min_gas_prices = prices;
        self
    }

    /// A fresh check-tx context carrying this node's minimum gas prices.
    pub fn check_tx_context(&self, block_height: BlockHeight) -> ValidationContext {
        ValidationContext::check_tx(block_height, self.min_gas_prices.clone())
    }
}
