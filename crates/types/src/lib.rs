//! Core types for the fee and tax ante stage.
//!
//! Everything the stage reads or produces is defined here: coin sets and
//! gas-price schedules, addresses, messages, the transaction capability
//! traits, and the event log.

mod address;
mod coin;
mod dec_coin;
mod event;
mod identifiers;
mod message;
mod transaction;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use address::{
    Address, AddressError, BURN_MODULE_NAME, FEE_COLLECTOR_NAME, MINT_MODULE_NAME,
};
pub use coin::{validate_denom, Amount, Coin, Coins, CoinsError};
pub use dec_coin::{DecCoin, DecCoins};
pub use event::{
    Attribute, Event, EventManager, ATTRIBUTE_KEY_FEE, ATTRIBUTE_KEY_FEE_PAYER, EVENT_TYPE_TX,
};
pub use identifiers::{Account, BlockHeight, Priority, DEFAULT_PRIORITY, MAX_PRIORITY};
pub use message::{
    Message, MSG_AGGREGATE_EXCHANGE_RATE_PREVOTE, MSG_AGGREGATE_EXCHANGE_RATE_VOTE, MSG_SEND,
};
pub use transaction::{Fee, FeeTx, StdTx, Tx};

/// Re-export of the decimal type used for prices and rates.
pub use rust_decimal::Decimal;
