//! Fee and stability tax enforcement.
//!
//! [`FeeDecorator`] is the ante stage that decides whether a transaction
//! pays enough for its gas and tax, charges the right account, and assigns
//! the transaction a mempool priority. The pieces it is built from are
//! exported for reuse by other stages and tools:
//!
//! - [`check_tx_fee`], [`get_tx_priority`] and [`required_gas_fees`] for
//!   fee sufficiency and priority,
//! - [`simulation_fees`] and [`deduct_fees`] for charging,
//! - [`burn_tax_split`] for settling collected tax.

mod burn;
mod config;
mod decorator;
mod deduct;
mod priority;

pub use burn::{burn_tax_split, distribution_share};
pub use config::{ConfigError, FeeConfig};
pub use decorator::FeeDecorator;
pub use deduct::{deduct_fees, simulation_fees};
pub use priority::{check_tx_fee, get_tx_priority, is_exempt, required_gas_fees};
