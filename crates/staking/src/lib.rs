//! Staking keeper wrapper with versioned parameter storage.
//!
//! Staking parameters moved from the shared legacy parameter store into the
//! staking module's own store. [`StakingKeeper`] reads the new location and
//! falls back to the legacy one on chains that have not migrated yet.

mod error;
mod keeper;
mod loader;
mod params;

pub use error::StakingError;
pub use keeper::{
    BaseKeeper, BaseStakingKeeper, StakingKeeper, BONDED_POOL_NAME, DEFAULT_POWER_REDUCTION,
    LAST_TOTAL_POWER_KEY, NOT_BONDED_POOL_NAME,
};
pub use loader::{
    LegacyParamSource, MemParamStore, ParamStore, StaticLegacySource, VersionedParamLoader,
    PARAMS_KEY,
};
pub use params::{
    StakingParams, DEFAULT_BOND_DENOM, DEFAULT_HISTORICAL_ENTRIES, DEFAULT_MAX_ENTRIES,
    DEFAULT_MAX_VALIDATORS, DEFAULT_UNBONDING_TIME_SECS,
};
