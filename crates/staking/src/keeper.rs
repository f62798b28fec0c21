//! Staking keeper with versioned parameter reads.

use crate::loader::{LegacyParamSource, ParamStore, VersionedParamLoader, PARAMS_KEY};
use crate::{StakingError, StakingParams};
use std::fmt;
use std::sync::Arc;
use tollgate_core::AccountKeeper;
use tollgate_types::Address;
use tracing::debug;

/// Module account holding bonded stake.
pub const BONDED_POOL_NAME: &str = "bonded_tokens_pool";

/// Module account holding stake that is not bonded.
pub const NOT_BONDED_POOL_NAME: &str = "not_bonded_tokens_pool";

/// Tokens per unit of consensus power.
pub const DEFAULT_POWER_REDUCTION: u128 = 1_000_000;

/// Key of the last total bonded power in the staking module store.
pub const LAST_TOTAL_POWER_KEY: &[u8] = &[0x12];

/// Operations of a staking keeper that the wrapper forwards.
pub trait BaseStakingKeeper: Send + Sync {
    /// Current parameters.
    fn params(&self) -> Result<StakingParams, StakingError>;

    /// Replace the parameters.
    fn set_params(&self, params: &StakingParams) -> Result<(), StakingError>;

    /// Denomination that can be bonded.
    fn bond_denom(&self) -> Result<String, StakingError> {
        Ok(self.params()?.bond_denom)
    }

    /// Tokens per unit of consensus power.
    fn power_reduction(&self) -> u128;

    /// Total bonded power at the end of the last block.
    fn last_total_power(&self) -> Result<u128, StakingError>;

    /// The module's own store.
    fn param_store(&self) -> &dyn ParamStore;
}

/// Store-backed staking keeper. Reads parameters from the module store only.
pub struct BaseKeeper {
    store: Arc<dyn ParamStore>,
    power_reduction: u128,
}

impl BaseKeeper {
    /// Keeper over `store` with the default power reduction.
    pub fn new(store: Arc<dyn ParamStore>) -> Self {
        Self {
            store,
            power_reduction: DEFAULT_POWER_REDUCTION,
        }
    }

    /// Override the power reduction.
    pub fn with_power_reduction(mut self, power_reduction: u128) -> Self {
        self.power_reduction = power_reduction;
        self
    }

    /// Record the total bonded power.
    pub fn set_last_total_power(&self, power: u128) -> Result<(), StakingError> {
        let bytes = serde_json::to_vec(&power).map_err(|source| StakingError::Encode {
            what: "last total power",
            source,
        })?;
        self.store.set(LAST_TOTAL_POWER_KEY, bytes);
        Ok(())
    }
}

impl fmt::Debug for BaseKeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseKeeper")
            .field("power_reduction", &self.power_reduction)
            .finish_non_exhaustive()
    }
}

impl BaseStakingKeeper for BaseKeeper {
    fn params(&self) -> Result<StakingParams, StakingError> {
        match self.store.get(PARAMS_KEY) {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| StakingError::Decode {
                what: "params",
                source,
            }),
            None => Ok(StakingParams::default()),
        }
    }

    fn set_params(&self, params: &StakingParams) -> Result<(), StakingError> {
        let bytes = serde_json::to_vec(params).map_err(|source| StakingError::Encode {
            what: "params",
            source,
        })?;
        self.store.set(PARAMS_KEY, bytes);
        Ok(())
    }

    fn power_reduction(&self) -> u128 {
        self.power_reduction
    }

    fn last_total_power(&self) -> Result<u128, StakingError> {
        match self.store.get(LAST_TOTAL_POWER_KEY) {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| StakingError::Decode {
                what: "last total power",
                source,
            }),
            None => Ok(0),
        }
    }

    fn param_store(&self) -> &dyn ParamStore {
        self.store.as_ref()
    }
}

/// Staking keeper that reads parameters from the module store and falls
/// back to the legacy parameter store on chains that have not migrated.
///
/// Everything except [`params`](Self::params) is forwarded to the wrapped
/// keeper unchanged.
pub struct StakingKeeper<K> {
    base: K,
    legacy: Arc<dyn LegacyParamSource<StakingParams>>,
    authority: Address,
}

impl<K: BaseStakingKeeper> StakingKeeper<K> {
    /// Wrap `base`.
    ///
    /// Fails if either staking pool module account is missing, if
    /// `legacy_subspaces` does not hold exactly one source, or if
    /// `authority` is not an address.
    pub fn new(
        base: K,
        account_keeper: &dyn AccountKeeper,
        authority: &str,
        mut legacy_subspaces: Vec<Arc<dyn LegacyParamSource<StakingParams>>>,
    ) -> Result<Self, StakingError> {
        for pool in [BONDED_POOL_NAME, NOT_BONDED_POOL_NAME] {
            if account_keeper.module_address(pool).is_none() {
                return Err(StakingError::MissingModuleAccount(pool));
            }
        }

        if legacy_subspaces.len() != 1 {
            return Err(StakingError::LegacySubspaceCount(legacy_subspaces.len()));
        }
        let legacy = legacy_subspaces.remove(0);

        let authority: Address = authority
            .parse()
            .map_err(|_| StakingError::InvalidAuthority(authority.to_string()))?;

        debug!(%authority, "Staking keeper ready");
        Ok(Self {
            base,
            legacy,
            authority,
        })
    }

    /// The wrapped keeper.
    pub fn base(&self) -> &K {
        &self.base
    }

    /// Address allowed to change parameters.
    pub fn authority(&self) -> Address {
        self.authority
    }

    /// Current parameters, from the module store or the legacy store.
    pub fn params(&self) -> Result<StakingParams, StakingError> {
        VersionedParamLoader::new(self.base.param_store(), PARAMS_KEY, self.legacy.as_ref()).load()
    }

    /// Replace the parameters in the module store.
    pub fn set_params(&self, params: &StakingParams) -> Result<(), StakingError> {
        self.base.set_params(params)
    }

    /// Denomination that can be bonded.
    pub fn bond_denom(&self) -> Result<String, StakingError> {
        self.base.bond_denom()
    }

    /// Tokens per unit of consensus power.
    pub fn power_reduction(&self) -> u128 {
        self.base.power_reduction()
    }

    /// Total bonded power at the end of the last block.
    pub fn last_total_power(&self) -> Result<u128, StakingError> {
        self.base.last_total_power()
    }
}

impl<K: fmt::Debug> fmt::Debug for StakingKeeper<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StakingKeeper")
            .field("base", &self.base)
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}
