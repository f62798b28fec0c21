//! Versioned parameter loading.
//!
//! Parameters used to live in a separate legacy parameter store and now live
//! under a fixed key in the module's own store. A chain upgraded in place
//! may still have only the legacy copy, so reads try the module store first
//! and fall back to the legacy store only when the key is entirely absent.
//! The two sources are never merged.

use crate::StakingError;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

/// Key of the parameter record in the staking module store.
pub const PARAMS_KEY: &[u8] = &[0x51];

/// Byte-level key/value store of one module.
pub trait ParamStore: Send + Sync {
    /// Bytes under `key`, if present.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Store `value` under `key`.
    fn set(&self, key: &[u8], value: Vec<u8>);
}

/// The pre-upgrade home of a parameter set.
pub trait LegacyParamSource<T>: Send + Sync {
    /// The whole legacy parameter set, if one was ever written.
    fn param_set(&self) -> Option<T>;
}

/// A [`ParamStore`] held in memory.
#[derive(Debug, Default)]
pub struct MemParamStore {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemParamStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParamStore for MemParamStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &[u8], value: Vec<u8>) {
        self.entries.write().insert(key.to_vec(), value);
    }
}

/// A legacy source that always returns the same set, or nothing.
#[derive(Debug, Clone, Default)]
pub struct StaticLegacySource<T> {
    params: Option<T>,
}

impl<T> StaticLegacySource<T> {
    /// A source holding `params`.
    pub fn new(params: T) -> Self {
        Self {
            params: Some(params),
        }
    }

    /// A source that was never written.
    pub fn empty() -> Self {
        Self { params: None }
    }
}

impl<T: Clone + Send + Sync> LegacyParamSource<T> for StaticLegacySource<T> {
    fn param_set(&self) -> Option<T> {
        self.params.clone()
    }
}

/// Reads a parameter set from its current location, falling back to the
/// legacy source.
///
/// - primary key present: decode it; undecodable bytes are an error, not a
///   reason to fall back,
/// - primary key absent: the legacy set if it exists,
/// - neither: `T::default()`.
pub struct VersionedParamLoader<'a, T> {
    store: &'a dyn ParamStore,
    key: &'a [u8],
    legacy: &'a dyn LegacyParamSource<T>,
}

impl<'a, T> VersionedParamLoader<'a, T>
where
    T: DeserializeOwned + Default,
{
    /// Loader reading `key` from `store`, falling back to `legacy`.
    pub fn new(
        store: &'a dyn ParamStore,
        key: &'a [u8],
        legacy: &'a dyn LegacyParamSource<T>,
    ) -> Self {
        Self { store, key, legacy }
    }

    /// Load the parameter set.
    pub fn load(&self) -> Result<T, StakingError> {
        match self.store.get(self.key) {
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StakingError::Decode {
                    what: "params",
                    source,
                })
            }
            None => {
                debug!(key = ?self.key, "Params key absent, reading legacy param store");
                Ok(self.legacy.param_set().unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StakingParams;
    use tracing_test::traced_test;

    fn legacy_params() -> StakingParams {
        StakingParams::default()
            .with_bond_denom("uluna")
            .with_max_validators(130)
    }

    #[test]
    fn test_primary_wins() {
        let store = MemParamStore::new();
        let current = StakingParams::default().with_bond_denom("ukrw");
        store.set(PARAMS_KEY, serde_json::to_vec(&current).unwrap());
        let legacy = StaticLegacySource::new(legacy_params());

        let loaded = VersionedParamLoader::new(&store, PARAMS_KEY, &legacy)
            .load()
            .unwrap();
        assert_eq!(loaded, current);
    }

    #[traced_test]
    #[test]
    fn test_absent_key_reads_legacy() {
        let store = MemParamStore::new();
        let legacy = StaticLegacySource::new(legacy_params());

        let loaded = VersionedParamLoader::new(&store, PARAMS_KEY, &legacy)
            .load()
            .unwrap();
        assert_eq!(loaded, legacy_params());
        assert!(logs_contain("reading legacy param store"));
    }

    #[test]
    fn test_nothing_anywhere_gives_defaults() {
        let store = MemParamStore::new();
        let legacy = StaticLegacySource::<StakingParams>::empty();

        let loaded = VersionedParamLoader::new(&store, PARAMS_KEY, &legacy)
            .load()
            .unwrap();
        assert_eq!(loaded, StakingParams::default());
    }

    #[test]
    fn test_partial_primary_is_not_merged_with_legacy() {
        let store = MemParamStore::new();
        store.set(PARAMS_KEY, br#"{"max_entries": 3}"#.to_vec());
        let legacy = StaticLegacySource::new(legacy_params());

        let loaded = VersionedParamLoader::new(&store, PARAMS_KEY, &legacy)
            .load()
            .unwrap();
        assert_eq!(loaded.max_entries, 3);
        assert_eq!(loaded.bond_denom, StakingParams::default().bond_denom);
        assert_eq!(loaded.max_validators, StakingParams::default().max_validators);
    }

    #[test]
    fn test_undecodable_primary_is_an_error() {
        let store = MemParamStore::new();
        store.set(PARAMS_KEY, b"not json".to_vec());
        let legacy = StaticLegacySource::new(legacy_params());

        let err = VersionedParamLoader::new(&store, PARAMS_KEY, &legacy)
            .load()
            .unwrap_err();
        assert!(matches!(err, StakingError::Decode { .. }));
    }
}
