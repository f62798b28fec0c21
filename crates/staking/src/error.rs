//! Staking keeper errors.

use thiserror::Error;

/// Errors from constructing the staking keeper or reading its state.
#[derive(Debug, Error)]
pub enum StakingError {
    /// A required pool module account is not registered.
    #[error("{0} module account has not been set")]
    MissingModuleAccount(&'static str),

    /// Exactly one legacy parameter subspace must be supplied.
    #[error("must provide exactly one param subspace, got {0}")]
    LegacySubspaceCount(usize),

    /// The governance authority is not a valid address.
    #[error("authority is not a valid address: {0:?}")]
    InvalidAuthority(String),

    /// Stored bytes could not be decoded.
    #[error("failed to decode stored {what}: {source}")]
    Decode {
        /// What was being decoded.
        what: &'static str,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode {what}: {source}")]
    Encode {
        /// What was being encoded.
        what: &'static str,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
}
