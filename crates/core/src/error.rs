//! Error types for the ante pipeline.

use thiserror::Error;
use tollgate_types::{Address, Coins, CoinsError};

/// ABCI code: transaction could not be decoded.
pub const CODE_TX_DECODE: u32 = 2;
/// ABCI code: signer or granter not authorized.
pub const CODE_UNAUTHORIZED: u32 = 4;
/// ABCI code: account balance too low.
pub const CODE_INSUFFICIENT_FUNDS: u32 = 5;
/// ABCI code: address does not exist.
pub const CODE_UNKNOWN_ADDRESS: u32 = 9;
/// ABCI code: malformed coins.
pub const CODE_INVALID_COINS: u32 = 10;
/// ABCI code: fee below the required amount.
pub const CODE_INSUFFICIENT_FEE: u32 = 13;
/// ABCI code: request not allowed in this configuration.
pub const CODE_INVALID_REQUEST: u32 = 18;
/// ABCI code: store or internal failure.
pub const CODE_INTERNAL: u32 = 1;
/// ABCI code: gas limit rejected.
pub const CODE_INVALID_GAS_LIMIT: u32 = 41;

/// Errors raised by ledger, fee-grant and treasury collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeeperError {
    /// Account balance does not cover the transfer.
    #[error("{address} has {available}, needs {required}")]
    InsufficientFunds {
        /// Account being debited.
        address: Address,
        /// Its spendable balance.
        available: Coins,
        /// Amount the transfer needs.
        required: Coins,
    },

    /// Transfer amount failed validation.
    #[error("Invalid coins: {0}")]
    InvalidCoins(#[from] CoinsError),

    /// No module account registered under this name.
    #[error("Module account {0} does not exist")]
    UnknownModuleAccount(String),

    /// No account at this address.
    #[error("Account {0} does not exist")]
    UnknownAccount(Address),

    /// No allowance from granter to grantee.
    #[error("Fee allowance not found")]
    GrantNotFound,

    /// Fee exceeds the remaining allowance.
    #[error("Fee {fee} exceeds remaining allowance {remaining}")]
    GrantExceeded {
        /// Requested fee.
        fee: Coins,
        /// Allowance left.
        remaining: Coins,
    },

    /// Allowance has expired.
    #[error("Fee allowance expired")]
    GrantExpired,

    /// Allowance does not cover this message type.
    #[error("Message {0} is not allowed by the fee allowance")]
    MessageNotAllowed(String),

    /// Underlying store failure.
    #[error("Store error: {0}")]
    Store(String),
}

impl KeeperError {
    /// ABCI code of this failure kind.
    pub fn code(&self) -> u32 {
        match self {
            KeeperError::InsufficientFunds { .. } => CODE_INSUFFICIENT_FUNDS,
            KeeperError::InvalidCoins(_) => CODE_INVALID_COINS,
            KeeperError::UnknownModuleAccount(_) | KeeperError::UnknownAccount(_) => {
                CODE_UNKNOWN_ADDRESS
            }
            KeeperError::GrantNotFound
            | KeeperError::GrantExceeded { .. }
            | KeeperError::GrantExpired
            | KeeperError::MessageNotAllowed(_) => CODE_UNAUTHORIZED,
            KeeperError::Store(_) => CODE_INTERNAL,
        }
    }
}

/// Errors returned by an ante stage.
///
/// Every variant except [`AnteError::FeeCollectorMissing`] rejects the
/// transaction. That one means the node itself is misconfigured.
#[derive(Debug, Error)]
pub enum AnteError {
    /// Transaction lacks a required capability.
    #[error("Tx decode error: {0}")]
    TxDecode(String),

    /// Gas limit is not acceptable.
    #[error("Invalid gas limit: {0}")]
    InvalidGasLimit(String),

    /// Stated fee is below the gas plus tax requirement.
    #[error(
        "Insufficient fees; got: \"{got}\", required: \"{required}\" = \"{gas}\"(gas) + \"{tax}\"(stability)"
    )]
    InsufficientFee {
        /// Stated fee.
        got: Coins,
        /// Gas plus tax.
        required: Coins,
        /// Gas component.
        gas: Coins,
        /// Tax component.
        tax: Coins,
    },

    /// Fee amount is malformed at deduction time.
    #[error("Invalid fee amount: {amount}")]
    InvalidCoins {
        /// The rejected amount.
        amount: Coins,
        /// Why it is invalid.
        #[source]
        source: CoinsError,
    },

    /// Request not allowed by this node's configuration.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The account to charge does not exist.
    #[error("Fee payer address: {0} does not exist")]
    UnknownAddress(Address),

    /// Ledger refused the fee transfer.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(#[source] KeeperError),

    /// Granter's allowance does not cover this fee.
    #[error("{granter} does not allow to pay fees for {payer}: {source}")]
    GrantDenied {
        /// Account that would pay.
        granter: Address,
        /// Account that asked it to.
        payer: Address,
        /// Authorizer's reason.
        #[source]
        source: KeeperError,
    },

    /// The fee collector module account is not registered.
    #[error("Fee collector module account ({0}) has not been set")]
    FeeCollectorMissing(String),

    /// Coin arithmetic failed.
    #[error(transparent)]
    Coins(#[from] CoinsError),

    /// Collaborator error, propagated unchanged.
    #[error(transparent)]
    Keeper(#[from] KeeperError),
}

impl AnteError {
    /// Whether this error is a node invariant violation rather than a
    /// per-transaction outcome. Callers must abort instead of rejecting.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AnteError::FeeCollectorMissing(_))
    }

    /// ABCI code reported for the rejection, `None` for fatal errors.
    pub fn code(&self) -> Option<u32> {
        let code = match self {
            AnteError::TxDecode(_) => CODE_TX_DECODE,
            AnteError::InvalidGasLimit(_) => CODE_INVALID_GAS_LIMIT,
            AnteError::InsufficientFee { .. } | AnteError::InvalidCoins { .. } => {
                CODE_INSUFFICIENT_FEE
            }
            AnteError::InvalidRequest(_) => CODE_INVALID_REQUEST,
            AnteError::UnknownAddress(_) => CODE_UNKNOWN_ADDRESS,
            AnteError::InsufficientFunds(_) => CODE_INSUFFICIENT_FUNDS,
            AnteError::GrantDenied { source, .. } => source.code(),
            AnteError::FeeCollectorMissing(_) => return None,
            AnteError::Coins(_) => CODE_INVALID_COINS,
            AnteError::Keeper(e) => e.code(),
        };
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_types::test_utils::{test_address, test_coins};

    #[test]
    fn test_only_missing_fee_collector_is_fatal() {
        assert!(AnteError::FeeCollectorMissing("fee_collector".into()).is_fatal());
        assert_eq!(
            AnteError::FeeCollectorMissing("fee_collector".into()).code(),
            None
        );
        assert!(!AnteError::TxDecode("x".into()).is_fatal());
        assert!(!AnteError::UnknownAddress(test_address(1)).is_fatal());
        assert!(!AnteError::Keeper(KeeperError::Store("io".into())).is_fatal());
    }

    #[test]
    fn test_codes() {
        assert_eq!(AnteError::TxDecode("x".into()).code(), Some(CODE_TX_DECODE));
        assert_eq!(
            AnteError::InvalidGasLimit("x".into()).code(),
            Some(CODE_INVALID_GAS_LIMIT)
        );
        assert_eq!(
            AnteError::InvalidRequest("x".into()).code(),
            Some(CODE_INVALID_REQUEST)
        );
        let denied = AnteError::GrantDenied {
            granter: test_address(1),
            payer: test_address(2),
            source: KeeperError::GrantNotFound,
        };
        assert_eq!(denied.code(), Some(CODE_UNAUTHORIZED));
        assert_eq!(
            AnteError::from(KeeperError::UnknownModuleAccount("mint".into())).code(),
            Some(CODE_UNKNOWN_ADDRESS)
        );
    }

    #[test]
    fn test_insufficient_fee_message_reports_components() {
        let err = AnteError::InsufficientFee {
            got: test_coins("199999uluna"),
            required: test_coins("200100uluna"),
            gas: test_coins("200000uluna"),
            tax: test_coins("100uluna"),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient fees; got: \"199999uluna\", required: \"200100uluna\" = \"200000uluna\"(gas) + \"100uluna\"(stability)"
        );
        assert_eq!(err.code(), Some(CODE_INSUFFICIENT_FEE));
    }
}
