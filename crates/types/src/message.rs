//! Transaction messages.

use crate::{Address, Coins};
use serde::{Deserialize, Serialize};

/// Type URL of the oracle aggregate exchange-rate prevote.
pub const MSG_AGGREGATE_EXCHANGE_RATE_PREVOTE: &str =
    "/oracle.v1beta1.MsgAggregateExchangeRatePrevote";

/// Type URL of the oracle aggregate exchange-rate vote.
pub const MSG_AGGREGATE_EXCHANGE_RATE_VOTE: &str = "/oracle.v1beta1.MsgAggregateExchangeRateVote";

/// Type URL of a plain bank send.
pub const MSG_SEND: &str = "/bank.v1beta1.MsgSend";

/// A message carried by a transaction.
///
/// The ante stage never interprets the body. It only needs the type URL
/// (for fee-exemption classification), the signers, and the funds the
/// message moves (the tax base).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Fully-qualified message type.
    pub type_url: String,

    /// Addresses that must sign this message, first one first.
    pub signers: Vec<Address>,

    /// Coins this message transfers out of the signer's account.
    #[serde(default)]
    pub funds: Coins,

    /// Encoded message body.
    #[serde(default)]
    pub value: Vec<u8>,
}

impl Message {
    /// Create a message with a single signer and no funds.
    pub fn new(type_url: impl Into<String>, signer: Address) -> Self {
        Self {
            type_url: type_url.into(),
            signers: vec![signer],
            funds: Coins::empty(),
            value: Vec::new(),
        }
    }

    /// Set the funds moved by this message.
    pub fn with_funds(mut self, funds: Coins) -> Self {
        self.funds = funds;
        self
    }

    /// Set the encoded body.
    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = value;
        self
    }

    /// A bank send of `amount` from `from`.
    pub fn send(from: Address, amount: Coins) -> Self {
        Self::new(MSG_SEND, from).with_funds(amount)
    }

    /// The message type URL.
    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    /// The first signer, if any.
    pub fn first_signer(&self) -> Option<Address> {
        self.signers.first().copied()
    }

    /// Whether this is an oracle price submission.
    pub fn is_oracle_vote(&self) -> bool {
        matches!(
            self.type_url.as_str(),
            MSG_AGGREGATE_EXCHANGE_RATE_PREVOTE | MSG_AGGREGATE_EXCHANGE_RATE_VOTE
        )
    }
}
