//! Transaction capability traits and the standard transaction.

use crate::{Address, Coins, Message};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded transaction as seen by the ante pipeline.
///
/// Stages that need more than the message list ask for a capability. A
/// transaction that cannot provide it is rejected by that stage with a
/// decode error, once, at stage entry.
pub trait Tx: fmt::Debug + Send + Sync {
    /// Ordered messages.
    fn messages(&self) -> &[Message];

    /// The fee capability, if this transaction carries fee information.
    fn as_fee_tx(&self) -> Option<&dyn FeeTx>;
}

/// Fee-related accessors of a transaction.
pub trait FeeTx: Send + Sync {
    /// The stated fee.
    fn fee(&self) -> &Coins;

    /// The gas limit.
    fn gas(&self) -> u64;

    /// Ordered messages.
    fn messages(&self) -> &[Message];

    /// The account that pays the fee absent a grant.
    fn fee_payer(&self) -> Address;

    /// The account that has granted a fee allowance to the payer, if any.
    fn fee_granter(&self) -> Option<Address>;
}

/// The fee section of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Offered fee amount.
    pub amount: Coins,

    /// Gas limit.
    pub gas_limit: u64,

    /// Explicit payer; defaults to the first signer of the first message.
    #[serde(default)]
    pub payer: Option<Address>,

    /// Account paying through a fee grant.
    #[serde(default)]
    pub granter: Option<Address>,
}

/// The standard transaction: messages plus a fee section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdTx {
    /// Ordered messages.
    pub messages: Vec<Message>,

    /// Fee section.
    pub fee: Fee,

    /// Free-form memo.
    #[serde(default)]
    pub memo: String,
}

impl StdTx {
    /// Create a transaction.
    pub fn new(messages: Vec<Message>, fee: Fee) -> Self {
        Self {
            messages,
            fee,
            memo: String::new(),
        }
    }
}

impl Tx for StdTx {
    fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn as_fee_tx(&self) -> Option<&dyn FeeTx> {
        Some(self)
    }
}

impl FeeTx for StdTx {
    fn fee(&self) -> &Coins {
        &self.fee.amount
    }

    fn gas(&self) -> u64 {
        self.fee.gas_limit
    }

    fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn fee_payer(&self) -> Address {
        self.fee
            .payer
            .or_else(|| self.messages.first().and_then(Message::first_signer))
            .unwrap_or_default()
    }

    fn fee_granter(&self) -> Option<Address> {
        self.fee.granter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(n: u8) -> Address {
        Address([n; 20])
    }

    #[test]
    fn test_fee_payer_defaults_to_first_signer() {
        let tx = StdTx::new(
            vec![
                Message::send(signer(1), Coins::single("uluna", 5)),
                Message::send(signer(2), Coins::single("uluna", 5)),
            ],
            Fee {
                amount: Coins::single("uluna", 10),
                gas_limit: 100,
                ..Default::default()
            },
        );
        let fee_tx = tx.as_fee_tx().unwrap();
        assert_eq!(fee_tx.fee_payer(), signer(1));
        assert_eq!(fee_tx.fee_granter(), None);
        assert_eq!(fee_tx.gas(), 100);
        assert_eq!(fee_tx.fee().amount_of("uluna"), 10);
        assert_eq!(FeeTx::messages(fee_tx).len(), 2);
    }

    #[test]
    fn test_explicit_payer_and_granter() {
        let tx = StdTx::new(
            vec![Message::send(signer(1), Coins::empty())],
            Fee {
                payer: Some(signer(3)),
                granter: Some(signer(4)),
                ..Default::default()
            },
        );
        let fee_tx = tx.as_fee_tx().unwrap();
        assert_eq!(fee_tx.fee_payer(), signer(3));
        assert_eq!(fee_tx.fee_granter(), Some(signer(4)));
    }

    #[test]
    fn test_no_signers_gives_zero_payer() {
        let tx = StdTx::new(vec![], Fee::default());
        assert!(tx.as_fee_tx().unwrap().fee_payer().is_zero());
    }
}
