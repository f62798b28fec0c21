//! Transaction builders.

use tollgate_types::test_utils::test_coins;
use tollgate_types::{
    Address, Coins, Fee, FeeTx, Message, StdTx, Tx, MSG_AGGREGATE_EXCHANGE_RATE_PREVOTE,
    MSG_AGGREGATE_EXCHANGE_RATE_VOTE,
};

/// Builds a [`StdTx`] step by step.
///
/// ```ignore
/// let tx = TestTxBuilder::new()
///     .send(alice, "1000uluna")
///     .fee("200000uluna")
///     .gas(200_000)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestTxBuilder {
    messages: Vec<Message>,
    fee: Fee,
}

impl TestTxBuilder {
    /// An empty transaction with zero fee and gas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any message.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Append a bank send of `amount` from `from`.
    pub fn send(self, from: Address, amount: &str) -> Self {
        self.message(Message::send(from, test_coins(amount)))
    }

    /// Append an oracle vote and prevote signed by `feeder`.
    pub fn oracle_votes(self, feeder: Address) -> Self {
        self.message(Message::new(MSG_AGGREGATE_EXCHANGE_RATE_PREVOTE, feeder))
            .message(Message::new(MSG_AGGREGATE_EXCHANGE_RATE_VOTE, feeder))
    }

    /// Set the stated fee.
    pub fn fee(mut self, amount: &str) -> Self {
        self.fee.amount = test_coins(amount);
        self
    }

    /// Set the stated fee without normalizing it.
    pub fn raw_fee(mut self, amount: Coins) -> Self {
        self.fee.amount = amount;
        self
    }

    /// Set the gas limit.
    pub fn gas(mut self, gas_limit: u64) -> Self {
        self.fee.gas_limit = gas_limit;
        self
    }

    /// Set an explicit payer.
    pub fn payer(mut self, payer: Address) -> Self {
        self.fee.payer = Some(payer);
        self
    }

    /// Pay through `granter`'s allowance.
    pub fn granter(mut self, granter: Address) -> Self {
        self.fee.granter = Some(granter);
        self
    }

    /// Finish.
    pub fn build(self) -> StdTx {
        StdTx::new(self.messages, self.fee)
    }
}

/// A transaction without the fee capability.
#[derive(Debug, Clone, Default)]
pub struct NoFeeTx {
    /// Ordered messages.
    pub messages: Vec<Message>,
}

impl Tx for NoFeeTx {
    fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn as_fee_tx(&self) -> Option<&dyn FeeTx> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_types::test_utils::test_address;

    #[test]
    fn test_builder() {
        let alice = test_address(1);
        let granter = test_address(9);
        let tx = TestTxBuilder::new()
            .send(alice, "10uluna")
            .fee("5uluna")
            .gas(1_000)
            .granter(granter)
            .build();

        let fee_tx = tx.as_fee_tx().unwrap();
        assert_eq!(fee_tx.fee(), &test_coins("5uluna"));
        assert_eq!(fee_tx.gas(), 1_000);
        assert_eq!(fee_tx.fee_payer(), alice);
        assert_eq!(fee_tx.fee_granter(), Some(granter));
    }

    #[test]
    fn test_oracle_votes_are_oracle_messages() {
        let tx = TestTxBuilder::new().oracle_votes(test_address(3)).build();
        assert!(tx.messages.iter().all(Message::is_oracle_vote));
        assert!(NoFeeTx::default().as_fee_tx().is_none());
    }
}
