//! Fixtures shared by tests across the workspace.

use crate::{Address, Coins, Fee, Message, StdTx};

/// A deterministic user address: twenty copies of `n`.
pub fn test_address(n: u8) -> Address {
    Address([n; 20])
}

/// Parse a coin expression, panicking on malformed input.
pub fn test_coins(s: &str) -> Coins {
    s.parse().expect("test coin expression must parse")
}

/// A single-send transaction from `signer` with the given fee and gas.
pub fn test_send_tx(signer: Address, fee: &str, gas_limit: u64) -> StdTx {
    StdTx::new(
        vec![Message::send(signer, test_coins("1uluna"))],
        Fee {
            amount: test_coins(fee),
            gas_limit,
            ..Default::default()
        },
    )
}
