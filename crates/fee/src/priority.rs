//! Fee sufficiency and mempool priority.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tollgate_core::{AnteError, ValidationContext};
use tollgate_types::{Coin, Coins, CoinsError, DecCoins, FeeTx, Message, Priority, MAX_PRIORITY};

/// Whether every message is of an exempt type.
///
/// An empty message list is exempt.
pub fn is_exempt(messages: &[Message], exempt_types: &[String]) -> bool {
    messages
        .iter()
        .all(|msg| exempt_types.iter().any(|t| t == msg.type_url()))
}

/// Gas fee this node requires for `gas` units: `ceil(price * gas)` per
/// denomination of `min_gas_prices`.
///
/// A product too large for an amount saturates at the maximum amount.
pub fn required_gas_fees(min_gas_prices: &DecCoins, gas: u64) -> Result<Coins, CoinsError> {
    let coins = min_gas_prices
        .iter()
        .map(|price| Coin::new(price.denom.clone(), gas_fee_amount(price.amount, gas)))
        .collect();
    Coins::new(coins)
}

/// `ceil(price * gas)` as an amount, saturating at `u128::MAX`.
fn gas_fee_amount(price: Decimal, gas: u64) -> u128 {
    let gas_dec = Decimal::from(gas);
    if let Some(amount) = price
        .checked_mul(gas_dec)
        .and_then(|fee| fee.ceil().to_u128())
    {
        return amount;
    }

    // Past the decimal range: the integer part multiplies exactly in u128 and
    // the fractional part times gas stays below 2^64.
    let whole = price
        .trunc()
        .to_u128()
        .and_then(|whole| whole.checked_mul(u128::from(gas)));
    let fraction = price
        .fract()
        .checked_mul(gas_dec)
        .and_then(|fraction| fraction.ceil().to_u128());
    whole
        .zip(fraction)
        .and_then(|(whole, fraction)| whole.checked_add(fraction))
        .unwrap_or(u128::MAX)
}

/// Naive priority: the smallest per-denomination gas price in `fee`.
///
/// The gas price of a coin is `floor(amount / gas)`, clamped to
/// [`MAX_PRIORITY`]. A running value of zero counts as "nothing seen yet",
/// so a zero gas price in one denomination is replaced by whatever the
/// next denomination yields. Zero gas gives the maximum price.
pub fn get_tx_priority(fee: &Coins, gas: u64) -> Priority {
    let mut priority: Priority = 0;
    for coin in fee {
        let gas_price = coin
            .amount
            .checked_div(u128::from(gas))
            .and_then(|p| Priority::try_from(p).ok())
            .unwrap_or(MAX_PRIORITY);
        if priority == 0 || gas_price < priority {
            priority = gas_price;
        }
    }
    priority
}

/// Check the stated fee against this node's gas price floor plus `taxes`
/// and compute the transaction's priority.
///
/// The floor applies only during check-tx and only to non-exempt
/// transactions. It is met when any single denomination of the fee covers
/// its share of the requirement. Exempt transactions get
/// [`MAX_PRIORITY`].
pub fn check_tx_fee(
    ctx: &ValidationContext,
    fee_tx: &dyn FeeTx,
    taxes: &Coins,
    exempt_types: &[String],
) -> Result<Priority, AnteError> {
    let fee = fee_tx.fee();
    let gas = fee_tx.gas();
    let exempt = is_exempt(fee_tx.messages(), exempt_types);

    if ctx.is_check_tx() && !exempt {
        let gas_fees = required_gas_fees(ctx.min_gas_prices(), gas)?;
        let required = gas_fees.saturating_add(taxes);

        if !required.is_zero() && !fee.is_any_gte(&required) {
            return Err(AnteError::InsufficientFee {
                got: fee.clone(),
                required,
                gas: gas_fees,
                tax: taxes.clone(),
            });
        }
    }

    if exempt {
        Ok(MAX_PRIORITY)
    } else {
        Ok(get_tx_priority(fee, gas))
    }
}
