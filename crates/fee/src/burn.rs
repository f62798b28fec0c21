//! Splitting collected tax between distribution and burn.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use tollgate_core::{AnteError, BankKeeper, TreasuryKeeper, ValidationContext};
use tollgate_types::{Coin, Coins, CoinsError};

/// Distribution share of `taxes` at `rate`: `rate * amount` per
/// denomination, rounded half to even.
pub fn distribution_share(taxes: &Coins, rate: Decimal) -> Result<Coins, CoinsError> {
    let coins = taxes
        .iter()
        .map(|tax| -> Result<Coin, CoinsError> {
            let share = Decimal::from_u128(tax.amount)
                .and_then(|amount| amount.checked_mul(rate))
                .map(|share| {
                    share.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
                })
                .and_then(|share| share.to_u128())
                .ok_or_else(|| CoinsError::Overflow(tax.denom.clone()))?;
            Ok(Coin::new(tax.denom.clone(), share))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Coins::new(coins)
}

/// Burn the part of `taxes` not kept for distribution.
///
/// The taxes are already in the fee collector. The distribution share
/// stays there; the rest moves to the burn module. A rate of zero or less
/// burns everything.
pub fn burn_tax_split(
    bank: &dyn BankKeeper,
    treasury: &dyn TreasuryKeeper,
    ctx: &ValidationContext,
    fee_collector: &str,
    burn_module: &str,
    taxes: &Coins,
) -> Result<(), AnteError> {
    let rate = treasury.burn_split_rate(ctx);
    let burn = if rate > Decimal::ZERO {
        taxes.saturating_sub(&distribution_share(taxes, rate)?)
    } else {
        taxes.clone()
    };

    if burn.is_zero() {
        return Ok(());
    }
    bank.send_coins_from_module_to_module(ctx, fee_collector, burn_module, &burn)
        .map_err(AnteError::InsufficientFunds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tollgate_test_helpers::{test_coins, LedgerOp, MemLedger, RecordingTreasury};
    use tollgate_types::{Address, BlockHeight, BURN_MODULE_NAME, FEE_COLLECTOR_NAME};

    fn collected(amount: &str) -> (MemLedger, ValidationContext) {
        let ledger = MemLedger::standard();
        let ctx = ValidationContext::new(BlockHeight(1));
        ledger.fund(Address::module(FEE_COLLECTOR_NAME), &test_coins(amount));
        (ledger, ctx)
    }

    #[test]
    fn test_share_rounds_half_to_even() {
        let share = distribution_share(&test_coins("5uluna,15uusd,3ukrw"), dec!(0.5)).unwrap();
        // 2.5 -> 2, 7.5 -> 8, 1.5 -> 2
        assert_eq!(share, test_coins("2uluna,8uusd,2ukrw"));
    }

    #[test]
    fn test_split_keeps_distribution_share() {
        let (ledger, ctx) = collected("100uluna");
        let treasury = RecordingTreasury::new(dec!(0.1));

        burn_tax_split(
            &ledger,
            &treasury,
            &ctx,
            FEE_COLLECTOR_NAME,
            BURN_MODULE_NAME,
            &test_coins("100uluna"),
        )
        .unwrap();

        assert_eq!(
            ledger.module_balance(FEE_COLLECTOR_NAME),
            test_coins("10uluna")
        );
        assert_eq!(ledger.module_balance(BURN_MODULE_NAME), test_coins("90uluna"));
    }

    #[test]
    fn test_zero_rate_burns_all() {
        let (ledger, ctx) = collected("40uluna");
        let treasury = RecordingTreasury::new(Decimal::ZERO);

        burn_tax_split(
            &ledger,
            &treasury,
            &ctx,
            FEE_COLLECTOR_NAME,
            BURN_MODULE_NAME,
            &test_coins("40uluna"),
        )
        .unwrap();

        assert!(ledger.module_balance(FEE_COLLECTOR_NAME).is_empty());
        assert_eq!(ledger.module_balance(BURN_MODULE_NAME), test_coins("40uluna"));
    }

    #[test]
    fn test_full_rate_burns_nothing() {
        let (ledger, ctx) = collected("40uluna");
        let treasury = RecordingTreasury::new(Decimal::ONE);

        burn_tax_split(
            &ledger,
            &treasury,
            &ctx,
            FEE_COLLECTOR_NAME,
            BURN_MODULE_NAME,
            &test_coins("40uluna"),
        )
        .unwrap();

        assert_eq!(ledger.mutations(), 0);
    }

    #[test]
    fn test_failed_burn_is_insufficient_funds() {
        let (ledger, ctx) = collected("40uluna");
        ledger.fail_on(LedgerOp::ModuleToModule);
        let treasury = RecordingTreasury::default();

        let err = burn_tax_split(
            &ledger,
            &treasury,
            &ctx,
            FEE_COLLECTOR_NAME,
            BURN_MODULE_NAME,
            &test_coins("40uluna"),
        )
        .unwrap_err();
        assert!(matches!(err, AnteError::InsufficientFunds(_)));
        assert_eq!(err.code(), Some(tollgate_core::CODE_INSUFFICIENT_FUNDS));
        assert_eq!(ledger.module_balance(FEE_COLLECTOR_NAME), test_coins("40uluna"));
    }
}
