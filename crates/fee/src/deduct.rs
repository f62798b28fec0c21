//! Fee deduction and the simulation top-up.

use tollgate_core::{AnteError, BankKeeper, ValidationContext};
use tollgate_types::{Address, Coins, CoinsError};

/// Amount a simulation deducts, and the part of it that must be minted
/// first.
///
/// Returns `(fees_or_tax, need_mint)`. `fees_or_tax` is the
/// denomination-wise maximum of the stated fee and `taxes`; `need_mint` is
/// what that adds on top of the stated fee. With no taxes the fee passes
/// through untouched and is validated at deduction.
pub fn simulation_fees(fee: &Coins, taxes: &Coins) -> Result<(Coins, Coins), CoinsError> {
    if taxes.is_zero() {
        return Ok((fee.clone(), Coins::empty()));
    }

    fee.validate()?;
    let fees_or_tax = fee.max(taxes);
    let need_mint = fees_or_tax.saturating_sub(fee);
    Ok((fees_or_tax, need_mint))
}

/// Move `fees` from `from` into the fee collector.
///
/// A malformed amount is reported as an insufficient fee; any ledger
/// refusal as insufficient funds.
pub fn deduct_fees(
    bank: &dyn BankKeeper,
    ctx: &ValidationContext,
    from: &Address,
    fee_collector: &str,
    fees: &Coins,
) -> Result<(), AnteError> {
    fees.validate().map_err(|source| AnteError::InvalidCoins {
        amount: fees.clone(),
        source,
    })?;

    bank.send_coins_from_account_to_module(ctx, from, fee_collector, fees)
        .map_err(AnteError::InsufficientFunds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_core::KeeperError;
    use tollgate_test_helpers::{test_address, test_coins, MemLedger};
    use tollgate_types::{BlockHeight, Coin, FEE_COLLECTOR_NAME};

    #[test]
    fn test_top_up_to_tax() {
        let (fees_or_tax, need_mint) =
            simulation_fees(&test_coins("100uluna"), &test_coins("150uluna")).unwrap();
        assert_eq!(fees_or_tax, test_coins("150uluna"));
        assert_eq!(need_mint, test_coins("50uluna"));
    }

    #[test]
    fn test_zero_fee_and_zero_tax_mint_nothing() {
        let (fees_or_tax, need_mint) = simulation_fees(&Coins::empty(), &Coins::empty()).unwrap();
        assert!(fees_or_tax.is_zero());
        assert!(need_mint.is_zero());
    }

    #[test]
    fn test_zero_fee_takes_tax() {
        let (fees_or_tax, need_mint) =
            simulation_fees(&Coins::empty(), &test_coins("7uluna,3uusd")).unwrap();
        assert_eq!(fees_or_tax, test_coins("7uluna,3uusd"));
        assert_eq!(need_mint, test_coins("7uluna,3uusd"));
    }

    #[test]
    fn test_fee_above_tax_needs_no_mint() {
        let (fees_or_tax, need_mint) =
            simulation_fees(&test_coins("500uluna"), &test_coins("150uluna")).unwrap();
        assert_eq!(fees_or_tax, test_coins("500uluna"));
        assert!(need_mint.is_empty());
    }

    #[test]
    fn test_missing_tax_denom_added() {
        let (fees_or_tax, need_mint) =
            simulation_fees(&test_coins("500uluna"), &test_coins("20uusd")).unwrap();
        assert_eq!(fees_or_tax, test_coins("500uluna,20uusd"));
        assert_eq!(need_mint, test_coins("20uusd"));
    }

    #[test]
    fn test_need_mint_never_negative() {
        let cases = [
            ("", ""),
            ("1uluna", ""),
            ("", "1uluna"),
            ("5uluna,9uusd", "7uluna"),
            ("5uluna", "3uluna,2ukrw"),
            ("1akrw,100uluna", "2akrw,50uluna"),
        ];
        for (fee, tax) in cases {
            let fee = test_coins(fee);
            let tax = test_coins(tax);
            let (fees_or_tax, need_mint) = simulation_fees(&fee, &tax).unwrap();
            assert!(need_mint.is_valid());
            assert!(fees_or_tax.is_all_gte(&need_mint));
            assert!(fees_or_tax.is_all_gte(&tax));
        }
    }

    #[test]
    fn test_malformed_fee_with_tax_is_rejected() {
        let unsorted = Coins::from_raw(vec![Coin::new("uusd", 1), Coin::new("uluna", 1)]);
        let err = simulation_fees(&unsorted, &test_coins("5uluna")).unwrap_err();
        assert!(matches!(err, CoinsError::Unsorted { .. }));
    }

    #[test]
    fn test_deduct_moves_to_collector() {
        let ledger = MemLedger::standard();
        let payer = test_address(1);
        ledger.fund(payer, &test_coins("300uluna"));
        let ctx = ValidationContext::new(BlockHeight(1));

        deduct_fees(
            &ledger,
            &ctx,
            &payer,
            FEE_COLLECTOR_NAME,
            &test_coins("200uluna"),
        )
        .unwrap();

        assert_eq!(ledger.balance(&payer), test_coins("100uluna"));
        assert_eq!(
            ledger.module_balance(FEE_COLLECTOR_NAME),
            test_coins("200uluna")
        );
    }

    #[test]
    fn test_deduct_invalid_amount_is_insufficient_fee() {
        let ledger = MemLedger::standard();
        let payer = test_address(1);
        ledger.fund(payer, &test_coins("300uluna"));
        let ctx = ValidationContext::new(BlockHeight(1));
        let unsorted = Coins::from_raw(vec![Coin::new("uusd", 1), Coin::new("uluna", 1)]);

        let err = deduct_fees(&ledger, &ctx, &payer, FEE_COLLECTOR_NAME, &unsorted).unwrap_err();

        assert!(matches!(err, AnteError::InvalidCoins { .. }));
        assert_eq!(err.code(), Some(tollgate_core::CODE_INSUFFICIENT_FEE));
        assert_eq!(ledger.mutations(), 0);
    }

    #[test]
    fn test_deduct_short_balance_is_insufficient_funds() {
        let ledger = MemLedger::standard();
        let payer = test_address(1);
        ledger.fund(payer, &test_coins("10uluna"));
        let ctx = ValidationContext::new(BlockHeight(1));

        let err = deduct_fees(
            &ledger,
            &ctx,
            &payer,
            FEE_COLLECTOR_NAME,
            &test_coins("11uluna"),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            AnteError::InsufficientFunds(KeeperError::InsufficientFunds { .. })
        ));
    }
}
