//! The fee and tax enforcement stage.

use crate::burn::burn_tax_split;
use crate::config::FeeConfig;
use crate::deduct::{deduct_fees, simulation_fees};
use crate::priority::check_tx_fee;
use std::sync::Arc;
use tollgate_core::{
    AccountKeeper, AnteDecorator, AnteError, AnteHandler, BankKeeper, FeeGrantKeeper,
    TaxCalculator, TreasuryKeeper, ValidationContext,
};
use tollgate_types::{
    Address, Coins, Event, FeeTx, Tx, ATTRIBUTE_KEY_FEE, ATTRIBUTE_KEY_FEE_PAYER, EVENT_TYPE_TX,
};
use tracing::{debug, error, warn};

/// Ante stage that makes a transaction pay for its gas and stability tax.
///
/// In order, the stage:
///
/// 1. requires the fee capability and a positive gas limit,
/// 2. asks the tax calculator what the messages owe,
/// 3. outside simulation, checks the fee against the node's gas price floor
///    plus tax and computes the mempool priority,
/// 4. charges the fee (or its fee granter) into the fee collector, splitting
///    and recording any tax,
/// 5. emits a `tx` event naming the fee and who paid it,
///
/// and then hands the context, with its priority set, to the next stage.
///
/// Nothing is written before step 4. The stage keeps no state between
/// calls; a single instance can validate many transactions concurrently.
pub struct FeeDecorator {
    account_keeper: Arc<dyn AccountKeeper>,
    bank_keeper: Arc<dyn BankKeeper>,
    fee_grant_keeper: Option<Arc<dyn FeeGrantKeeper>>,
    treasury_keeper: Arc<dyn TreasuryKeeper>,
    tax_calculator: Arc<dyn TaxCalculator>,
    config: FeeConfig,
}

impl FeeDecorator {
    /// Create the stage without fee grant support.
    pub fn new(
        account_keeper: Arc<dyn AccountKeeper>,
        bank_keeper: Arc<dyn BankKeeper>,
        treasury_keeper: Arc<dyn TreasuryKeeper>,
        tax_calculator: Arc<dyn TaxCalculator>,
        config: FeeConfig,
    ) -> Self {
        Self {
            account_keeper,
            bank_keeper,
            fee_grant_keeper: None,
            treasury_keeper,
            tax_calculator,
            config,
        }
    }

    /// Enable paying fees through fee grants.
    pub fn with_fee_grant_keeper(mut self, keeper: Arc<dyn FeeGrantKeeper>) -> Self {
        self.fee_grant_keeper = Some(keeper);
        self
    }

    /// The stage configuration.
    pub fn config(&self) -> &FeeConfig {
        &self.config
    }

    /// Run every check and deduction, returning the context to forward.
    fn process(
        &self,
        ctx: ValidationContext,
        tx: &dyn Tx,
        simulate: bool,
    ) -> Result<ValidationContext, AnteError> {
        let ctx = ctx.with_simulate(simulate);
        let fee_tx = tx
            .as_fee_tx()
            .ok_or_else(|| AnteError::TxDecode("Tx must be a FeeTx".into()))?;

        debug!(
            height = ctx.block_height().0,
            simulate,
            gas = fee_tx.gas(),
            fee = %fee_tx.fee(),
            "Checking transaction fee"
        );

        if !simulate && !ctx.block_height().is_genesis() && fee_tx.gas() == 0 {
            return Err(AnteError::InvalidGasLimit("must provide positive gas".into()));
        }

        let taxes = self
            .tax_calculator
            .compute_tax(&ctx, simulate, fee_tx.messages());

        let mut priority = 0;
        if !simulate {
            priority = check_tx_fee(&ctx, fee_tx, &taxes, &self.config.exempt_message_types)?;
            debug!(priority, taxes = %taxes, "Computed transaction priority");
        }

        let mut ctx = ctx;
        self.check_deduct_fee(&mut ctx, fee_tx, &taxes, simulate)?;

        Ok(ctx.with_priority(priority))
    }

    /// Charge the fee and settle `taxes`, emitting the fee event.
    ///
    /// The payer is the transaction's fee payer, or its fee granter when one
    /// is set and differs from the payer. During simulation the amount
    /// charged is raised to cover `taxes`, and any part the stated fee does
    /// not cover is minted to the payer first.
    pub fn check_deduct_fee(
        &self,
        ctx: &mut ValidationContext,
        fee_tx: &dyn FeeTx,
        taxes: &Coins,
        simulate: bool,
    ) -> Result<(), AnteError> {
        if self
            .account_keeper
            .module_address(&self.config.fee_collector)
            .is_none()
        {
            return Err(AnteError::FeeCollectorMissing(
                self.config.fee_collector.clone(),
            ));
        }

        let fee = fee_tx.fee();
        let deduct_from = self.resolve_payer(ctx, fee_tx)?;

        let account = self
            .account_keeper
            .account(ctx, &deduct_from)
            .ok_or(AnteError::UnknownAddress(deduct_from))?;

        let mut fees_or_tax = fee.clone();
        if simulate {
            let (adjusted, need_mint) =
                simulation_fees(fee, taxes).map_err(|source| AnteError::InvalidCoins {
                    amount: fee.clone(),
                    source,
                })?;
            fees_or_tax = adjusted;

            if !need_mint.is_zero() {
                debug!(
                    need_mint = %need_mint,
                    account = %account.address,
                    "Minting simulation fee top-up"
                );
                self.bank_keeper
                    .mint_coins(ctx, &self.config.mint_module, &need_mint)?;
                self.bank_keeper.send_coins_from_module_to_account(
                    ctx,
                    &self.config.mint_module,
                    &account.address,
                    &need_mint,
                )?;
            }
        }

        if !fees_or_tax.is_zero() {
            deduct_fees(
                self.bank_keeper.as_ref(),
                ctx,
                &account.address,
                &self.config.fee_collector,
                &fees_or_tax,
            )?;

            if !taxes.is_zero() {
                burn_tax_split(
                    self.bank_keeper.as_ref(),
                    self.treasury_keeper.as_ref(),
                    ctx,
                    &self.config.fee_collector,
                    &self.config.burn_module,
                    taxes,
                )?;
                self.treasury_keeper.record_epoch_tax_proceeds(ctx, taxes)?;
            }
        }

        ctx.emit_event(
            Event::new(EVENT_TYPE_TX)
                .with_attribute(ATTRIBUTE_KEY_FEE, fee.to_string())
                .with_attribute(ATTRIBUTE_KEY_FEE_PAYER, deduct_from.to_string()),
        );

        Ok(())
    }

    /// Account the fee is charged to, consuming a fee allowance if needed.
    fn resolve_payer(
        &self,
        ctx: &ValidationContext,
        fee_tx: &dyn FeeTx,
    ) -> Result<Address, AnteError> {
        let payer = fee_tx.fee_payer();
        let granter = match fee_tx.fee_granter() {
            Some(granter) if granter != payer => granter,
            _ => return Ok(payer),
        };

        let keeper = self
            .fee_grant_keeper
            .as_ref()
            .ok_or_else(|| AnteError::InvalidRequest("fee grants are not enabled".into()))?;

        keeper
            .use_granted_fees(ctx, &granter, &payer, fee_tx.fee(), fee_tx.messages())
            .map_err(|source| AnteError::GrantDenied {
                granter,
                payer,
                source,
            })?;

        Ok(granter)
    }
}

impl AnteDecorator for FeeDecorator {
    fn ante_handle(
        &self,
        ctx: ValidationContext,
        tx: &dyn Tx,
        simulate: bool,
        next: &dyn AnteHandler,
    ) -> Result<ValidationContext, AnteError> {
        let ctx = self.process(ctx, tx, simulate).inspect_err(|e| {
            if e.is_fatal() {
                error!(error = %e, "Fee stage misconfigured");
            } else {
                warn!(error = %e, code = ?e.code(), simulate, "Transaction fee rejected");
            }
        })?;

        next.handle(ctx, tx, simulate)
    }
}

impl std::fmt::Debug for FeeDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeDecorator")
            .field("fee_grants", &self.fee_grant_keeper.is_some())
            .field("config", &self.config)
            .finish()
    }
}
