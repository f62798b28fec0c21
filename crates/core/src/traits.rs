//! Ante pipeline traits.

use crate::{AnteError, ValidationContext};
use std::sync::Arc;
use tollgate_types::Tx;

/// Runs the remainder of the ante pipeline.
///
/// Handlers are synchronous and deterministic: given the same context,
/// transaction and ledger state they return the same outcome. They hold no
/// per-transaction state, so one handler may serve many validation
/// attempts concurrently.
pub trait AnteHandler: Send + Sync {
    /// Validate `tx` and return the updated context.
    fn handle(
        &self,
        ctx: ValidationContext,
        tx: &dyn Tx,
        simulate: bool,
    ) -> Result<ValidationContext, AnteError>;
}

impl<F> AnteHandler for F
where
    F: Fn(ValidationContext, &dyn Tx, bool) -> Result<ValidationContext, AnteError> + Send + Sync,
{
    fn handle(
        &self,
        ctx: ValidationContext,
        tx: &dyn Tx,
        simulate: bool,
    ) -> Result<ValidationContext, AnteError> {
        self(ctx, tx, simulate)
    }
}

/// One stage of the ante pipeline.
///
/// A decorator does its own checks and then either returns an error, which
/// stops the pipeline, or hands the context to `next`.
pub trait AnteDecorator: Send + Sync {
    /// Process `tx` and forward to `next`.
    fn ante_handle(
        &self,
        ctx: ValidationContext,
        tx: &dyn Tx,
        simulate: bool,
        next: &dyn AnteHandler,
    ) -> Result<ValidationContext, AnteError>;
}

/// End of the pipeline: returns the context unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terminator;

impl AnteHandler for Terminator {
    fn handle(
        &self,
        ctx: ValidationContext,
        _tx: &dyn Tx,
        _simulate: bool,
    ) -> Result<ValidationContext, AnteError> {
        Ok(ctx)
    }
}

/// An ordered list of decorators run as a single handler.
#[derive(Clone, Default)]
pub struct AnteChain {
    decorators: Vec<Arc<dyn AnteDecorator>>,
}

impl AnteChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decorator.
    pub fn with(mut self, decorator: Arc<dyn AnteDecorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    /// Whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }
}

impl std::fmt::Debug for AnteChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnteChain")
            .field("stages", &self.decorators.len())
            .finish()
    }
}

impl AnteHandler for AnteChain {
    fn handle(
        &self,
        ctx: ValidationContext,
        tx: &dyn Tx,
        simulate: bool,
    ) -> Result<ValidationContext, AnteError> {
        ChainLink(&self.decorators).handle(ctx, tx, simulate)
    }
}

/// The suffix of a chain starting at its first decorator.
struct ChainLink<'a>(&'a [Arc<dyn AnteDecorator>]);

impl AnteHandler for ChainLink<'_> {
    fn handle(
        &self,
        ctx: ValidationContext,
        tx: &dyn Tx,
        simulate: bool,
    ) -> Result<ValidationContext, AnteError> {
        match self.0.split_first() {
            Some((first, rest)) => first.ante_handle(ctx, tx, simulate, &ChainLink(rest)),
            None => Terminator.handle(ctx, tx, simulate),
        }
    }
}
