//! Per-transaction validation context.

use tollgate_types::{BlockHeight, DecCoins, Event, EventManager, Priority};

/// State carried through the ante pipeline for one validation attempt.
///
/// A context is created fresh for every attempt and dropped when the
/// pipeline finishes; nothing in it outlives the transaction. The node's
/// minimum gas prices are copied in by the dispatcher so stages never read
/// process-wide configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Height of the block being built or checked.
    block_height: BlockHeight,

    /// Pre-admission (mempool) check rather than block application.
    check_tx: bool,

    /// Dry-run execution whose state changes are never committed.
    simulate: bool,

    /// This node's minimum price per unit of gas.
    min_gas_prices: DecCoins,

    /// Scheduling priority assigned by the pipeline.
    priority: Priority,

    /// Events emitted so far.
    events: EventManager,
}

impl ValidationContext {
    /// Context for block application at `block_height`.
    pub fn new(block_height: BlockHeight) -> Self {
        Self {
            block_height,
            ..Default::default()
        }
    }

    /// Context for a mempool admission check at `block_height`.
    pub fn check_tx(block_height: BlockHeight, min_gas_prices: DecCoins) -> Self {
        Self {
            block_height,
            check_tx: true,
            min_gas_prices,
            ..Default::default()
        }
    }

    /// Mark the context as a check-phase context.
    pub fn with_check_tx(mut self, check_tx: bool) -> Self {
        self.check_tx = check_tx;
        self
    }

    /// Mark the context as a simulation.
    pub fn with_simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }

    /// Replace the minimum gas prices.
    pub fn with_min_gas_prices(mut self, min_gas_prices: DecCoins) -> Self {
        self.min_gas_prices = min_gas_prices;
        self
    }

    /// Set the scheduling priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Block height.
    pub fn block_height(&self) -> BlockHeight {
        self.block_height
    }

    /// Whether this is a pre-admission check.
    pub fn is_check_tx(&self) -> bool {
        self.check_tx
    }

    /// Whether this is a simulation.
    pub fn is_simulate(&self) -> bool {
        self.simulate
    }

    /// Minimum gas prices.
    pub fn min_gas_prices(&self) -> &DecCoins {
        &self.min_gas_prices
    }

    /// Scheduling priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Append an event.
    pub fn emit_event(&mut self, event: Event) {
        self.events.emit(event);
    }

    /// The event log.
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    /// Mutable access to the event log.
    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_types::DEFAULT_PRIORITY;

    #[test]
    fn test_fresh_context_defaults() {
        let ctx = ValidationContext::new(BlockHeight(5));
        assert_eq!(ctx.block_height(), BlockHeight(5));
        assert!(!ctx.is_check_tx());
        assert!(!ctx.is_simulate());
        assert!(ctx.min_gas_prices().is_empty());
        assert_eq!(ctx.priority(), DEFAULT_PRIORITY);
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn test_check_tx_context() {
        let prices: DecCoins = "0.15uluna".parse().unwrap();
        let ctx = ValidationContext::check_tx(BlockHeight(1), prices.clone())
            .with_simulate(true)
            .with_priority(7);
        assert!(ctx.is_check_tx());
        assert!(ctx.is_simulate());
        assert_eq!(ctx.min_gas_prices(), &prices);
        assert_eq!(ctx.priority(), 7);
    }

    #[test]
    fn test_emit_event() {
        let mut ctx = ValidationContext::new(BlockHeight(1));
        ctx.emit_event(Event::new("tx"));
        ctx.events_mut().emit(Event::new("other"));
        assert_eq!(ctx.events().len(), 2);
    }
}
