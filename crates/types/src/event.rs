//! Structured events emitted during validation.

use serde::{Deserialize, Serialize};

/// Event type for transaction-level records.
pub const EVENT_TYPE_TX: &str = "tx";

/// Attribute holding the stated fee.
pub const ATTRIBUTE_KEY_FEE: &str = "fee";

/// Attribute holding the address the fee was deducted from.
pub const ATTRIBUTE_KEY_FEE_PAYER: &str = "fee_payer";

/// A key/value attribute of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

/// A typed event with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type.
    pub kind: String,
    /// Ordered attributes.
    pub attributes: Vec<Attribute>,
}

impl Event {
    /// Create an event with no attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// First value recorded under `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

/// Append-only log of events for one validation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventManager {
    events: Vec<Event>,
}

impl EventManager {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Append several events in order.
    pub fn emit_all(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events of the given type.
    pub fn events_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Consume the log.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
