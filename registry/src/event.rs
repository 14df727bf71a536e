//! Notifications emitted on every registry state change.

use ppml_types::{ContentHash, Identity};

use crate::FlavorKind;

/// Registry-level events that off-ledger indexers subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A claimant created or replaced its confirmation for a provider.
    Mapped {
        flavor: FlavorKind,
        claimant: Identity,
        provider: Identity,
        hash: ContentHash,
        /// `false` when an existing record was updated in place.
        created: bool,
    },
    /// A provider proved possession of the content behind `hash`.
    Verified {
        flavor: FlavorKind,
        provider: Identity,
        claimant: Identity,
        hash: ContentHash,
    },
}

impl RegistryEvent {
    pub fn flavor(&self) -> FlavorKind {
        match self {
            Self::Mapped { flavor, .. } | Self::Verified { flavor, .. } => *flavor,
        }
    }

    pub fn provider(&self) -> &Identity {
        match self {
            Self::Mapped { provider, .. } | Self::Verified { provider, .. } => provider,
        }
    }
}

/// Synchronous fan-out event bus for registry events.
///
/// Listeners run inline on the mutating call, after the state change has been
/// stored, so they always observe settled state.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&RegistryEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&RegistryEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &RegistryEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
