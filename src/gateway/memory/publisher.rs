use std::sync::{Arc, RwLock};
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

// MemoryPublisher keeps published events in memory. Clones share the same log,
// so a caller can hand one clone to a service and read events from another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPublisher {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(vec![])),
        }
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.read().map(|events| events.clone()).unwrap_or_default()
    }

    pub fn events_named(&self, name: &str) -> Vec<DomainEvent> {
        self.events().into_iter().filter(|e| e.name == name).collect()
    }
}

impl EventPublisher for MemoryPublisher {
    fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        let mut events = self.events
            .write()
            .map_err(|_| LibraryError::runtime("event log lock poisoned", None))?;
        events.push(event.clone());
        Ok(())
    }
}
