use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

// LogPublisher renders every event through the tracing subscriber
#[derive(Debug, Default)]
pub struct LogPublisher {}

impl LogPublisher {
    pub fn new() -> Self {
        Self {}
    }
}

impl EventPublisher for LogPublisher {
    fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        let json = serde_json::to_string(event)?;
        info!(event_name = event.name.as_str(), event_kind = ?event.kind, "{}", json);
        Ok(())
    }
}
