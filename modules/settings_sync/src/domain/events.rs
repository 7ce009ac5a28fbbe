//! Stream events and the update publisher seam
//!
//! Events are the wire envelope pushed over the settings streams. The
//! publisher trait decouples the orchestrator from the transport that fans
//! updates out; it is injected at construction, never reached through
//! process-global state.

use crate::contract::{MobileSettings, Snapshot};
use serde::Serialize;

/// Envelope for one server-sent event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Emitted once, immediately after a stream opens
    Connected { message: String },
    /// Full settings payload in the audience's shape
    SettingsUpdate { data: serde_json::Value },
}

impl StreamEvent {
    pub fn connected() -> Self {
        StreamEvent::Connected {
            message: "SSE connection established".to_string(),
        }
    }

    pub fn settings_update(data: serde_json::Value) -> Self {
        StreamEvent::SettingsUpdate { data }
    }
}

/// Outbound fan-out hook invoked by the orchestrator after a write
///
/// Delivery failures belong to the publisher; they are never surfaced to
/// the write caller.
#[async_trait::async_trait]
pub trait UpdatePublisher: Send + Sync {
    async fn publish(&self, snapshot: &Snapshot, mobile: &MobileSettings) -> anyhow::Result<()>;
}

/// No-op publisher for tests or when streaming is disabled
pub struct NoOpUpdatePublisher;

#[async_trait::async_trait]
impl UpdatePublisher for NoOpUpdatePublisher {
    async fn publish(&self, _snapshot: &Snapshot, _mobile: &MobileSettings) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_event_wire_shape() {
        let json = serde_json::to_value(StreamEvent::connected()).expect("serialize failed");

        assert_eq!(json["type"], "connected");
        assert_eq!(json["message"], "SSE connection established");
    }

    #[test]
    fn settings_update_wire_shape() {
        let event = StreamEvent::settings_update(serde_json::json!({ "mg1_enabled": true }));
        let json = serde_json::to_value(event).expect("serialize failed");

        assert_eq!(json["type"], "settings_update");
        assert_eq!(json["data"]["mg1_enabled"], true);
    }

    #[tokio::test]
    async fn noop_publisher_accepts_everything() {
        let publisher = NoOpUpdatePublisher;
        let snapshot = Snapshot::defaults();
        let mobile = crate::domain::mapper::to_mobile(&snapshot);

        assert!(publisher.publish(&snapshot, &mobile).await.is_ok());
    }
}
