//! Broadcast registry for open settings streams
//!
//! Two independent partitions of live connections, one per audience.
//! Registration is ephemeral in-memory state; a sink whose send fails is
//! pruned on the spot without aborting delivery to the remaining sinks.

use super::events::StreamEvent;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Client audience, selecting the payload shape and registry partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    Web,
    Mobile,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Web => "web",
            Audience::Mobile => "mobile",
        }
    }
}

/// Write half of one client connection
pub trait EventSink: Send + Sync {
    /// Deliver one event; an error marks the connection dead
    fn send(&self, event: &StreamEvent) -> anyhow::Result<()>;
}

/// Process-wide set of open streaming connections
///
/// Constructed once by the composition root and handed down by reference;
/// there is deliberately no global instance.
#[derive(Default)]
pub struct BroadcastRegistry {
    web: RwLock<HashMap<Uuid, Arc<dyn EventSink>>>,
    mobile: RwLock<HashMap<Uuid, Arc<dyn EventSink>>>,
}

impl BroadcastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, audience: Audience, id: Uuid, sink: Arc<dyn EventSink>) {
        self.partition(audience).write().insert(id, sink);
        tracing::debug!(audience = audience.as_str(), %id, "stream registered");
    }

    pub fn unregister(&self, audience: Audience, id: Uuid) {
        if self.partition(audience).write().remove(&id).is_some() {
            tracing::debug!(audience = audience.as_str(), %id, "stream unregistered");
        }
    }

    /// Number of live connections in one partition
    pub fn size(&self, audience: Audience) -> usize {
        self.partition(audience).read().len()
    }

    /// Push `event` to every connection of `audience`, pruning any sink
    /// whose send fails. Returns the number of successful deliveries.
    pub fn broadcast(&self, audience: Audience, event: &StreamEvent) -> usize {
        let sinks: Vec<(Uuid, Arc<dyn EventSink>)> = self
            .partition(audience)
            .read()
            .iter()
            .map(|(id, sink)| (*id, sink.clone()))
            .collect();

        let mut delivered = 0;
        for (id, sink) in sinks {
            match sink.send(event) {
                Ok(()) => delivered += 1,
                Err(error) => {
                    tracing::warn!(
                        audience = audience.as_str(),
                        %id,
                        %error,
                        "dropping dead stream"
                    );
                    self.unregister(audience, id);
                }
            }
        }

        delivered
    }

    fn partition(&self, audience: Audience) -> &RwLock<HashMap<Uuid, Arc<dyn EventSink>>> {
        match audience {
            Audience::Web => &self.web,
            Audience::Mobile => &self.mobile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<StreamEvent>>,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.events.lock().len()
        }
    }

    impl EventSink for RecordingSink {
        fn send(&self, event: &StreamEvent) -> anyhow::Result<()> {
            self.events.lock().push(event.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl EventSink for FailingSink {
        fn send(&self, _event: &StreamEvent) -> anyhow::Result<()> {
            anyhow::bail!("connection reset")
        }
    }

    #[test]
    fn failing_sink_is_pruned_without_aborting_delivery() {
        let registry = BroadcastRegistry::new();
        let first = Arc::new(RecordingSink::default());
        let third = Arc::new(RecordingSink::default());

        registry.register(Audience::Mobile, Uuid::new_v4(), first.clone());
        registry.register(Audience::Mobile, Uuid::new_v4(), Arc::new(FailingSink));
        registry.register(Audience::Mobile, Uuid::new_v4(), third.clone());

        let delivered = registry.broadcast(Audience::Mobile, &StreamEvent::connected());

        assert_eq!(delivered, 2);
        assert_eq!(first.count(), 1);
        assert_eq!(third.count(), 1);
        assert_eq!(registry.size(Audience::Mobile), 2);
    }

    #[test]
    fn partitions_are_independent() {
        let registry = BroadcastRegistry::new();
        let web = Arc::new(RecordingSink::default());
        registry.register(Audience::Web, Uuid::new_v4(), web.clone());

        let delivered = registry.broadcast(Audience::Mobile, &StreamEvent::connected());

        assert_eq!(delivered, 0);
        assert_eq!(web.count(), 0);
        assert_eq!(registry.size(Audience::Web), 1);
        assert_eq!(registry.size(Audience::Mobile), 0);
    }

    #[test]
    fn unregister_removes_a_single_connection() {
        let registry = BroadcastRegistry::new();
        let id = Uuid::new_v4();
        registry.register(Audience::Web, id, Arc::new(RecordingSink::default()));
        registry.register(
            Audience::Web,
            Uuid::new_v4(),
            Arc::new(RecordingSink::default()),
        );

        registry.unregister(Audience::Web, id);

        assert_eq!(registry.size(Audience::Web), 1);
    }

    #[test]
    fn broadcast_to_an_empty_partition_is_a_noop() {
        let registry = BroadcastRegistry::new();
        assert_eq!(
            registry.broadcast(Audience::Web, &StreamEvent::connected()),
            0
        );
    }
}
