//! Server-sent event streams for settings synchronization
//!
//! Each connection owns an unbounded channel; the registry holds the send
//! half as a sink and the response streams the receive half. A dead client
//! is noticed either by the stream guard dropping or by the next broadcast
//! failing to send.

use super::mapper;
use crate::contract::{MobileSettings, SettingsError, Snapshot};
use crate::domain::{
    Audience, BroadcastRegistry, EventSink, Service, StreamEvent, UpdatePublisher,
};
use axum::{
    response::sse::{Event, KeepAlive, Sse},
    Extension,
};
use futures::Stream;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;

/// Sink writing into one client's event channel
///
/// The send fails once the receiving stream is gone, which is how a dead
/// connection is detected and pruned.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StreamEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<StreamEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn send(&self, event: &StreamEvent) -> anyhow::Result<()> {
        self.tx
            .send(event.clone())
            .map_err(|_| anyhow::anyhow!("stream channel closed"))
    }
}

/// Publisher that fans fresh settings out to every open stream
pub struct SseUpdatePublisher {
    registry: Arc<BroadcastRegistry>,
}

impl SseUpdatePublisher {
    pub fn new(registry: Arc<BroadcastRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait::async_trait]
impl UpdatePublisher for SseUpdatePublisher {
    async fn publish(&self, snapshot: &Snapshot, mobile: &MobileSettings) -> anyhow::Result<()> {
        let web_event = StreamEvent::settings_update(mapper::snapshot_to_json(snapshot));
        let mobile_event = StreamEvent::settings_update(mapper::mobile_to_json(mobile));

        let web = self.registry.broadcast(Audience::Web, &web_event);
        let mobile = self.registry.broadcast(Audience::Mobile, &mobile_event);
        tracing::debug!(web, mobile, "settings update broadcast");

        Ok(())
    }
}

/// Event stream for one client; unregisters itself when the connection
/// closes
struct ClientStream {
    events: UnboundedReceiverStream<StreamEvent>,
    registry: Arc<BroadcastRegistry>,
    audience: Audience,
    id: Uuid,
}

impl Stream for ClientStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        Pin::new(&mut this.events)
            .poll_next(cx)
            .map(|event| event.map(|event| Ok(encode(&event))))
    }
}

impl Drop for ClientStream {
    fn drop(&mut self) {
        self.registry.unregister(self.audience, self.id);
    }
}

fn encode(event: &StreamEvent) -> Event {
    match Event::default().json_data(event) {
        Ok(encoded) => encoded,
        Err(error) => {
            tracing::error!(%error, "failed to encode stream event");
            Event::default()
        }
    }
}

/// SSE stream carrying canonical snapshots to the admin UI
pub async fn stream_web_settings(
    Extension(service): Extension<Arc<Service>>,
    Extension(registry): Extension<Arc<BroadcastRegistry>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    open_stream(service, registry, Audience::Web).await
}

/// SSE stream carrying mobile-shaped settings to the app
pub async fn stream_mobile_settings(
    Extension(service): Extension<Arc<Service>>,
    Extension(registry): Extension<Arc<BroadcastRegistry>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    open_stream(service, registry, Audience::Mobile).await
}

async fn open_stream(
    service: Arc<Service>,
    registry: Arc<BroadcastRegistry>,
    audience: Audience,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let id = Uuid::new_v4();
    registry.register(audience, id, Arc::new(ChannelSink::new(tx.clone())));
    tracing::info!(audience = audience.as_str(), %id, "settings stream connected");

    // Initial events go through the same channel the broadcasts use; a
    // failed snapshot read keeps the stream open without initial data.
    let _ = tx.send(StreamEvent::connected());
    match initial_payload(&service, audience).await {
        Ok(data) => {
            let _ = tx.send(StreamEvent::settings_update(data));
        }
        Err(error) => {
            tracing::warn!(%error, audience = audience.as_str(), "failed to send initial settings");
        }
    }

    let stream = ClientStream {
        events: UnboundedReceiverStream::new(rx),
        registry,
        audience,
        id,
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn initial_payload(
    service: &Service,
    audience: Audience,
) -> Result<serde_json::Value, SettingsError> {
    match audience {
        Audience::Web => Ok(mapper::snapshot_to_json(&service.settings().await?)),
        Audience::Mobile => Ok(mapper::mobile_to_json(&service.mobile_settings().await?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_fails_once_the_receiver_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);

        assert!(sink.send(&StreamEvent::connected()).is_ok());

        drop(rx);
        assert!(sink.send(&StreamEvent::connected()).is_err());
    }

    #[test]
    fn dead_channel_is_pruned_by_the_next_broadcast() {
        let registry = BroadcastRegistry::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(Audience::Web, Uuid::new_v4(), Arc::new(ChannelSink::new(tx)));
        drop(rx);

        let delivered = registry.broadcast(Audience::Web, &StreamEvent::connected());

        assert_eq!(delivered, 0);
        assert_eq!(registry.size(Audience::Web), 0);
    }
}
