//! Domain layer - cache, adapters, broadcast and orchestration

pub mod broadcast;
pub mod cache;
pub mod events;
pub mod mapper;
pub mod repository;
pub mod service;

pub use broadcast::{Audience, BroadcastRegistry, EventSink};
pub use cache::SettingsCache;
pub use events::{NoOpUpdatePublisher, StreamEvent, UpdatePublisher};
pub use repository::{ActivityRepository, SettingsRepository};
pub use service::Service;
