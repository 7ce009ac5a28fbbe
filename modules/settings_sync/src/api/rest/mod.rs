//! REST API layer - DTOs, handlers, routes and SSE streaming

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;
pub mod stream;

pub use routes::router;
pub use stream::SseUpdatePublisher;
