//! HTTP API serving the assistant over REST and server-sent events

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use routes::app;
pub use server::serve_api;
