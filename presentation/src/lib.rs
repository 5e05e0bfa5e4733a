//! Presentation layer for parley
//!
//! This crate contains CLI definitions and the browser chat UI
//! (HTML page, JSON/SSE API and the server that hosts them).

pub mod cli;
pub mod web;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use web::error::ApiError;
pub use web::server::ChatServer;
pub use web::sse::{SseTurnSink, TurnEvent};
pub use web::state::{ChatState, UiSession, UiSessionStore};
