//! Application layer for parley
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatSettings;
pub use ports::{
    credential_source::{CredentialLookupError, CredentialSource},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle},
    turn_sink::{NoTurnSink, TurnError, TurnSink},
};
pub use use_cases::ensure_session::{EnsureSessionUseCase, SessionSlot};
pub use use_cases::handle_input::{HandleInputUseCase, TurnOutcome};
pub use use_cases::render_history::{RenderedTurn, render_history};
pub use use_cases::resolve_credential::{
    CREDENTIAL_KEY, CredentialError, ResolveCredentialUseCase,
};
