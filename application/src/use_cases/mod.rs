//! Application use cases
//!
//! Use cases orchestrate domain logic and coordinate with external systems
//! through ports.

pub mod ensure_session;
pub mod handle_input;
pub mod render_history;
pub mod resolve_credential;

#[cfg(test)]
pub(crate) mod test_support;
