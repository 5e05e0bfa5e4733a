//! Gemini REST adapter
//!
//! Implements LlmGateway against the Gemini `generateContent` and
//! `streamGenerateContent` endpoints.

pub mod client;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;
pub mod sse;

#[cfg(test)]
pub(crate) mod mock_server;
