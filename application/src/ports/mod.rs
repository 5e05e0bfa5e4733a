//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod credential_source;
pub mod llm_gateway;
pub mod turn_sink;
