//! Domain layer for parley
//!
//! This crate contains the conversation entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Session**: one conversation bound to a [`Model`] and a
//!   [`SystemInstruction`], owning an append-only [`History`] of [`Turn`]s
//! - **Turn**: a role-tagged message, either [`Role::User`] or [`Role::Assistant`]
//! - **Stream Chunk**: a [`StreamEvent::Delta`] of an in-flight reply

pub mod core;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{
    credential::Credential,
    error::DomainError,
    instruction::{DEFAULT_SYSTEM_INSTRUCTION, SystemInstruction},
    message::UserMessage,
    model::Model,
};
pub use session::{
    entities::{History, Role, Turn},
    stream::StreamEvent,
};
