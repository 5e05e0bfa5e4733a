//! Conversation session domain.
//!
//! - [`entities::Turn`] - a single role-tagged message
//! - [`entities::History`] - the append-only turn sequence of one session
//! - [`stream::StreamEvent`] - incremental events of an in-flight reply

pub mod entities;
pub mod stream;
