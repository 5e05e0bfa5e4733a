//! Browser chat UI
//!
//! One page at `/`, backed by a small JSON API. Replies stream to the page
//! as server-sent events while the turn runs.

pub mod error;
pub mod page;
pub mod routes;
pub mod server;
pub mod sse;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
