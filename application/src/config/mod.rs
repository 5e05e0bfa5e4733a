//! Application-level configuration.
//!
//! - [`ChatSettings`] - the model and instruction every new session is bound to

pub mod chat_settings;

pub use chat_settings::ChatSettings;
