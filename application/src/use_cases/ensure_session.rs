//! Ensure Session use case.
//!
//! Every UI session owns a [`SessionSlot`]. The first time the UI needs the
//! chat session the slot is filled from the gateway; afterwards the same
//! session is handed back, so history survives page refreshes.

use crate::config::ChatSettings;
use crate::ports::llm_gateway::{LlmGateway, LlmSession};
use std::sync::Arc;
use tracing::info;

/// Per-UI-session holder of at most one chat session.
#[derive(Default)]
pub struct SessionSlot {
    session: Option<Arc<dyn LlmSession>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session, if one was created already
    pub fn get(&self) -> Option<Arc<dyn LlmSession>> {
        self.session.clone()
    }

    pub fn is_occupied(&self) -> bool {
        self.session.is_some()
    }

    /// Drop the session; the next `ensure` starts a fresh conversation.
    pub fn clear(&mut self) -> Option<Arc<dyn LlmSession>> {
        self.session.take()
    }
}

/// Use case implementing the idempotent get-or-create of a chat session.
pub struct EnsureSessionUseCase {
    gateway: Arc<dyn LlmGateway>,
    settings: ChatSettings,
}

impl Clone for EnsureSessionUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl EnsureSessionUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, settings: ChatSettings) -> Self {
        Self { gateway, settings }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Return the slot's session, creating it on first use.
    ///
    /// Construction never re-runs for an occupied slot: that would reset the
    /// history.
    pub fn execute(&self, slot: &mut SessionSlot) -> Arc<dyn LlmSession> {
        if let Some(session) = &slot.session {
            return Arc::clone(session);
        }

        info!("Creating chat session with model: {}", self.settings.model);
        let session = self
            .gateway
            .create_session(&self.settings.model, &self.settings.system_instruction);
        slot.session = Some(Arc::clone(&session));
        session
    }
}
