//! Gemini LLM Gateway implementation

use crate::gemini::client::{GeminiClient, GeminiOptions};
use crate::gemini::error::Result;
use crate::gemini::session::GeminiSession;
use parley_application::ports::llm_gateway::{LlmGateway, LlmSession};
use parley_domain::{Credential, Model, SystemInstruction};
use std::sync::Arc;
use tracing::info;

/// LLM Gateway backed by the Gemini REST API.
///
/// Holds one authenticated client; every session shares it.
pub struct GeminiLlmGateway {
    client: Arc<GeminiClient>,
}

impl GeminiLlmGateway {
    /// Create a gateway. The credential is not checked until the first send.
    pub fn new(credential: Credential, options: GeminiOptions) -> Result<Self> {
        let client = GeminiClient::new(credential, options)?;
        info!("GeminiLlmGateway initialized ({})", client.base_url());
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

impl LlmGateway for GeminiLlmGateway {
    fn create_session(
        &self,
        model: &Model,
        system_instruction: &SystemInstruction,
    ) -> Arc<dyn LlmSession> {
        info!("Creating session with model: {}", model);
        Arc::new(GeminiSession::new(
            Arc::clone(&self.client),
            model.clone(),
            system_instruction.clone(),
        ))
    }
}
