//! Gemini chat session.
//!
//! Provides [`GeminiSession`], which implements [`LlmSession`] by replaying
//! the recorded contents with every request (the REST API is stateless).

use crate::gemini::client::GeminiClient;
use crate::gemini::error::{GeminiError, Result};
use crate::gemini::protocol::{
    Content, GenerateContentRequest, GenerateContentResponse, StreamFrame,
};
use crate::gemini::sse::SseDecoder;
use async_trait::async_trait;
use futures::StreamExt;
use parley_application::ports::llm_gateway::{GatewayError, LlmSession, StreamHandle};
use parley_domain::util::preview;
use parley_domain::{History, Model, StreamEvent, SystemInstruction};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const STREAM_CHANNEL_CAPACITY: usize = 64;

type Contents = Arc<Mutex<Vec<Content>>>;

/// One conversation with a Gemini model.
///
/// Contents are only appended after a reply completes, so a failed request
/// leaves the history as it was.
pub struct GeminiSession {
    client: Arc<GeminiClient>,
    model: Model,
    system_instruction: SystemInstruction,
    contents: Contents,
}

impl GeminiSession {
    pub fn new(
        client: Arc<GeminiClient>,
        model: Model,
        system_instruction: SystemInstruction,
    ) -> Self {
        Self {
            client,
            model,
            system_instruction,
            contents: Arc::default(),
        }
    }

    /// Recorded contents plus the pending user message.
    fn pending_contents(&self, user: &Content) -> Vec<Content> {
        let mut contents = lock(&self.contents).clone();
        contents.push(user.clone());
        contents
    }

    fn request<'a>(&self, contents: &'a [Content]) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents,
            system_instruction: Content::instruction(self.system_instruction.text()),
        }
    }

    /// Non-streaming exchange.
    pub async fn generate(&self, content: &str) -> Result<String> {
        let user = Content::user(content);
        let contents = self.pending_contents(&user);
        let url = self.client.generate_url(&self.model);

        let response: GenerateContentResponse = self
            .client
            .post(&url, &self.request(&contents))
            .await?
            .json()
            .await?;

        let reply = response.text();
        if reply.is_empty()
            && let Some(reason) = response.block_reason()
        {
            return Err(GeminiError::Blocked(reason.to_string()));
        }

        record(&self.contents, user, &reply);
        Ok(reply)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    fn system_instruction(&self) -> &SystemInstruction {
        &self.system_instruction
    }

    fn history(&self) -> History {
        lock(&self.contents).iter().map(Content::to_turn).collect()
    }

    async fn send(&self, content: &str) -> std::result::Result<String, GatewayError> {
        Ok(self.generate(content).await?)
    }

    async fn send_streaming(
        &self,
        content: &str,
    ) -> std::result::Result<StreamHandle, GatewayError> {
        let user = Content::user(content);
        let contents = self.pending_contents(&user);
        let url = self.client.stream_url(&self.model);

        info!("Streaming from {} ({} contents)", self.model, contents.len());
        let response = self.client.post(&url, &self.request(&contents)).await?;

        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let history = Arc::clone(&self.contents);

        tokio::spawn(async move {
            let terminal = match pump(response, &tx).await {
                Ok(reply) => {
                    debug!("Stream completed: {}", preview(&reply, 80));
                    record(&history, user, &reply);
                    StreamEvent::Completed(reply)
                }
                Err(e) => {
                    warn!("Stream failed: {}", e);
                    StreamEvent::Error(e.to_string())
                }
            };
            // The consumer may be gone; the exchange is recorded either way
            let _ = tx.send(terminal).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

/// Read the SSE body to the end, forwarding text as deltas. Returns the
/// full reply.
async fn pump(response: reqwest::Response, tx: &mpsc::Sender<StreamEvent>) -> Result<String> {
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();
    let mut reply = String::new();

    while let Some(bytes) = body.next().await {
        for payload in decoder.push(&bytes?) {
            forward(&payload, &mut reply, tx).await?;
        }
    }
    if let Some(payload) = decoder.finish() {
        forward(&payload, &mut reply, tx).await?;
    }

    Ok(reply)
}

async fn forward(
    payload: &str,
    reply: &mut String,
    tx: &mpsc::Sender<StreamEvent>,
) -> Result<()> {
    let frame: StreamFrame =
        serde_json::from_str(payload).map_err(|e| GeminiError::Parse(e.to_string()))?;

    let chunk = match frame {
        StreamFrame::Error(envelope) => {
            let status = envelope.error.code.unwrap_or(500);
            return Err(GeminiError::from_status(status, payload));
        }
        StreamFrame::Chunk(chunk) => chunk,
    };

    let text = chunk.text();
    if text.is_empty() {
        return match chunk.block_reason() {
            Some(reason) => Err(GeminiError::Blocked(reason.to_string())),
            None => Ok(()),
        };
    }

    reply.push_str(&text);
    let _ = tx.send(StreamEvent::Delta(text)).await;
    Ok(())
}

fn record(contents: &Contents, user: Content, reply: &str) {
    let mut contents = lock(contents);
    contents.push(user);
    contents.push(Content::model(reply));
}

fn lock(contents: &Contents) -> std::sync::MutexGuard<'_, Vec<Content>> {
    contents.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
