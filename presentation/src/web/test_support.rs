//! Scripted gateway for route tests.

use async_trait::async_trait;
use parley_application::{GatewayError, LlmGateway, LlmSession, StreamHandle};
use parley_domain::{History, Model, StreamEvent, SystemInstruction};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, mpsc};

/// One scripted reply.
#[derive(Clone)]
pub enum FakeReply {
    Chunks(Vec<&'static str>),
    /// Like `Chunks`, but completes only once the gate is notified
    Gated(Vec<&'static str>, Arc<Notify>),
    Reject(GatewayError),
}

/// Every session it creates plays the same script.
pub struct FakeGateway {
    script: Vec<FakeReply>,
}

impl FakeGateway {
    pub fn new(script: Vec<FakeReply>) -> Self {
        Self { script }
    }
}

impl LlmGateway for FakeGateway {
    fn create_session(
        &self,
        model: &Model,
        system_instruction: &SystemInstruction,
    ) -> Arc<dyn LlmSession> {
        Arc::new(FakeSession {
            model: model.clone(),
            system_instruction: system_instruction.clone(),
            script: Mutex::new(self.script.clone().into()),
            history: Arc::default(),
        })
    }
}

struct FakeSession {
    model: Model,
    system_instruction: SystemInstruction,
    script: Mutex<VecDeque<FakeReply>>,
    history: Arc<Mutex<History>>,
}

#[async_trait]
impl LlmSession for FakeSession {
    fn model(&self) -> &Model {
        &self.model
    }

    fn system_instruction(&self) -> &SystemInstruction {
        &self.system_instruction
    }

    fn history(&self) -> History {
        self.history.lock().unwrap().clone()
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.send_streaming(content).await?.collect_text().await
    }

    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        let (chunks, gate) = match reply {
            FakeReply::Chunks(chunks) => (chunks, None),
            FakeReply::Gated(chunks, gate) => (chunks, Some(gate)),
            FakeReply::Reject(error) => return Err(error),
        };

        let (tx, rx) = mpsc::channel(16);
        let history = Arc::clone(&self.history);
        let user = content.to_string();
        tokio::spawn(async move {
            for chunk in &chunks {
                let _ = tx.send(StreamEvent::Delta(chunk.to_string())).await;
            }
            if let Some(gate) = gate {
                gate.notified().await;
            }
            let reply = chunks.concat();
            history.lock().unwrap().record_exchange(user, reply.clone());
            let _ = tx.send(StreamEvent::Completed(reply)).await;
        });
        Ok(StreamHandle::new(rx))
    }
}
