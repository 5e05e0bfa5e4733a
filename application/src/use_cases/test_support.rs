//! Scripted gateway and recording sink shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle};
use crate::ports::turn_sink::{TurnError, TurnSink};
use async_trait::async_trait;
use parley_domain::{History, Model, StreamEvent, SystemInstruction};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted outcome for one send
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Stream these chunks, then complete
    Reply(Vec<&'static str>),
    /// Fail before streaming starts
    Reject(GatewayError),
    /// Stream these chunks, then fail mid-stream
    BreakAfter(Vec<&'static str>, &'static str),
    /// Stream these chunks, then drop the channel without a terminal event
    Truncate(Vec<&'static str>),
}

/// Mock session that plays scripted outcomes in order
pub struct ScriptedSession {
    model: Model,
    instruction: SystemInstruction,
    script: Mutex<VecDeque<Scripted>>,
    history: Mutex<History>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedSession {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            model: Model::default(),
            instruction: SystemInstruction::default(),
            script: Mutex::new(script.into()),
            history: Mutex::new(History::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages that reached the session, in order
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn next(&self) -> Scripted {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Scripted::Reply(vec!["(no more responses)"]))
    }
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    fn system_instruction(&self) -> &SystemInstruction {
        &self.instruction
    }

    fn history(&self) -> History {
        self.history.lock().unwrap().clone()
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.send_streaming(content).await?.collect_text().await
    }

    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        self.sent.lock().unwrap().push(content.to_string());
        let (tx, rx) = mpsc::channel(64);
        match self.next() {
            Scripted::Reject(e) => return Err(e),
            Scripted::Reply(chunks) => {
                let full: String = chunks.concat();
                for chunk in chunks {
                    tx.send(StreamEvent::Delta(chunk.to_string())).await.unwrap();
                }
                self.history
                    .lock()
                    .unwrap()
                    .record_exchange(content, full.clone());
                tx.send(StreamEvent::Completed(full)).await.unwrap();
            }
            Scripted::BreakAfter(chunks, message) => {
                for chunk in chunks {
                    tx.send(StreamEvent::Delta(chunk.to_string())).await.unwrap();
                }
                tx.send(StreamEvent::Error(message.to_string())).await.unwrap();
            }
            Scripted::Truncate(chunks) => {
                for chunk in chunks {
                    tx.send(StreamEvent::Delta(chunk.to_string())).await.unwrap();
                }
            }
        }
        Ok(StreamHandle::new(rx))
    }
}

/// Gateway handing out fresh scripted sessions and counting constructions
pub struct ScriptedGateway {
    script: Vec<Scripted>,
    created: Mutex<usize>,
}

impl ScriptedGateway {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script,
            created: Mutex::new(0),
        }
    }

    pub fn created(&self) -> usize {
        *self.created.lock().unwrap()
    }
}

impl LlmGateway for ScriptedGateway {
    fn create_session(
        &self,
        _model: &Model,
        _system_instruction: &SystemInstruction,
    ) -> Arc<dyn LlmSession> {
        *self.created.lock().unwrap() += 1;
        Arc::new(ScriptedSession::new(self.script.clone()))
    }
}

/// What a [`RecordingSink`] saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    User(String),
    Chunk(String),
    Complete(String),
    Error { message: String, partial: String },
}

/// Sink that records every UI update
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Rendered>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Rendered> {
        self.events.lock().unwrap().clone()
    }

    /// Assistant text as progressively revealed after each chunk
    pub fn reveals(&self) -> Vec<String> {
        let mut shown = String::new();
        let mut out = Vec::new();
        for event in self.events() {
            if let Rendered::Chunk(c) = event {
                shown.push_str(&c);
                out.push(shown.clone());
            }
        }
        out
    }
}

impl TurnSink for RecordingSink {
    fn on_user_turn(&self, text: &str) {
        self.events.lock().unwrap().push(Rendered::User(text.to_string()));
    }

    fn on_assistant_chunk(&self, chunk: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Rendered::Chunk(chunk.to_string()));
    }

    fn on_assistant_complete(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Rendered::Complete(text.to_string()));
    }

    fn on_turn_error(&self, error: &TurnError, partial: &str) {
        self.events.lock().unwrap().push(Rendered::Error {
            message: error.to_string(),
            partial: partial.to_string(),
        });
    }
}
