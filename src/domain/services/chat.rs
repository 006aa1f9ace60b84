//! Chat turn state machine
//!
//! `Idle → Sending → Streaming → Done`, with `Error` reachable from `Sending`
//! and `Streaming`. Only one turn can be in flight; the transcript rejects a
//! submit while a reply is pending regardless of what the view disables.

use futures::StreamExt;
use thiserror::Error;

use crate::domain::models::{ChatMessage, ChatRequest, ChatRole, ChatSession};
use crate::domain::services::api::PortalApi;
use crate::domain::services::render::render_or_plain;
use crate::shared::errors::ApiError;
use crate::shared::logging;

pub const CONNECTION_ERROR: &str = "Error de conexión al intentar procesar tu consulta.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    Idle,
    Sending,
    Streaming,
    Done,
    Error,
}

impl ChatPhase {
    /// Input and send control are disabled while busy
    pub fn is_busy(&self) -> bool {
        matches!(self, ChatPhase::Sending | ChatPhase::Streaming)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("Empty query")]
    EmptyInput,

    #[error("A reply is still in progress")]
    InFlight,
}

/// Progress of one request, fed to [`ChatTranscript::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Successful response headers, body about to stream
    Opened,
    Chunk(String),
    Finished,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    phase: ChatPhase,
    accumulated: String,
    reply_id: Option<u64>,
    reply_renders: u32,
    next_id: u64,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, role: ChatRole, content: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.messages.push(ChatMessage::new(self.next_id, role, content));
        self.next_id
    }

    fn remove_loading(&mut self) {
        self.messages.retain(|m| !m.is_loading());
    }

    fn reply_mut(&mut self) -> Option<&mut ChatMessage> {
        let id = self.reply_id?;
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// `Idle → Sending`: append the user message and a loading placeholder
    pub fn begin(&mut self, input: &str, thread_id: &str) -> Result<ChatRequest, SubmitRejected> {
        if self.phase.is_busy() {
            return Err(SubmitRejected::InFlight);
        }
        let query = input.trim();
        if query.is_empty() {
            return Err(SubmitRejected::EmptyInput);
        }

        self.push(ChatRole::User, query);
        self.push(ChatRole::Loading, "");
        self.accumulated.clear();
        self.reply_id = None;
        self.reply_renders = 0;
        self.phase = ChatPhase::Sending;

        Ok(ChatRequest::new(query, thread_id))
    }

    pub fn apply(&mut self, event: ChatEvent) {
        match (self.phase, event) {
            (ChatPhase::Sending, ChatEvent::Opened) => {
                self.remove_loading();
                let id = self.push(ChatRole::System, "");
                self.reply_id = Some(id);
                self.phase = ChatPhase::Streaming;
            }
            (ChatPhase::Streaming, ChatEvent::Chunk(chunk)) => {
                self.accumulated.push_str(&chunk);
                logging::log_chat_chunk(chunk.len(), self.accumulated.len());
                // Full re-render from the whole accumulator on every chunk
                let content = self.accumulated.clone();
                let html = render_or_plain(&content);
                if let Some(reply) = self.reply_mut() {
                    reply.content = content;
                    reply.html = Some(html);
                }
                self.reply_renders += 1;
            }
            (ChatPhase::Streaming, ChatEvent::Finished) => {
                logging::log_chat_finished(self.accumulated.len());
                self.phase = ChatPhase::Done;
            }
            (ChatPhase::Sending, ChatEvent::Failed(error)) => {
                logging::log_chat_error(&error.to_string(), false);
                self.remove_loading();
                self.push(ChatRole::Error, request_error_text(&error));
                self.phase = ChatPhase::Error;
            }
            (ChatPhase::Streaming, ChatEvent::Failed(error)) => {
                logging::log_chat_error(&error.to_string(), true);
                if let Some(reply) = self.reply_mut() {
                    reply.role = ChatRole::Error;
                    reply.content = CONNECTION_ERROR.to_string();
                    reply.rendered_as_markdown = false;
                    reply.html = None;
                }
                self.phase = ChatPhase::Error;
            }
            (phase, event) => {
                tracing::warn!("Ignoring chat event {:?} in phase {:?}", event, phase);
            }
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Reply text received so far in the current turn
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Number of full re-renders of the current reply
    pub fn reply_renders(&self) -> u32 {
        self.reply_renders
    }
}

/// Message for a request that failed before any body arrived
fn request_error_text(error: &ApiError) -> String {
    match error {
        ApiError::HttpError { message, .. } => format!("Error: {}", message),
        _ => CONNECTION_ERROR.to_string(),
    }
}

/// Drive one request: open the stream and forward each chunk as an event
pub async fn stream_reply<A, F>(api: &A, request: &ChatRequest, mut apply: F)
where
    A: PortalApi + ?Sized,
    F: FnMut(ChatEvent),
{
    let mut stream = match api.open_chat(request).await {
        Ok(stream) => stream,
        Err(e) => {
            apply(ChatEvent::Failed(e));
            return;
        }
    };
    apply(ChatEvent::Opened);

    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) if chunk.is_empty() => continue,
            Ok(chunk) => apply(ChatEvent::Chunk(chunk)),
            Err(e) => {
                apply(ChatEvent::Failed(e));
                return;
            }
        }
    }
    apply(ChatEvent::Finished);
}

/// Transcript bound to the client's conversation identity
#[derive(Debug, Clone, PartialEq)]
pub struct ChatController {
    session: ChatSession,
    transcript: ChatTranscript,
}

impl ChatController {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            transcript: ChatTranscript::new(),
        }
    }

    pub fn submit(&mut self, input: &str) -> Result<ChatRequest, SubmitRejected> {
        let request = self.transcript.begin(input, &self.session.thread_id)?;
        logging::log_chat_submit(&request.thread_id, request.consulta.len());
        Ok(request)
    }

    pub fn apply(&mut self, event: ChatEvent) {
        self.transcript.apply(event);
    }

    /// Submit `input` and stream the reply to completion
    pub async fn send<A: PortalApi + ?Sized>(
        &mut self,
        api: &A,
        input: &str,
    ) -> Result<(), SubmitRejected> {
        let request = self.submit(input)?;
        stream_reply(api, &request, |event| self.transcript.apply(event)).await;
        Ok(())
    }

    pub fn thread_id(&self) -> &str {
        &self.session.thread_id
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }
}
