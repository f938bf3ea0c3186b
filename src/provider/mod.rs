// src/provider/mod.rs — Completion client layer

pub mod bedrock;
pub mod media;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;

use crate::infra::errors::DraftmillError;

pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<TextChunk, DraftmillError>> + Send>>;

/// Core trait the coordination patterns program against: send a structured
/// prompt, receive generated text. Implementations own transport concerns
/// (endpoints, signing, throttling surfaces).
#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn id(&self) -> &str;

    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, DraftmillError>;

    async fn complete_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<ChunkStream, DraftmillError>;

    /// Complete with an assistant prefill and return `prefill + continuation`,
    /// so callers biasing output toward a structural prefix (a forced JSON
    /// array opener, say) never reassemble the two halves themselves.
    async fn complete_with_prefill(
        &self,
        request: CompletionRequest,
    ) -> Result<String, DraftmillError> {
        let prefill = request.prefill.clone().unwrap_or_default();
        let response = self.complete(request).await?;
        Ok(format!("{}{}", prefill, response.text))
    }

    /// Drive the streaming variant, invoking `on_chunk` synchronously per
    /// text delta. Returns the full concatenation once the stream ends.
    async fn stream_with_callback(
        &self,
        request: CompletionRequest,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String, DraftmillError> {
        let mut stream = self.complete_stream(request).await?;
        let mut full = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if !chunk.delta.is_empty() {
                on_chunk(&chunk.delta);
                full.push_str(&chunk.delta);
            }
        }
        Ok(full)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub system: Option<String>,
    /// Sampling temperature in [0, 1].
    pub temperature: f32,
    /// Partial assistant response; the call returns only the continuation.
    pub prefill: Option<String>,
}

impl CompletionRequest {
    /// Single user text message at temperature 0.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            system: None,
            temperature: 0.0,
            prefill: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_prefill(mut self, prefill: impl Into<String>) -> Self {
        self.prefill = Some(prefill.into());
        self
    }

    /// Attach media to the last user message (creating one if needed).
    pub fn with_media(mut self, attachment: media::MediaAttachment) -> Self {
        let block = attachment.into_block();
        match self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == Role::User)
        {
            Some(message) => message.content.push(block),
            None => self.messages.push(Message {
                role: Role::User,
                content: vec![block],
            }),
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone)]
pub struct TextChunk {
    pub delta: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text(text.into())],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::Text(text.into())],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One ordered element of a message: text, or media bytes tagged with the
/// format string detected from the source file extension.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    Image { format: String, bytes: Vec<u8> },
    Video { format: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}
