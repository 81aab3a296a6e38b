// src/coach/mod.rs
//! Stateless facade translating coaching intents into generation calls.
//!
//! Holds no session state: every call receives its full context (snapshot,
//! mood, tone, history) from the caller, and every backend failure
//! propagates unchanged. Ephemeral chat transcripts belong to the caller,
//! never to the profile store.

use tracing::debug;

use crate::config::CoachConfig;
use crate::error::Result;
use crate::llm::{ChunkStream, GeminiClient, GenerationProvider};
use crate::profile::Profile;
use crate::prompt::builder;

/// One turn of conversation history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Thin wrapper around a generation backend for coaching patterns.
pub struct CoachClient {
    provider: Box<dyn GenerationProvider>,
}

impl CoachClient {
    /// Builds a coach backed by the Gemini API. Fails fast on unusable
    /// configuration, before any generation call is attempted.
    pub fn new(config: &CoachConfig) -> Result<Self> {
        Ok(Self {
            provider: Box::new(GeminiClient::new(config)?),
        })
    }

    /// Builds a coach over any generation backend. Seam for tests and
    /// alternative services.
    pub fn with_provider(provider: Box<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    /// 2-3 sentence progress summary referencing the snapshot's skills.
    /// Always motivational, whatever tone the caller otherwise prefers.
    pub async fn generate_summary(&self, snapshot: &Profile) -> Result<String> {
        let prompt = builder::summary_prompt(snapshot);
        debug!("Requesting summary ({} prompt chars)", prompt.len());
        self.provider.generate(&prompt).await
    }

    /// Streams a chat reply. The service holds no multi-turn state, so the
    /// whole history is replayed each call. The returned stream is lazy,
    /// finite, and safe to abandon early; the caller concatenates chunks
    /// for display and persistence.
    pub async fn stream_chat(
        &self,
        history: &[ChatMessage],
        mood: &str,
        tone: &str,
        snapshot: &Profile,
    ) -> Result<ChunkStream> {
        let prompt = builder::chat_prompt(history, mood, tone, snapshot);
        debug!("Starting chat stream ({} history turns)", history.len());
        self.provider.stream_generate(&prompt).await
    }

    /// Short structured exercise: quiz, scenario, or challenge.
    pub async fn generate_simulation(&self, topic: &str, mode: &str) -> Result<String> {
        self.provider
            .generate(&builder::simulation_prompt(topic, mode))
            .await
    }

    /// 6-8 sentence optimistic narrative with three milestones.
    pub async fn generate_vision(&self, snapshot: &Profile) -> Result<String> {
        self.provider
            .generate(&builder::vision_prompt(snapshot))
            .await
    }
}
