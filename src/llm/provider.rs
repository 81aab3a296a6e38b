// src/llm/provider.rs
//! Provider seam for text-generation backends.
//!
//! One trait, two call modes: a single complete response, or an
//! incrementally streamed one. The coach facade only ever talks to this
//! trait, so tests and alternative services slot in underneath it.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::Result;

/// A lazy, finite, non-restartable sequence of generated text chunks.
///
/// The underlying connection is owned by the stream: a consumer that stops
/// early and drops the stream releases it. A mid-stream failure arrives as
/// an `Err` item terminating the sequence, never as silent truncation.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates a single complete response for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Starts a streamed generation for `prompt`.
    async fn stream_generate(&self, prompt: &str) -> Result<ChunkStream>;
}
