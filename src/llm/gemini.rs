// src/llm/gemini.rs
// Gemini generateContent client.
//
// Complete responses go through generateContent; streamed responses use
// streamGenerateContent with SSE framing, parsed line by line. No retry,
// no backoff, no caching: a service failure is an immediate failure here.

use std::time::Duration;

use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CoachConfig;
use crate::error::{CoachError, Result};
use crate::llm::provider::{ChunkStream, GenerationProvider};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Builds a client from validated configuration. The key was checked at
    /// config load; the guard here keeps a hand-built config honest too.
    pub fn new(config: &CoachConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(CoachError::Configuration(
                "GEMINI_API_KEY is not set".into(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.request_timeout),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        )
    }

    fn stream_url(&self) -> String {
        format!(
            "{GEMINI_API_BASE}/{}:streamGenerateContent?key={}&alt=sse",
            self.model, self.api_key
        )
    }

    fn request_body(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiTextPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    parts: Option<Vec<GeminiPartResponse>>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(self.generate_url())
            .json(&Self::request_body(prompt))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::Generation(format!(
                "Gemini API error: {status} - {body}"
            )));
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| CoachError::Generation(format!("malformed Gemini response: {e}")))?;

        if let Some(error) = api_response.error {
            return Err(CoachError::Generation(format!(
                "Gemini error: {}",
                error.message
            )));
        }

        let mut text = String::new();
        if let Some(candidate) = api_response.candidates.unwrap_or_default().into_iter().next() {
            if let Some(content) = candidate.content {
                for part in content.parts.unwrap_or_default() {
                    if let Some(t) = part.text {
                        text.push_str(&t);
                    }
                }
            }
        }

        // An empty success would mislead the caller into thinking the
        // request produced content.
        if text.is_empty() {
            return Err(CoachError::Generation(
                "Gemini returned no candidate text".into(),
            ));
        }
        debug!("Gemini response: {} chars", text.len());
        Ok(text)
    }

    async fn stream_generate(&self, prompt: &str) -> Result<ChunkStream> {
        let response = self
            .client
            .post(self.stream_url())
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::Generation(format!(
                "Gemini API error: {status} - {body}"
            )));
        }

        Ok(sse_chunk_stream(response))
    }
}

// ============================================================================
// SSE Parsing
// ============================================================================

/// What one parsed `data:` frame contributed.
#[derive(Debug)]
enum StreamFrame {
    /// Incremental candidate text.
    Text(String),
    /// The frame carried a finish marker, possibly with trailing text.
    Finish(Option<String>),
}

/// Parses one SSE data payload.
///
/// A frame that parses but carries neither candidate text nor a finish
/// marker is a protocol violation and surfaces as a generation error rather
/// than being skipped.
fn parse_stream_frame(json_str: &str) -> Result<StreamFrame> {
    let frame: GeminiResponse = serde_json::from_str(json_str)
        .map_err(|e| CoachError::Generation(format!("unparseable stream frame: {e}")))?;

    if let Some(error) = frame.error {
        return Err(CoachError::Generation(format!(
            "Gemini error: {}",
            error.message
        )));
    }

    let mut text = String::new();
    let mut finished = false;
    for candidate in frame.candidates.unwrap_or_default() {
        if candidate.finish_reason.is_some() {
            finished = true;
        }
        if let Some(content) = candidate.content {
            for part in content.parts.unwrap_or_default() {
                if let Some(t) = part.text {
                    text.push_str(&t);
                }
            }
        }
    }

    if finished {
        let tail = if text.is_empty() { None } else { Some(text) };
        return Ok(StreamFrame::Finish(tail));
    }
    if text.is_empty() {
        return Err(CoachError::Generation(
            "stream frame carried no candidate text".into(),
        ));
    }
    Ok(StreamFrame::Text(text))
}

/// Wraps a streaming response in a chunk stream. The response is owned by
/// the stream, so a consumer that stops early drops the connection with it.
fn sse_chunk_stream(response: reqwest::Response) -> ChunkStream {
    Box::pin(try_stream! {
        let mut body = response.bytes_stream();
        let mut buffer = String::new();
        let mut done = false;

        while !done {
            let chunk = match body.next().await {
                Some(chunk) => chunk,
                None => break,
            };
            let chunk = chunk
                .map_err(|e| CoachError::Generation(format!("stream transport error: {e}")))?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer = buffer[line_end + 1..].to_string();

                if line.is_empty() {
                    continue;
                }
                let Some(json_str) = line.strip_prefix("data: ") else {
                    continue;
                };
                match parse_stream_frame(json_str)? {
                    StreamFrame::Text(text) => {
                        yield text;
                    }
                    StreamFrame::Finish(tail) => {
                        if let Some(text) = tail {
                            yield text;
                        }
                        done = true;
                        break;
                    }
                }
            }
        }
    })
}
