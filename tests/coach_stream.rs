// Streaming and prompt contract tests for the coach facade, driven through
// a scripted provider instead of the live Gemini API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use neurocoach::coach::{ChatMessage, CoachClient};
use neurocoach::error::{CoachError, Result};
use neurocoach::llm::{ChunkStream, GenerationProvider};
use neurocoach::profile::Profile;

/// Provider that replays a scripted chunk sequence and records every prompt
/// it is handed.
struct ScriptedProvider {
    chunks: Vec<std::result::Result<String, String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    fn new(
        chunks: Vec<std::result::Result<String, String>>,
    ) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                chunks,
                prompts: prompts.clone(),
            },
            prompts,
        )
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("scripted response".to_string())
    }

    async fn stream_generate(&self, prompt: &str) -> Result<ChunkStream> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let items = self.chunks.clone();
        Ok(Box::pin(futures::stream::iter(
            items
                .into_iter()
                .map(|r| r.map_err(CoachError::Generation)),
        )))
    }
}

/// Provider whose stream request itself fails.
struct FailingProvider;

#[async_trait]
impl GenerationProvider for FailingProvider {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(CoachError::Generation("service unavailable".to_string()))
    }

    async fn stream_generate(&self, _prompt: &str) -> Result<ChunkStream> {
        Err(CoachError::Generation("service unavailable".to_string()))
    }
}

fn hello_chunks() -> Vec<std::result::Result<String, String>> {
    vec![
        Ok("Hel".to_string()),
        Ok("lo".to_string()),
        Ok("!".to_string()),
    ]
}

#[tokio::test]
async fn stream_chat_yields_chunks_in_order() {
    let (provider, _prompts) = ScriptedProvider::new(hello_chunks());
    let coach = CoachClient::with_provider(Box::new(provider));

    let history = vec![ChatMessage::new("user", "Hi")];
    let mut stream = coach
        .stream_chat(&history, "curious", "technical", &Profile::seed())
        .await
        .unwrap();

    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.push(chunk.unwrap());
    }
    assert_eq!(collected, vec!["Hel", "lo", "!"]);
    assert_eq!(collected.concat(), "Hello!");
}

#[tokio::test]
async fn stream_chat_can_be_abandoned_early() {
    let (provider, _prompts) = ScriptedProvider::new(hello_chunks());
    let coach = CoachClient::with_provider(Box::new(provider));

    let history = vec![ChatMessage::new("user", "Hi")];
    let mut stream = coach
        .stream_chat(&history, "focused", "motivational", &Profile::seed())
        .await
        .unwrap();

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first, "Hel");
    drop(stream);
}

#[tokio::test]
async fn mid_stream_error_surfaces_instead_of_truncating() {
    let (provider, _prompts) = ScriptedProvider::new(vec![
        Ok("Hel".to_string()),
        Err("connection reset".to_string()),
    ]);
    let coach = CoachClient::with_provider(Box::new(provider));

    let history = vec![ChatMessage::new("user", "Hi")];
    let mut stream = coach
        .stream_chat(&history, "focused", "motivational", &Profile::seed())
        .await
        .unwrap();

    assert_eq!(stream.next().await.unwrap().unwrap(), "Hel");
    let err = stream.next().await.unwrap().unwrap_err();
    match err {
        CoachError::Generation(msg) => assert!(msg.contains("connection reset")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn summary_prompt_forces_motivational_tone() {
    let (provider, prompts) = ScriptedProvider::new(Vec::new());
    let coach = CoachClient::with_provider(Box::new(provider));

    let mut snapshot = Profile::seed();
    snapshot.mood = "stressed".to_string();
    coach.generate_summary(&snapshot).await.unwrap();

    let recorded = prompts.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].contains("Prefer tone: motivational."));
    assert!(recorded[0].contains("User mood: stressed."));
    assert!(recorded[0].contains("Python"));
}

#[tokio::test]
async fn chat_prompt_replays_full_history() {
    let (provider, prompts) = ScriptedProvider::new(hello_chunks());
    let coach = CoachClient::with_provider(Box::new(provider));

    let history = vec![
        ChatMessage::new("user", "How do I improve?"),
        ChatMessage::new("assistant", "Practice daily."),
        ChatMessage::new("user", "For how long?"),
    ];
    let _stream = coach
        .stream_chat(&history, "curious", "reflective", &Profile::seed())
        .await
        .unwrap();

    let recorded = prompts.lock().unwrap();
    assert!(recorded[0].contains("[user] How do I improve?"));
    assert!(recorded[0].contains("[assistant] Practice daily."));
    assert!(recorded[0].contains("[user] For how long?"));
    assert!(recorded[0].contains("Prefer tone: reflective."));
}

#[tokio::test]
async fn provider_failures_propagate_unchanged() {
    let coach = CoachClient::with_provider(Box::new(FailingProvider));

    let err = coach.generate_summary(&Profile::seed()).await.unwrap_err();
    assert!(matches!(err, CoachError::Generation(_)));

    let err = coach
        .generate_simulation("Python loops", "quiz")
        .await
        .unwrap_err();
    assert!(matches!(err, CoachError::Generation(_)));

    let err = match coach
        .stream_chat(
            &[ChatMessage::new("user", "Hi")],
            "focused",
            "motivational",
            &Profile::seed(),
        )
        .await
    {
        Err(e) => e,
        Ok(_) => panic!("expected stream start to fail"),
    };
    assert!(matches!(err, CoachError::Generation(_)));
}
