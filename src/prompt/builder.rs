// src/prompt/builder.rs
//! Prompt assembly for the four coaching intents.
//!
//! The generation service holds no conversation or user state, so every
//! prompt carries its full context: persona preamble, profile snapshot, and
//! (for chat) the whole replayed history.

use crate::coach::ChatMessage;
use crate::persona::COACH_PERSONA;
use crate::profile::Profile;

/// Shared preamble: persona statement plus the caller's current mood and
/// tone. Both are open strings passed through verbatim; an unrecognized
/// value simply reaches the model as text.
pub fn system_preamble(mood: &str, tone: &str) -> String {
    format!(
        "{COACH_PERSONA} User mood: {mood}. Prefer tone: {tone}. \
         Be empathetic, concise, and specific. Use small emoji tastefully. \
         When technical, include minimal code snippets."
    )
}

/// Renders a profile snapshot for prompt embedding.
fn snapshot_context(snapshot: &Profile) -> String {
    serde_json::to_string(snapshot).unwrap_or_else(|_| "{}".to_string())
}

/// Daily progress summary. Tone is always motivational here, whatever the
/// caller otherwise prefers.
pub fn summary_prompt(snapshot: &Profile) -> String {
    let preamble = system_preamble(&snapshot.mood, "motivational");
    format!(
        "{preamble}\n\nUser context: {}\n\nTask: Summarize the user's current \
         learning momentum in 2-3 energetic sentences with one concrete \
         suggestion. Reference skills with emojis and keep it warm and \
         empowering.",
        snapshot_context(snapshot)
    )
}

/// A streamed chat turn. History is replayed oldest-first with role tags.
pub fn chat_prompt(
    history: &[ChatMessage],
    mood: &str,
    tone: &str,
    snapshot: &Profile,
) -> String {
    let preamble = system_preamble(mood, tone);
    let joined = history
        .iter()
        .map(|m| format!("[{}] {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{preamble}\nUser snapshot: {}\n\nContinue the conversation helpfully \
         and concretely.\n\n{joined}",
        snapshot_context(snapshot)
    )
}

/// A short structured exercise: quiz, scenario, or challenge.
pub fn simulation_prompt(topic: &str, mode: &str) -> String {
    format!(
        "Create a {mode} style mini learning simulation for: {topic}. \
         Keep it to ~6-10 lines, include numbered steps or questions, and an \
         answer key at the end. Encourage reflection and one concrete next action."
    )
}

/// The six-month future narrative.
pub fn vision_prompt(snapshot: &Profile) -> String {
    format!(
        "User snapshot: {}\n\nImagine the user's skills 6 months from now. \
         Write a vivid, optimistic narrative of 6-8 sentences with 3 milestones \
         (bulleted) and a rallying call.",
        snapshot_context(snapshot)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_carries_mood_and_tone_verbatim() {
        let preamble = system_preamble("stressed", "extremely weird tone");
        assert!(preamble.contains("User mood: stressed."));
        assert!(preamble.contains("Prefer tone: extremely weird tone."));
        assert!(preamble.starts_with(COACH_PERSONA));
    }

    #[test]
    fn summary_forces_motivational_tone() {
        let mut snapshot = Profile::seed();
        snapshot.mood = "tired".to_string();
        let prompt = summary_prompt(&snapshot);
        assert!(prompt.contains("Prefer tone: motivational."));
        assert!(prompt.contains("User mood: tired."));
        assert!(prompt.contains("Python"));
    }

    #[test]
    fn chat_prompt_replays_history_with_role_tags() {
        let history = vec![
            ChatMessage::new("user", "How do I practice speaking?"),
            ChatMessage::new("assistant", "Start with a 2-minute talk."),
            ChatMessage::new("user", "What next?"),
        ];
        let prompt = chat_prompt(&history, "curious", "technical", &Profile::seed());
        assert!(prompt.contains("[user] How do I practice speaking?"));
        assert!(prompt.contains("[assistant] Start with a 2-minute talk."));
        assert!(prompt.contains("User mood: curious."));
        assert!(prompt.contains("Prefer tone: technical."));
        // Order preserved: first turn appears before the last.
        let first = prompt.find("[user] How do I").unwrap();
        let last = prompt.find("[user] What next?").unwrap();
        assert!(first < last);
    }

    #[test]
    fn simulation_prompt_names_topic_and_mode() {
        let prompt = simulation_prompt("Python loops", "scenario");
        assert!(prompt.contains("scenario style"));
        assert!(prompt.contains("Python loops"));
        assert!(prompt.contains("answer key"));
    }

    #[test]
    fn vision_prompt_embeds_snapshot() {
        let prompt = vision_prompt(&Profile::seed());
        assert!(prompt.contains("Public Speaking"));
        assert!(prompt.contains("3 milestones"));
    }
}
