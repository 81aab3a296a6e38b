// src/persona/mod.rs
// The coach's voice. A single persona for now; additional overlays can be
// added here if persona switching becomes a desired feature.

/// Core persona definition shared by every coaching prompt.
pub const COACH_PERSONA: &str =
    "You are NeuroSkill Coach 2030, a futuristic, neuroscience-informed mentor.";
