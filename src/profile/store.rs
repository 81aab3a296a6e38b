// src/profile/store.rs
// Whole-document read-modify-write over a single JSON file.
//
// Single-writer precondition: there is no locking and no version check, so
// two writers racing between read and write lose one update (last write
// wins). Acceptable for a single-user local tool.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CoachError, Result};
use crate::profile::model::{Engagement, Profile, SkillRecord, clamp_score, engagement_timestamp};

/// Sole owner of the persisted profile document. All reads and writes to
/// durable state pass through here.
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Opens the store at `path`, creating parent directories and seeding
    /// the default document if none exists. Idempotent: opening an existing
    /// document leaves it byte-identical.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !store.path.exists() {
            info!("Seeding new profile document at {}", store.path.display());
            store.write(&Profile::seed())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the full document. No caching: edits made by other
    /// processes between calls are observable.
    pub fn read(&self) -> Result<Profile> {
        let bytes = fs::read(&self.path)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| CoachError::CorruptData(format!("{}: {e}", self.path.display())))
    }

    /// Serializes the document pretty-printed and replaces the file
    /// atomically: the payload lands in a sibling temp file first and is
    /// renamed over the destination, so no reader can observe a truncated
    /// document.
    pub fn write(&self, profile: &Profile) -> Result<()> {
        let payload = serde_json::to_vec_pretty(profile)
            .map_err(|e| CoachError::CorruptData(format!("failed to serialize profile: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &payload)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote profile document ({} bytes)", payload.len());
        Ok(())
    }

    /// Creates or wholly replaces a skill record, clamping both scores into
    /// [0, 100].
    pub fn upsert_skill(&self, name: &str, level: i64, energy: i64) -> Result<()> {
        let mut profile = self.read()?;
        profile.skills.insert(
            name.to_string(),
            SkillRecord {
                level: clamp_score(level),
                energy: clamp_score(energy),
            },
        );
        self.write(&profile)
    }

    /// Adds `delta` to every skill's energy (clamped) and logs one
    /// `challenge_completed` engagement. Single read-modify-write cycle:
    /// the energy changes and the log entry land together or not at all.
    pub fn add_energy_all(&self, delta: i64) -> Result<()> {
        let mut profile = self.read()?;
        for skill in profile.skills.values_mut() {
            skill.energy = clamp_score(skill.energy + delta);
        }
        profile.engagements.push(Engagement {
            time: engagement_timestamp(),
            event: "challenge_completed".to_string(),
            delta,
        });
        self.write(&profile)
    }

    /// Appends one timestamped engagement record. Skills are untouched.
    pub fn log_event(&self, event: &str, delta: i64) -> Result<()> {
        let mut profile = self.read()?;
        profile.engagements.push(Engagement {
            time: engagement_timestamp(),
            event: event.to_string(),
            delta,
        });
        self.write(&profile)
    }

    /// Persists the user's self-reported mood.
    pub fn set_mood(&self, mood: &str) -> Result<()> {
        let mut profile = self.read()?;
        profile.mood = mood.to_string();
        self.write(&profile)
    }
}
