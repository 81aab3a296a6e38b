// src/profile/model.rs
//! Typed schema for the persisted profile document.
//!
//! The document always carries four top-level keys: `user`, `mood`,
//! `skills`, and `engagements`. Serde defaults cover documents written
//! before a field existed, so a read never fails just because the file came
//! from an older version.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 100;

/// Clamps a level or energy score into [0, 100].
pub fn clamp_score(value: i64) -> i64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            name: "Explorer".to_string(),
        }
    }
}

/// A named skill's progress: `level` tracks mastery, `energy` tracks
/// momentum. Both are always within [0, 100] on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub level: i64,
    pub energy: i64,
}

/// One entry in the append-only engagement log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub time: String,
    pub event: String,
    pub delta: i64,
}

/// The persisted per-user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub user: UserInfo,
    #[serde(default = "default_mood")]
    pub mood: String,
    #[serde(default)]
    pub skills: BTreeMap<String, SkillRecord>,
    #[serde(default)]
    pub engagements: Vec<Engagement>,
}

fn default_mood() -> String {
    "focused".to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user: UserInfo::default(),
            mood: default_mood(),
            skills: BTreeMap::new(),
            engagements: Vec::new(),
        }
    }
}

impl Profile {
    /// The seed document materialized on first use.
    pub fn seed() -> Self {
        let mut skills = BTreeMap::new();
        skills.insert(
            "Python".to_string(),
            SkillRecord {
                level: 20,
                energy: 30,
            },
        );
        skills.insert(
            "Public Speaking".to_string(),
            SkillRecord {
                level: 10,
                energy: 20,
            },
        );
        Self {
            skills,
            ..Self::default()
        }
    }

    /// Last `n` engagement pulses, newest first.
    pub fn recent_engagements(&self, n: usize) -> Vec<&Engagement> {
        self.engagements.iter().rev().take(n).collect()
    }
}

/// Timestamp format shared by all engagement records.
pub(crate) fn engagement_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_bounds() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(0), 0);
        assert_eq!(clamp_score(55), 55);
        assert_eq!(clamp_score(100), 100);
        assert_eq!(clamp_score(150), 100);
    }

    #[test]
    fn seed_document_shape() {
        let profile = Profile::seed();
        assert_eq!(profile.user.name, "Explorer");
        assert_eq!(profile.mood, "focused");
        assert_eq!(
            profile.skills["Python"],
            SkillRecord {
                level: 20,
                energy: 30
            }
        );
        assert_eq!(
            profile.skills["Public Speaking"],
            SkillRecord {
                level: 10,
                energy: 20
            }
        );
        assert!(profile.engagements.is_empty());
    }

    #[test]
    fn older_documents_deserialize_with_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"user": {"name": "Nova"}}"#).unwrap();
        assert_eq!(profile.user.name, "Nova");
        assert_eq!(profile.mood, "focused");
        assert!(profile.skills.is_empty());
        assert!(profile.engagements.is_empty());
    }

    #[test]
    fn recent_engagements_newest_first() {
        let mut profile = Profile::default();
        for i in 0..5 {
            profile.engagements.push(Engagement {
                time: format!("2030-01-0{} 09:00", i + 1),
                event: "focus_session".to_string(),
                delta: i,
            });
        }
        let recent = profile.recent_engagements(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].delta, 4);
        assert_eq!(recent[2].delta, 2);
    }

    #[test]
    fn engagement_timestamp_matches_log_format() {
        let stamp = engagement_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M").is_ok());
    }
}
