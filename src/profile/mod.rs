// src/profile/mod.rs

pub mod model;
pub mod store;

pub use model::{Engagement, Profile, SkillRecord, UserInfo};
pub use store::ProfileStore;
