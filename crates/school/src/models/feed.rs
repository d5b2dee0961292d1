//! Classroom moments shown in the activity feed.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::Bilingual;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentType {
    Learning,
    Art,
    Sports,
    Celebration,
    FieldTrip,
    Achievement,
    Music,
    Science,
    Reading,
}

impl MomentType {
    pub const ALL: [MomentType; 9] = [
        MomentType::Learning,
        MomentType::Art,
        MomentType::Sports,
        MomentType::Celebration,
        MomentType::FieldTrip,
        MomentType::Achievement,
        MomentType::Music,
        MomentType::Science,
        MomentType::Reading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MomentType::Learning => "learning",
            MomentType::Art => "art",
            MomentType::Sports => "sports",
            MomentType::Celebration => "celebration",
            MomentType::FieldTrip => "field_trip",
            MomentType::Achievement => "achievement",
            MomentType::Music => "music",
            MomentType::Science => "science",
            MomentType::Reading => "reading",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: Uuid,
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub caption: Bilingual,
}

/// Reaction counters. `total` is always the sum of the five named counters,
/// saturating at `u32::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReactionRecord")]
pub struct ReactionCounts {
    heart: u32,
    clap: u32,
    smile: u32,
    celebrate: u32,
    fire: u32,
    total: u32,
}

#[derive(Deserialize)]
struct ReactionRecord {
    heart: u32,
    clap: u32,
    smile: u32,
    celebrate: u32,
    fire: u32,
}

impl From<ReactionRecord> for ReactionCounts {
    fn from(r: ReactionRecord) -> Self {
        Self::new(r.heart, r.clap, r.smile, r.celebrate, r.fire)
    }
}

impl ReactionCounts {
    pub fn new(heart: u32, clap: u32, smile: u32, celebrate: u32, fire: u32) -> Self {
        Self {
            heart,
            clap,
            smile,
            celebrate,
            fire,
            total: [clap, smile, celebrate, fire]
                .into_iter()
                .fold(heart, u32::saturating_add),
        }
    }

    pub fn heart(&self) -> u32 {
        self.heart
    }

    pub fn clap(&self) -> u32 {
        self.clap
    }

    pub fn smile(&self) -> u32 {
        self.smile
    }

    pub fn celebrate(&self) -> u32 {
        self.celebrate
    }

    pub fn fire(&self) -> u32 {
        self.fire
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedComment {
    pub id: Uuid,
    pub author_name: Bilingual,
    pub text: Bilingual,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedVisibility {
    Public,
    ClassOnly,
    ParentsOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFeedItem {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: Bilingual,
    pub moment_type: MomentType,
    pub class_id: String,
    pub title: Bilingual,
    pub content: Bilingual,
    /// One to four entries.
    pub media: Vec<MediaItem>,
    pub tags: Vec<String>,
    pub reactions: ReactionCounts,
    pub comments: Vec<FeedComment>,
    pub visibility: FeedVisibility,
    pub is_pinned: bool,
    pub created_at: OffsetDateTime,
}
