//! Entities shared between the demo-data generators and the dashboard.

mod feed;
mod gamification;
mod people;
mod preschool;

pub use feed::{
    ActivityFeedItem, FeedComment, FeedVisibility, MediaItem, MediaKind, MomentType,
    ReactionCounts,
};
pub use gamification::{
    EngagementTier, MOOD_CHECKIN_XP, Mood, MoodEntry, ParentBadge, Streaks, StudentBadge,
    XpProgress,
};
pub use people::{
    ClassAssignment, Department, GradeBand, Parent, ParentRelation, Person, PersonBase, Student,
    Subject, Teacher, class_id,
};
pub use preschool::{
    Attendance, ChildMood, DevelopmentDomain, DevelopmentScores, DomainNarrative,
    EngagementLevel, Hprc, NarrativeBand, Observation, PreschoolActivity, PreschoolActivityType,
    PreschoolChild, PreschoolClass, TaggedChild,
};

use serde::{Deserialize, Serialize};

/// A text value carried in English and Hindi.
///
/// The dashboard renders either language at any time, so both halves are
/// always present and always translations of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bilingual {
    pub en: String,
    pub hi: String,
}

impl Bilingual {
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
        }
    }

    /// True when neither language is empty.
    pub fn is_complete(&self) -> bool {
        !self.en.trim().is_empty() && !self.hi.trim().is_empty()
    }

    /// Joins two bilingual values with a separator, pairwise per language.
    pub fn join(&self, other: &Bilingual, sep: &str) -> Bilingual {
        Bilingual {
            en: format!("{}{sep}{}", self.en, other.en),
            hi: format!("{}{sep}{}", self.hi, other.hi),
        }
    }
}

impl From<(&str, &str)> for Bilingual {
    fn from((en, hi): (&str, &str)) -> Self {
        Self::new(en, hi)
    }
}

/// Discriminator for the [`Person`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Parent,
    Teacher,
    PreschoolChild,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Teacher => "teacher",
            Role::PreschoolChild => "preschool_child",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilingual_completeness() {
        assert!(Bilingual::new("Art", "कला").is_complete());
        assert!(!Bilingual::new("Art", " ").is_complete());
        assert!(!Bilingual::new("", "कला").is_complete());
    }

    #[test]
    fn test_bilingual_join_keeps_languages_paired() {
        let first = Bilingual::new("Aarav", "आरव");
        let last = Bilingual::new("Sharma", "शर्मा");
        let full = first.join(&last, " ");
        assert_eq!(full.en, "Aarav Sharma");
        assert_eq!(full.hi, "आरव शर्मा");
    }
}
