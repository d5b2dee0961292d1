//! XP, levels, badges, streaks and parent engagement tiers.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use time::Date;

/// XP total together with the level derived from it.
///
/// The level is never stored independently: it is recomputed whenever a value
/// is constructed or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "XpRecord")]
pub struct XpProgress {
    xp: u32,
    level: u32,
}

#[derive(Deserialize)]
struct XpRecord {
    xp: u32,
}

impl From<XpRecord> for XpProgress {
    fn from(record: XpRecord) -> Self {
        Self::new(record.xp)
    }
}

impl XpProgress {
    pub fn new(xp: u32) -> Self {
        Self {
            xp,
            level: Self::level_for(xp),
        }
    }

    /// `floor(xp / 100) + 1`.
    pub const fn level_for(xp: u32) -> u32 {
        xp / 100 + 1
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// XP still needed to reach the next level.
    pub fn xp_to_next_level(&self) -> u32 {
        self.level * 100 - self.xp
    }
}

/// Badges a student can earn. Students hold a uniform sample of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentBadge {
    FirstSteps,
    HomeworkHero,
    PerfectAttendance,
    Bookworm,
    MathWhiz,
    ScienceExplorer,
    CreativeArtist,
    TeamPlayer,
    KindHelper,
    EarlyBird,
    StreakMaster,
    QuizChampion,
}

impl StudentBadge {
    pub const ALL: [StudentBadge; 12] = [
        StudentBadge::FirstSteps,
        StudentBadge::HomeworkHero,
        StudentBadge::PerfectAttendance,
        StudentBadge::Bookworm,
        StudentBadge::MathWhiz,
        StudentBadge::ScienceExplorer,
        StudentBadge::CreativeArtist,
        StudentBadge::TeamPlayer,
        StudentBadge::KindHelper,
        StudentBadge::EarlyBird,
        StudentBadge::StreakMaster,
        StudentBadge::QuizChampion,
    ];
}

/// Consecutive-day counters. Each counter is independent of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub homework: u32,
    pub attendance: u32,
    pub reading: u32,
    pub login: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Excited,
    Calm,
    Tired,
    Sad,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Excited, Mood::Calm, Mood::Tired, Mood::Sad];
}

/// XP granted for every daily mood check-in.
pub const MOOD_CHECKIN_XP: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: Date,
    pub mood: Mood,
    pub xp_earned: u32,
}

/// Badges available to parents, in the order tiers unlock them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentBadge {
    FirstLogin,
    HelpfulHand,
    TeamPlayer,
    SuperParent,
}

impl ParentBadge {
    pub const ALL: [ParentBadge; 4] = [
        ParentBadge::FirstLogin,
        ParentBadge::HelpfulHand,
        ParentBadge::TeamPlayer,
        ParentBadge::SuperParent,
    ];
}

/// Parent engagement tier.
///
/// Score ranges are disjoint and together cover `0..=100`. Each tier grants a
/// prefix of [`ParentBadge::ALL`], so a higher tier always holds every badge of
/// the tiers below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl EngagementTier {
    pub const ALL: [EngagementTier; 4] = [
        EngagementTier::Bronze,
        EngagementTier::Silver,
        EngagementTier::Gold,
        EngagementTier::Platinum,
    ];

    pub fn score_range(&self) -> RangeInclusive<u8> {
        match self {
            EngagementTier::Bronze => 0..=39,
            EngagementTier::Silver => 40..=64,
            EngagementTier::Gold => 65..=84,
            EngagementTier::Platinum => 85..=100,
        }
    }

    pub fn xp_range(&self) -> RangeInclusive<u32> {
        match self {
            EngagementTier::Bronze => 0..=199,
            EngagementTier::Silver => 200..=499,
            EngagementTier::Gold => 500..=999,
            EngagementTier::Platinum => 1000..=2000,
        }
    }

    /// Tier owning `score`. Scores above 100 are treated as 100.
    pub fn from_score(score: u8) -> Self {
        let score = score.min(100);
        Self::ALL
            .into_iter()
            .find(|tier| tier.score_range().contains(&score))
            .unwrap_or(EngagementTier::Platinum)
    }

    pub fn badges(&self) -> &'static [ParentBadge] {
        let unlocked = match self {
            EngagementTier::Bronze => 1,
            EngagementTier::Silver => 2,
            EngagementTier::Gold => 3,
            EngagementTier::Platinum => 4,
        };
        &ParentBadge::ALL[..unlocked]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementTier::Bronze => "bronze",
            EngagementTier::Silver => "silver",
            EngagementTier::Gold => "gold",
            EngagementTier::Platinum => "platinum",
        }
    }
}
