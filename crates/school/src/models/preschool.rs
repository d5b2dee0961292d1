//! Preschool children, activities, observations and progress reports.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::people::PersonBase;
use super::{Bilingual, Gender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentDomain {
    Physical,
    Cognitive,
    Social,
    Emotional,
    Language,
}

impl DevelopmentDomain {
    pub const ALL: [DevelopmentDomain; 5] = [
        DevelopmentDomain::Physical,
        DevelopmentDomain::Cognitive,
        DevelopmentDomain::Social,
        DevelopmentDomain::Emotional,
        DevelopmentDomain::Language,
    ];

    pub fn label(&self) -> Bilingual {
        match self {
            DevelopmentDomain::Physical => Bilingual::new("Physical", "शारीरिक"),
            DevelopmentDomain::Cognitive => Bilingual::new("Cognitive", "संज्ञानात्मक"),
            DevelopmentDomain::Social => Bilingual::new("Social", "सामाजिक"),
            DevelopmentDomain::Emotional => Bilingual::new("Emotional", "भावनात्मक"),
            DevelopmentDomain::Language => Bilingual::new("Language", "भाषा"),
        }
    }
}

/// Five domain scores (0-100) and their overall score.
///
/// `overall` is the rounded mean of the five domains and is recomputed on
/// every construction and deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DomainScoresRecord")]
pub struct DevelopmentScores {
    physical: u8,
    cognitive: u8,
    social: u8,
    emotional: u8,
    language: u8,
    overall: u8,
}

#[derive(Deserialize)]
struct DomainScoresRecord {
    physical: u8,
    cognitive: u8,
    social: u8,
    emotional: u8,
    language: u8,
}

impl From<DomainScoresRecord> for DevelopmentScores {
    fn from(r: DomainScoresRecord) -> Self {
        Self::from_domains([r.physical, r.cognitive, r.social, r.emotional, r.language])
    }
}

impl DevelopmentScores {
    /// Builds scores from values in [`DevelopmentDomain::ALL`] order, clamping each to 100.
    pub fn from_domains(scores: [u8; 5]) -> Self {
        let [physical, cognitive, social, emotional, language] = scores.map(|s| s.min(100));
        let sum: u32 = [physical, cognitive, social, emotional, language]
            .iter()
            .map(|&s| u32::from(s))
            .sum();
        let overall = (f64::from(sum) / 5.0).round() as u8;

        Self {
            physical,
            cognitive,
            social,
            emotional,
            language,
            overall,
        }
    }

    pub fn get(&self, domain: DevelopmentDomain) -> u8 {
        match domain {
            DevelopmentDomain::Physical => self.physical,
            DevelopmentDomain::Cognitive => self.cognitive,
            DevelopmentDomain::Social => self.social,
            DevelopmentDomain::Emotional => self.emotional,
            DevelopmentDomain::Language => self.language,
        }
    }

    pub fn overall(&self) -> u8 {
        self.overall
    }

    /// Domain scores in [`DevelopmentDomain::ALL`] order.
    pub fn domains(&self) -> [(DevelopmentDomain, u8); 5] {
        DevelopmentDomain::ALL.map(|d| (d, self.get(d)))
    }

    /// Applies `f` to every domain score and recomputes the overall score.
    pub fn map(&self, f: impl FnMut(u8) -> u8) -> Self {
        Self::from_domains(self.domains().map(|(_, s)| s).map(f))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreschoolClass {
    Nursery,
    Lkg,
    Ukg,
}

impl PreschoolClass {
    pub const ALL: [PreschoolClass; 3] = [
        PreschoolClass::Nursery,
        PreschoolClass::Lkg,
        PreschoolClass::Ukg,
    ];

    pub fn age_months(&self) -> RangeInclusive<u8> {
        match self {
            PreschoolClass::Nursery => 24..=36,
            PreschoolClass::Lkg => 36..=48,
            PreschoolClass::Ukg => 48..=60,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PreschoolClass::Nursery => "Nursery",
            PreschoolClass::Lkg => "LKG",
            PreschoolClass::Ukg => "UKG",
        }
    }

    /// Position relative to grade 1, used when comparing siblings across classes.
    pub fn rank(&self) -> i32 {
        match self {
            PreschoolClass::Nursery => -2,
            PreschoolClass::Lkg => -1,
            PreschoolClass::Ukg => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreschoolChild {
    #[serde(flatten)]
    pub base: PersonBase,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub age_months: u8,
    pub class: PreschoolClass,
    pub class_name: String,
    pub parent_ids: Vec<Uuid>,
    pub development_scores: DevelopmentScores,
    pub last_assessment: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreschoolActivityType {
    CircleTime,
    ArtAndCraft,
    Storytelling,
    MusicAndMovement,
    OutdoorPlay,
    SensoryPlay,
    BlockBuilding,
    PretendPlay,
    Puzzles,
    NatureWalk,
    Rhymes,
}

impl PreschoolActivityType {
    pub const ALL: [PreschoolActivityType; 11] = [
        PreschoolActivityType::CircleTime,
        PreschoolActivityType::ArtAndCraft,
        PreschoolActivityType::Storytelling,
        PreschoolActivityType::MusicAndMovement,
        PreschoolActivityType::OutdoorPlay,
        PreschoolActivityType::SensoryPlay,
        PreschoolActivityType::BlockBuilding,
        PreschoolActivityType::PretendPlay,
        PreschoolActivityType::Puzzles,
        PreschoolActivityType::NatureWalk,
        PreschoolActivityType::Rhymes,
    ];

    /// Domains an activity of this type addresses.
    pub fn domains(&self) -> &'static [DevelopmentDomain] {
        use DevelopmentDomain::*;
        match self {
            PreschoolActivityType::CircleTime => &[Social, Language, Emotional],
            PreschoolActivityType::ArtAndCraft => &[Physical, Cognitive],
            PreschoolActivityType::Storytelling => &[Language, Cognitive],
            PreschoolActivityType::MusicAndMovement => &[Physical, Emotional],
            PreschoolActivityType::OutdoorPlay => &[Physical, Social],
            PreschoolActivityType::SensoryPlay => &[Cognitive, Physical],
            PreschoolActivityType::BlockBuilding => &[Cognitive, Physical],
            PreschoolActivityType::PretendPlay => &[Social, Emotional, Language],
            PreschoolActivityType::Puzzles => &[Cognitive],
            PreschoolActivityType::NatureWalk => &[Physical, Cognitive],
            PreschoolActivityType::Rhymes => &[Language, Cognitive],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildMood {
    Happy,
    Excited,
    Calm,
    Curious,
    Tired,
    Upset,
}

impl ChildMood {
    pub const ALL: [ChildMood; 6] = [
        ChildMood::Happy,
        ChildMood::Excited,
        ChildMood::Calm,
        ChildMood::Curious,
        ChildMood::Tired,
        ChildMood::Upset,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
}

impl EngagementLevel {
    pub const ALL: [EngagementLevel; 3] = [
        EngagementLevel::High,
        EngagementLevel::Medium,
        EngagementLevel::Low,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedChild {
    pub child_id: Uuid,
    pub mood: ChildMood,
    pub engagement: EngagementLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreschoolActivity {
    pub id: Uuid,
    pub class: PreschoolClass,
    pub date: Date,
    pub activity_type: PreschoolActivityType,
    pub title: Bilingual,
    pub description: Bilingual,
    pub domains: Vec<DevelopmentDomain>,
    pub tagged_children: Vec<TaggedChild>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: Uuid,
    pub child_id: Uuid,
    pub domain: DevelopmentDomain,
    pub date: Date,
    pub note: Bilingual,
    /// 1 to 5.
    pub rating: u8,
    pub observer: Bilingual,
}

/// Narrative band of a single domain score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeBand {
    Emerging,
    Developing,
    Excelling,
}

impl NarrativeBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            0..=64 => NarrativeBand::Emerging,
            65..=79 => NarrativeBand::Developing,
            _ => NarrativeBand::Excelling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainNarrative {
    pub domain: DevelopmentDomain,
    pub score: u8,
    pub band: NarrativeBand,
    pub narrative: Bilingual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub present_days: u16,
    pub total_days: u16,
}

impl Attendance {
    /// Present days are capped at the total.
    pub fn new(present_days: u16, total_days: u16) -> Self {
        Self {
            present_days: present_days.min(total_days),
            total_days,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        f64::from(self.present_days) / f64::from(self.total_days) * 100.0
    }
}

/// Holistic progress report card for one child and one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hprc {
    pub id: Uuid,
    pub child_id: Uuid,
    pub term: Bilingual,
    pub development_scores: DevelopmentScores,
    pub previous_scores: DevelopmentScores,
    pub domain_narratives: Vec<DomainNarrative>,
    pub strengths: Bilingual,
    pub growth_areas: Bilingual,
    pub attendance: Attendance,
    pub generated_on: Date,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_is_rounded_mean() {
        let scores = DevelopmentScores::from_domains([70, 71, 72, 73, 76]);
        // 362 / 5 = 72.4
        assert_eq!(scores.overall(), 72);

        let scores = DevelopmentScores::from_domains([70, 70, 70, 70, 72]);
        // 352 / 5 = 70.4
        assert_eq!(scores.overall(), 70);

        let scores = DevelopmentScores::from_domains([80, 80, 80, 81, 81]);
        // 402 / 5 = 80.4
        assert_eq!(scores.overall(), 80);

        let scores = DevelopmentScores::from_domains([90, 91, 91, 91, 91]);
        // 454 / 5 = 90.8
        assert_eq!(scores.overall(), 91);
    }

    #[test]
    fn test_domain_scores_clamped() {
        let scores = DevelopmentScores::from_domains([255, 100, 100, 100, 100]);
        assert_eq!(scores.get(DevelopmentDomain::Physical), 100);
        assert_eq!(scores.overall(), 100);
    }

    #[test]
    fn test_map_recomputes_overall() {
        let scores = DevelopmentScores::from_domains([60, 70, 80, 90, 100]);
        let lowered = scores.map(|s| s.saturating_sub(10));
        assert_eq!(lowered.overall(), 70);
    }

    #[test]
    fn test_class_age_bounds() {
        assert_eq!(PreschoolClass::Nursery.age_months(), 24..=36);
        assert_eq!(PreschoolClass::Lkg.age_months(), 36..=48);
        assert_eq!(PreschoolClass::Ukg.age_months(), 48..=60);
    }

    #[test]
    fn test_every_activity_type_addresses_a_domain() {
        for kind in PreschoolActivityType::ALL {
            assert!(!kind.domains().is_empty(), "{kind:?} has no domains");
        }
    }

    #[test]
    fn test_narrative_bands() {
        assert_eq!(NarrativeBand::for_score(0), NarrativeBand::Emerging);
        assert_eq!(NarrativeBand::for_score(64), NarrativeBand::Emerging);
        assert_eq!(NarrativeBand::for_score(65), NarrativeBand::Developing);
        assert_eq!(NarrativeBand::for_score(79), NarrativeBand::Developing);
        assert_eq!(NarrativeBand::for_score(80), NarrativeBand::Excelling);
    }

    #[test]
    fn test_attendance_caps_present_days() {
        let attendance = Attendance::new(90, 70);
        assert_eq!(attendance.present_days, 70);
        assert!((attendance.percentage() - 100.0).abs() < f64::EPSILON);
    }
}
