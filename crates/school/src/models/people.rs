//! People in the school: the shared base record and the four role variants.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::gamification::{EngagementTier, MoodEntry, ParentBadge, Streaks, StudentBadge, XpProgress};
use super::preschool::PreschoolChild;
use super::{Bilingual, Gender, Role};

/// Fields every person carries regardless of role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonBase {
    pub id: Uuid,
    pub name: Bilingual,
    pub email: String,
    pub phone: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Any person in the snapshot, discriminated by `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Person {
    Student(Student),
    Parent(Parent),
    Teacher(Teacher),
    PreschoolChild(PreschoolChild),
}

impl Person {
    pub fn role(&self) -> Role {
        match self {
            Person::Student(_) => Role::Student,
            Person::Parent(_) => Role::Parent,
            Person::Teacher(_) => Role::Teacher,
            Person::PreschoolChild(_) => Role::PreschoolChild,
        }
    }

    pub fn base(&self) -> &PersonBase {
        match self {
            Person::Student(s) => &s.base,
            Person::Parent(p) => &p.base,
            Person::Teacher(t) => &t.base,
            Person::PreschoolChild(c) => &c.base,
        }
    }

    pub fn id(&self) -> Uuid {
        self.base().id
    }
}

/// Class identifier in the form `"<grade><section>"`, e.g. `"7B"`.
pub fn class_id(grade: u8, section: char) -> String {
    format!("{grade}{section}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(flatten)]
    pub base: PersonBase,
    pub gender: Gender,
    pub grade: u8,
    pub section: char,
    pub roll_number: u32,
    pub date_of_birth: Date,
    pub class_id: String,
    #[serde(flatten)]
    pub progress: XpProgress,
    pub badges: Vec<StudentBadge>,
    pub streaks: Streaks,
    /// Newest first.
    pub mood_history: Vec<MoodEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRelation {
    Father,
    Mother,
}

impl ParentRelation {
    pub fn complement(&self) -> Self {
        match self {
            ParentRelation::Father => ParentRelation::Mother,
            ParentRelation::Mother => ParentRelation::Father,
        }
    }

    pub fn gender(&self) -> Gender {
        match self {
            ParentRelation::Father => Gender::Male,
            ParentRelation::Mother => Gender::Female,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    #[serde(flatten)]
    pub base: PersonBase,
    pub relation: ParentRelation,
    /// The other parent of the same household, if one was generated.
    pub spouse_id: Option<Uuid>,
    pub occupation: Bilingual,
    pub children_ids: Vec<Uuid>,
    pub engagement_score: u8,
    pub engagement_tier: EngagementTier,
    pub xp: u32,
    pub badges: Vec<ParentBadge>,
    pub last_active: OffsetDateTime,
}

/// Primary (grades 1-5) or secondary (grades 6-10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    Primary,
    Secondary,
}

impl GradeBand {
    pub const ALL: [GradeBand; 2] = [GradeBand::Primary, GradeBand::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeBand::Primary => "primary",
            GradeBand::Secondary => "secondary",
        }
    }

    pub fn for_grade(grade: u8) -> Self {
        if grade <= 5 {
            GradeBand::Primary
        } else {
            GradeBand::Secondary
        }
    }

    pub fn contains(&self, grade: u8) -> bool {
        match self {
            GradeBand::Primary => (1..=5).contains(&grade),
            GradeBand::Secondary => (6..=10).contains(&grade),
        }
    }

    /// Subjects taught in this band.
    pub fn subjects(&self) -> &'static [Subject] {
        match self {
            GradeBand::Primary => &[
                Subject::English,
                Subject::Hindi,
                Subject::Mathematics,
                Subject::EnvironmentalStudies,
                Subject::Art,
                Subject::Music,
                Subject::PhysicalEducation,
            ],
            GradeBand::Secondary => &[
                Subject::English,
                Subject::Hindi,
                Subject::Mathematics,
                Subject::Science,
                Subject::SocialStudies,
                Subject::ComputerScience,
                Subject::PhysicalEducation,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    English,
    Hindi,
    Mathematics,
    EnvironmentalStudies,
    Science,
    SocialStudies,
    ComputerScience,
    Art,
    Music,
    PhysicalEducation,
}

impl Subject {
    pub fn department(&self) -> Department {
        match self {
            Subject::English | Subject::Hindi => Department::Languages,
            Subject::Mathematics => Department::Mathematics,
            Subject::EnvironmentalStudies | Subject::Science => Department::Science,
            Subject::SocialStudies => Department::Humanities,
            Subject::ComputerScience => Department::Technology,
            Subject::Art | Subject::Music => Department::Arts,
            Subject::PhysicalEducation => Department::PhysicalEducation,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::English => "english",
            Subject::Hindi => "hindi",
            Subject::Mathematics => "mathematics",
            Subject::EnvironmentalStudies => "environmental_studies",
            Subject::Science => "science",
            Subject::SocialStudies => "social_studies",
            Subject::ComputerScience => "computer_science",
            Subject::Art => "art",
            Subject::Music => "music",
            Subject::PhysicalEducation => "physical_education",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Languages,
    Mathematics,
    Science,
    Humanities,
    Technology,
    Arts,
    PhysicalEducation,
}

/// One subject taught to one class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassAssignment {
    pub grade: u8,
    pub section: char,
    pub subject: Subject,
}

impl ClassAssignment {
    pub fn class_id(&self) -> String {
        class_id(self.grade, self.section)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(flatten)]
    pub base: PersonBase,
    pub gender: Gender,
    pub employee_id: String,
    pub department: Department,
    pub grade_band: GradeBand,
    pub subjects: Vec<Subject>,
    pub classes: Vec<ClassAssignment>,
    pub qualification: Bilingual,
    pub is_class_teacher: bool,
    pub class_teacher_of: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PersonBase {
        let now = OffsetDateTime::now_utc();
        PersonBase {
            id: Uuid::new_v4(),
            name: Bilingual::new("Meera Iyer", "मीरा अय्यर"),
            email: "meera.iyer@demoschool.edu".into(),
            phone: "+91 9876543210".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_person_serializes_role_tag() {
        let teacher = Teacher {
            base: base(),
            gender: Gender::Female,
            employee_id: "EMP0001".into(),
            department: Department::Languages,
            grade_band: GradeBand::Primary,
            subjects: vec![Subject::English],
            classes: vec![ClassAssignment {
                grade: 3,
                section: 'A',
                subject: Subject::English,
            }],
            qualification: Bilingual::new("B.Ed.", "बी.एड."),
            is_class_teacher: true,
            class_teacher_of: Some("3A".into()),
        };
        let person = Person::Teacher(teacher);
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["role"], "teacher");
        assert_eq!(json["employee_id"], "EMP0001");

        let back: Person = serde_json::from_value(json).unwrap();
        assert_eq!(back.role(), Role::Teacher);
        assert_eq!(back.id(), person.id());
    }

    #[test]
    fn test_band_subjects_are_valid_for_band() {
        assert_eq!(GradeBand::for_grade(1), GradeBand::Primary);
        assert_eq!(GradeBand::for_grade(5), GradeBand::Primary);
        assert_eq!(GradeBand::for_grade(6), GradeBand::Secondary);
        assert!(!GradeBand::Primary.subjects().contains(&Subject::ComputerScience));
        assert!(!GradeBand::Secondary.subjects().contains(&Subject::EnvironmentalStudies));
    }

    #[test]
    fn test_parent_relation_complement() {
        assert_eq!(ParentRelation::Father.complement(), ParentRelation::Mother);
        assert_eq!(ParentRelation::Mother.complement().gender(), Gender::Male);
    }
}
