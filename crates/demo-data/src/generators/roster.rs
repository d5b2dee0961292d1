//! Student roster generation across grades and sections.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};
use tracing::debug;

use school::Role;
use school::models::{Student, class_id};

use super::identity::IdentityGenerator;
use super::scoring::ScoringSynthesizer;
use crate::error::{GenerationError, Result};

/// Configuration for roster generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Grades to populate, 1 through 10.
    pub grades: Vec<u8>,
    /// Sections to populate in every grade.
    pub sections: Vec<char>,
    /// Students generated in each (grade, section).
    pub students_per_section: usize,
    /// Upper bound on students in a single section.
    pub section_capacity: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            grades: (1..=10).collect(),
            sections: vec!['A', 'B', 'C'],
            students_per_section: 5,
            section_capacity: 40,
        }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grades.is_empty() {
            return Err(GenerationError::config("at least one grade is required"));
        }
        if let Some(grade) = self.grades.iter().find(|g| !(1..=10).contains(*g)) {
            return Err(GenerationError::config(format!(
                "grade {grade} is outside 1..=10"
            )));
        }
        if self.grades.iter().collect::<HashSet<_>>().len() != self.grades.len() {
            return Err(GenerationError::config("grades contain duplicates"));
        }
        if self.sections.is_empty() {
            return Err(GenerationError::config("at least one section is required"));
        }
        if self.sections.iter().collect::<HashSet<_>>().len() != self.sections.len() {
            return Err(GenerationError::config("sections contain duplicates"));
        }
        if self.students_per_section == 0 {
            return Err(GenerationError::config(
                "students_per_section must be at least 1",
            ));
        }
        if self.students_per_section > self.section_capacity {
            return Err(GenerationError::SectionCapacityExceeded {
                requested: self.students_per_section,
                capacity: self.section_capacity,
            });
        }
        Ok(())
    }

    /// Total students the roster will hold.
    pub fn student_count(&self) -> usize {
        self.grades.len() * self.sections.len() * self.students_per_section
    }
}

/// Typical age, in years, of a student in `grade`.
pub const fn base_age(grade: u8) -> i32 {
    5 + grade as i32
}

/// Generates the student population.
pub struct RosterGenerator {
    config: RosterConfig,
    identity: IdentityGenerator,
    scoring: ScoringSynthesizer,
}

impl RosterGenerator {
    pub fn new() -> Self {
        Self {
            config: RosterConfig::default(),
            identity: IdentityGenerator::new(),
            scoring: ScoringSynthesizer::new(),
        }
    }

    /// Creates a generator with custom parts, validating the configuration.
    pub fn with_parts(
        config: RosterConfig,
        identity: IdentityGenerator,
        scoring: ScoringSynthesizer,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            identity,
            scoring,
        })
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Generates every student, grade by grade and section by section.
    ///
    /// Roll numbers restart at 1 in each (grade, section).
    pub fn generate(&self, now: OffsetDateTime, rng: &mut impl Rng) -> Result<Vec<Student>> {
        self.config.validate()?;

        let mut students = Vec::with_capacity(self.config.student_count());
        for &grade in &self.config.grades {
            for &section in &self.config.sections {
                for roll_number in 1..=self.config.students_per_section as u32 {
                    students.push(self.generate_student(grade, section, roll_number, now, rng)?);
                }
            }
            debug!(grade, "Generated grade roster");
        }

        Ok(students)
    }

    fn generate_student(
        &self,
        grade: u8,
        section: char,
        roll_number: u32,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Student> {
        let identity = self.identity.generate(Role::Student, None, rng);
        let gender = identity.gender;
        let date_of_birth = self.birth_date(grade, now.date(), rng)?;
        let created_at = now - Duration::days(rng.gen_range(30..365));

        Ok(Student {
            base: identity.into_base(created_at, rng),
            gender,
            grade,
            section,
            roll_number,
            date_of_birth,
            class_id: class_id(grade, section),
            progress: self.scoring.student_progress(rng),
            badges: self.scoring.student_badges(rng),
            streaks: self.scoring.streaks(rng),
            mood_history: self.scoring.mood_history(now.date(), rng),
        })
    }

    /// Birth date `base_age(grade) ± 1` years before `today`, in the same month.
    ///
    /// The day never falls after today's, so the completed age is exactly the
    /// drawn one.
    fn birth_date(&self, grade: u8, today: Date, rng: &mut impl Rng) -> Result<Date> {
        let age = base_age(grade) + rng.gen_range(-1..=1);
        let day = rng.gen_range(1..=today.day().min(28));
        Ok(Date::from_calendar_date(
            today.year() - age,
            today.month(),
            day,
        )?)
    }
}

impl Default for RosterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole years between `birth` and `on`.
pub fn age_in_years(birth: Date, on: Date) -> i32 {
    let mut age = on.year() - birth.year();
    if (on.month() as u8, on.day()) < (birth.month() as u8, birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_roster() {
        let roster_gen = RosterGenerator::new();
        let mut rng = rand::thread_rng();
        let students = roster_gen
            .generate(OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        assert_eq!(students.len(), 10 * 3 * 5);

        let ids: HashSet<_> = students.iter().map(|s| s.base.id).collect();
        assert_eq!(ids.len(), students.len());
    }

    #[test]
    fn test_roll_numbers_unique_and_sequential() {
        let roster_gen = RosterGenerator::new();
        let mut rng = rand::thread_rng();
        let students = roster_gen
            .generate(OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        let keys: HashSet<_> = students
            .iter()
            .map(|s| (s.grade, s.section, s.roll_number))
            .collect();
        assert_eq!(keys.len(), students.len());

        for s in &students {
            assert!((1..=5).contains(&s.roll_number));
            assert_eq!(s.class_id, format!("{}{}", s.grade, s.section));
        }
    }

    fn assert_ages_match_grades(now: OffsetDateTime) {
        let roster_gen = RosterGenerator::new();
        let mut rng = rand::thread_rng();
        let students = roster_gen.generate(now, &mut rng).unwrap();

        for s in &students {
            let age = age_in_years(s.date_of_birth, now.date());
            let expected = base_age(s.grade);
            assert!(
                (expected - 1..=expected + 1).contains(&age),
                "grade {} student aged {age} on {}",
                s.grade,
                now.date()
            );
        }
    }

    #[test]
    fn test_age_matches_grade() {
        assert_ages_match_grades(OffsetDateTime::now_utc());
    }

    #[test]
    fn test_age_matches_grade_early_in_month() {
        let dates = [
            (time::Month::June, 1),
            (time::Month::March, 1),
            (time::Month::December, 31),
        ];
        for (month, day) in dates {
            let now = Date::from_calendar_date(2025, month, day)
                .unwrap()
                .with_hms(8, 0, 0)
                .unwrap()
                .assume_utc();
            assert_ages_match_grades(now);
        }
    }

    #[test]
    fn test_capacity_exceeded() {
        let config = RosterConfig {
            students_per_section: 41,
            ..Default::default()
        };
        let result = RosterGenerator::with_parts(
            config,
            IdentityGenerator::new(),
            ScoringSynthesizer::new(),
        );
        assert!(matches!(
            result,
            Err(GenerationError::SectionCapacityExceeded {
                requested: 41,
                capacity: 40
            })
        ));
    }

    #[test]
    fn test_invalid_grades_rejected() {
        for grades in [vec![], vec![0], vec![11], vec![3, 3]] {
            let config = RosterConfig {
                grades,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_age_in_years() {
        let birth = Date::from_calendar_date(2015, time::Month::June, 15).unwrap();
        let before = Date::from_calendar_date(2025, time::Month::June, 14).unwrap();
        let on = Date::from_calendar_date(2025, time::Month::June, 15).unwrap();
        assert_eq!(age_in_years(birth, before), 9);
        assert_eq!(age_in_years(birth, on), 10);
    }
}
