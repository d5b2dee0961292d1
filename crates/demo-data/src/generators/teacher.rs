//! Teacher generation with subject and class assignments.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use school::models::{ClassAssignment, GradeBand, Teacher, class_id};
use school::{Bilingual, Role};

use super::identity::IdentityGenerator;
use crate::error::{GenerationError, Result, ensure_probability, ensure_range};

/// Configuration for teacher generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherConfig {
    pub teacher_count: usize,
    /// Class assignments per teacher (inclusive range).
    pub classes_per_teacher: (usize, usize),
    /// Subjects per teacher (inclusive range).
    pub subjects_per_teacher: (usize, usize),
    /// Probability that a teacher is offered a class of their own.
    pub class_teacher_probability: f64,
}

impl Default for TeacherConfig {
    fn default() -> Self {
        Self {
            teacher_count: 12,
            classes_per_teacher: (3, 5),
            subjects_per_teacher: (1, 2),
            class_teacher_probability: 0.6,
        }
    }
}

impl TeacherConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_range("classes_per_teacher", self.classes_per_teacher)?;
        ensure_range("subjects_per_teacher", self.subjects_per_teacher)?;
        ensure_probability("class_teacher_probability", self.class_teacher_probability)?;
        if self.subjects_per_teacher.0 == 0 || self.classes_per_teacher.0 == 0 {
            return Err(GenerationError::config(
                "teachers need at least one subject and one class",
            ));
        }
        let offered = GradeBand::ALL
            .iter()
            .map(|band| band.subjects().len())
            .min()
            .unwrap_or(0);
        if self.subjects_per_teacher.1 > offered {
            return Err(GenerationError::config(format!(
                "subjects_per_teacher allows {} subjects but a grade band offers {offered}",
                self.subjects_per_teacher.1
            )));
        }
        Ok(())
    }
}

/// Generates teachers for the classes of a roster.
pub struct TeacherGenerator {
    config: TeacherConfig,
    identity: IdentityGenerator,
}

impl TeacherGenerator {
    pub fn new() -> Self {
        Self {
            config: TeacherConfig::default(),
            identity: IdentityGenerator::new(),
        }
    }

    pub fn with_parts(config: TeacherConfig, identity: IdentityGenerator) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, identity })
    }

    /// Generates teachers for the given grades and sections.
    ///
    /// Each teacher works in one grade band, teaches subjects valid for that
    /// band, and holds unique (grade, section, subject) assignments. A class has
    /// at most one class teacher.
    pub fn generate(
        &self,
        grades: &[u8],
        sections: &[char],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<Teacher>> {
        self.config.validate()?;
        if grades.is_empty() || sections.is_empty() {
            return Err(GenerationError::config(
                "teachers need at least one grade and one section",
            ));
        }

        let bands: Vec<GradeBand> = GradeBand::ALL
            .into_iter()
            .filter(|band| grades.iter().any(|&g| band.contains(g)))
            .collect();
        if bands.is_empty() {
            return Err(GenerationError::config("no grade falls inside 1..=10"));
        }

        // Every band must offer enough distinct assignments for the smallest draw.
        let (min_subjects, _) = self.config.subjects_per_teacher;
        let (min_classes, _) = self.config.classes_per_teacher;
        for band in &bands {
            let band_grades = grades.iter().filter(|&&g| band.contains(g)).count();
            let available = band_grades * sections.len() * min_subjects;
            if available < min_classes {
                return Err(GenerationError::config(format!(
                    "{} offers {available} class assignments, teachers need {min_classes}",
                    band.as_str()
                )));
            }
        }
        let mut owned_classes = HashSet::new();

        let teachers = (0..self.config.teacher_count)
            .map(|idx| {
                let band = bands[rng.gen_range(0..bands.len())];
                let band_grades: Vec<u8> =
                    grades.iter().copied().filter(|&g| band.contains(g)).collect();
                self.generate_single(
                    idx,
                    band,
                    &band_grades,
                    sections,
                    &mut owned_classes,
                    now,
                    rng,
                )
            })
            .collect();

        Ok(teachers)
    }

    #[allow(clippy::too_many_arguments)]
    fn generate_single(
        &self,
        idx: usize,
        band: GradeBand,
        grades: &[u8],
        sections: &[char],
        owned_classes: &mut HashSet<String>,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Teacher {
        let identity = self.identity.generate(Role::Teacher, None, rng);
        let gender = identity.gender;

        let mut subjects = band.subjects().to_vec();
        subjects.shuffle(rng);
        let (min, max) = self.config.subjects_per_teacher;
        subjects.truncate(rng.gen_range(min..=max));

        let taught = &subjects;
        let mut candidates: Vec<ClassAssignment> = grades
            .iter()
            .flat_map(|&grade| {
                sections.iter().flat_map(move |&section| {
                    taught.iter().map(move |&subject| ClassAssignment {
                        grade,
                        section,
                        subject,
                    })
                })
            })
            .collect();
        candidates.shuffle(rng);
        let (min, max) = self.config.classes_per_teacher;
        candidates.truncate(rng.gen_range(min..=max));
        let classes = candidates;

        let class_teacher_of = if rng.r#gen::<f64>() < self.config.class_teacher_probability {
            classes
                .iter()
                .map(ClassAssignment::class_id)
                .find(|id| !owned_classes.contains(id))
        } else {
            None
        };
        if let Some(id) = &class_teacher_of {
            owned_classes.insert(id.clone());
        }

        let qualifications = self.identity.tables().qualifications;
        let (en, hi) = qualifications[rng.gen_range(0..qualifications.len())];
        let created_at = now - Duration::days(rng.gen_range(180..2000));

        Teacher {
            base: identity.into_base(created_at, rng),
            gender,
            employee_id: format!("EMP{:04}", idx + 1),
            department: subjects[0].department(),
            grade_band: band,
            subjects,
            classes,
            qualification: Bilingual::new(en, hi),
            is_class_teacher: class_teacher_of.is_some(),
            class_teacher_of,
        }
    }
}

impl Default for TeacherGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Class ids taught by a teacher, without duplicates.
pub fn taught_classes(teacher: &Teacher) -> Vec<String> {
    let mut seen = HashSet::new();
    teacher
        .classes
        .iter()
        .map(|c| class_id(c.grade, c.section))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(count: usize) -> Vec<Teacher> {
        let teacher_gen = TeacherGenerator::with_parts(
            TeacherConfig {
                teacher_count: count,
                ..Default::default()
            },
            IdentityGenerator::new(),
        )
        .unwrap();
        let grades: Vec<u8> = (1..=10).collect();
        teacher_gen
            .generate(
                &grades,
                &['A', 'B', 'C'],
                OffsetDateTime::now_utc(),
                &mut rand::thread_rng(),
            )
            .unwrap()
    }

    #[test]
    fn test_generate_teachers() {
        let teachers = generate(20);
        assert_eq!(teachers.len(), 20);

        let employee_ids: HashSet<_> = teachers.iter().map(|t| &t.employee_id).collect();
        assert_eq!(employee_ids.len(), 20);

        for t in &teachers {
            assert!((1..=2).contains(&t.subjects.len()));
            assert!((3..=5).contains(&t.classes.len()));
            assert!(t.base.email.ends_with("@demoschool.edu"));
            assert_eq!(t.department, t.subjects[0].department());
        }
    }

    #[test]
    fn test_assignments_valid_for_band() {
        for t in generate(30) {
            for subject in &t.subjects {
                assert!(t.grade_band.subjects().contains(subject));
            }

            let unique: HashSet<_> = t.classes.iter().collect();
            assert_eq!(unique.len(), t.classes.len());

            for class in &t.classes {
                assert!(t.grade_band.contains(class.grade));
                assert!(t.subjects.contains(&class.subject));
            }
        }
    }

    #[test]
    fn test_one_class_teacher_per_class() {
        let teachers = generate(40);
        let owned: Vec<_> = teachers
            .iter()
            .filter_map(|t| t.class_teacher_of.clone())
            .collect();
        let unique: HashSet<_> = owned.iter().collect();
        assert_eq!(unique.len(), owned.len());

        for t in &teachers {
            assert_eq!(t.is_class_teacher, t.class_teacher_of.is_some());
            if let Some(class) = &t.class_teacher_of {
                assert!(taught_classes(t).contains(class));
            }
        }
    }

    #[test]
    fn test_too_few_assignments_rejected() {
        let result = TeacherGenerator::new().generate(
            &[3],
            &['A'],
            OffsetDateTime::now_utc(),
            &mut rand::thread_rng(),
        );
        assert!(matches!(result, Err(GenerationError::InvalidConfig(_))));

        // One grade in three sections is just enough for three classes.
        let teachers = TeacherGenerator::new()
            .generate(
                &[3],
                &['A', 'B', 'C'],
                OffsetDateTime::now_utc(),
                &mut rand::thread_rng(),
            )
            .unwrap();
        assert!(teachers.iter().all(|t| (3..=5).contains(&t.classes.len())));
    }

    #[test]
    fn test_subjects_beyond_band_rejected() {
        let config = TeacherConfig {
            subjects_per_teacher: (1, 8),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_requires_grades() {
        let result = TeacherGenerator::new().generate(
            &[],
            &['A'],
            OffsetDateTime::now_utc(),
            &mut rand::thread_rng(),
        );
        assert!(result.is_err());
    }
}
