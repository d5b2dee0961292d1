//! Static bilingual reference data.
//!
//! Tables are plain `&'static` slices. [`SeedTables`] bundles the ones the
//! identity generator draws from so tests can swap in smaller (or empty) sets.

pub mod moments;
pub mod names;
pub mod preschool;

use school::Gender;

use crate::error::{GenerationError, Result};

/// Regional grouping of a name. Surnames are preferably drawn from the same
/// group as the first name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameGroup {
    North,
    Punjabi,
    Bengali,
    South,
    West,
}

/// A name in English and Hindi tagged with its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedName {
    pub en: &'static str,
    pub hi: &'static str,
    pub group: NameGroup,
}

/// An English/Hindi pair.
pub type Pair = (&'static str, &'static str);

/// Tables consumed by the identity generator and parent synthesis.
#[derive(Debug, Clone, Copy)]
pub struct SeedTables {
    pub male_first_names: &'static [SeedName],
    pub female_first_names: &'static [SeedName],
    pub last_names: &'static [SeedName],
    pub occupations: &'static [Pair],
    pub qualifications: &'static [Pair],
}

impl SeedTables {
    /// The built-in tables.
    pub const fn builtin() -> Self {
        Self {
            male_first_names: names::MALE_FIRST_NAMES,
            female_first_names: names::FEMALE_FIRST_NAMES,
            last_names: names::LAST_NAMES,
            occupations: names::OCCUPATIONS,
            qualifications: names::QUALIFICATIONS,
        }
    }

    pub fn first_names(&self, gender: Gender) -> &'static [SeedName] {
        match gender {
            Gender::Male => self.male_first_names,
            Gender::Female => self.female_first_names,
        }
    }

    /// Fails on the first empty table.
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("male_first_names", self.male_first_names.is_empty()),
            ("female_first_names", self.female_first_names.is_empty()),
            ("last_names", self.last_names.is_empty()),
            ("occupations", self.occupations.is_empty()),
            ("qualifications", self.qualifications.is_empty()),
        ];

        match tables.into_iter().find(|(_, empty)| *empty) {
            Some((table, _)) => Err(GenerationError::EmptySeedTable { table }),
            None => Ok(()),
        }
    }
}

impl Default for SeedTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Replaces `{placeholder}` in both halves of a pair with the matching half of `value`.
pub fn fill(template: Pair, placeholder: &str, value: (&str, &str)) -> (String, String) {
    let key = format!("{{{placeholder}}}");
    (
        template.0.replace(&key, value.0),
        template.1.replace(&key, value.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_complete() {
        SeedTables::builtin().validate().unwrap();
        for name in SeedTables::builtin()
            .male_first_names
            .iter()
            .chain(names::FEMALE_FIRST_NAMES)
            .chain(names::LAST_NAMES)
        {
            assert!(!name.en.is_empty() && !name.hi.is_empty());
        }
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let tables = SeedTables {
            last_names: &[],
            ..SeedTables::builtin()
        };
        assert!(matches!(
            tables.validate(),
            Err(GenerationError::EmptySeedTable {
                table: "last_names"
            })
        ));
    }

    #[test]
    fn test_fill_substitutes_both_languages() {
        let (en, hi) = fill(
            ("Learning about {topic}", "{topic} के बारे में सीखना"),
            "topic",
            ("fractions", "भिन्न"),
        );
        assert_eq!(en, "Learning about fractions");
        assert_eq!(hi, "भिन्न के बारे में सीखना");
    }
}
