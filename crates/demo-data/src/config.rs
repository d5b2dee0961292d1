//! Configuration types for demo data generation.
//!
//! Each generator owns its configuration struct; [`DemoConfig`] gathers them
//! for the builder. Every field has a default, so a JSON document only needs
//! the values it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
pub use crate::generators::{
    FeedConfig, LinkerConfig, PreschoolConfig, RosterConfig, ScoringConfig, TeacherConfig,
};

/// Configuration for a whole demo snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub roster: RosterConfig,
    pub scoring: ScoringConfig,
    pub teachers: TeacherConfig,
    pub linker: LinkerConfig,
    pub feed: FeedConfig,
    pub preschool: PreschoolConfig,
}

impl DemoConfig {
    /// Checks every section, returning the first failure.
    pub fn validate(&self) -> Result<()> {
        self.roster.validate()?;
        self.scoring.validate()?;
        self.teachers.validate()?;
        self.linker.validate()?;
        self.feed.validate()?;
        self.preschool.validate()
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DemoConfig = serde_json::from_str(json)
            .map_err(|e| GenerationError::config(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// A compact population for quick runs and tests.
    pub fn small() -> Self {
        Self {
            roster: RosterConfig {
                grades: vec![1, 4, 7, 10],
                sections: vec!['A', 'B'],
                students_per_section: 3,
                ..Default::default()
            },
            teachers: TeacherConfig {
                teacher_count: 6,
                ..Default::default()
            },
            feed: FeedConfig {
                moment_count: 10,
                ..Default::default()
            },
            preschool: PreschoolConfig {
                children_per_class: 4,
                activities_per_class: 5,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// A full school: ten grades in three sections with a busy feed.
    pub fn full() -> Self {
        Self {
            roster: RosterConfig {
                students_per_section: 10,
                ..Default::default()
            },
            teachers: TeacherConfig {
                teacher_count: 30,
                ..Default::default()
            },
            feed: FeedConfig {
                moment_count: 60,
                ..Default::default()
            },
            preschool: PreschoolConfig {
                children_per_class: 12,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
