//! Demo data generation for the school dashboard.
//!
//! This crate fabricates a consistent in-memory population: students across
//! grades and sections, their parents, teachers, preschool children with
//! activities, observations and progress reports, and a classroom activity
//! feed. Every text field is bilingual (English and Hindi) and every id
//! reference resolves inside the same snapshot.
//!
//! # Quick Start
//!
//! ```rust
//! use demo_data::prelude::*;
//!
//! let snapshot = DemoBuilder::new()
//!     .with_roster(RosterConfig {
//!         grades: vec![3, 4],
//!         sections: vec!['A', 'B'],
//!         students_per_section: 6,
//!         ..Default::default()
//!     })
//!     .with_seed(2024)
//!     .build()?;
//!
//! assert_eq!(snapshot.students.len(), 24);
//! snapshot.verify()?;
//! # Ok::<(), demo_data::GenerationError>(())
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod generators;
pub mod tables;

pub use error::{GenerationError, Result};

// Re-export the domain model crate
pub use school;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{DemoBuilder, DemoMetrics, DemoSnapshot};
    pub use crate::config::{
        DemoConfig, FeedConfig, LinkerConfig, PreschoolConfig, RosterConfig, ScoringConfig,
        TeacherConfig,
    };
    pub use crate::generators::{
        ActivityFeedSynthesizer, IdentityGenerator, PreschoolData, PreschoolSynthesizer,
        RelationshipLinker, RosterGenerator, ScoringSynthesizer, TeacherGenerator,
    };
    pub use crate::tables::SeedTables;
    pub use crate::{GenerationError, Result};
    pub use school::{Bilingual, Gender, Person, Role};
}
