//! Domain model for the demo school dashboard.
//!
//! These are the shapes the presentation layer consumes: people (students,
//! parents, teachers, preschool children), classroom moments for the activity
//! feed, and preschool activity/observation/progress-report records.
//!
//! Value types that carry an invariant ([`models::XpProgress`],
//! [`models::DevelopmentScores`], [`models::ReactionCounts`]) keep their fields
//! private and recompute derived values on construction and deserialization.

pub mod models;

pub use models::{Bilingual, Gender, Person, PersonBase, Role};
