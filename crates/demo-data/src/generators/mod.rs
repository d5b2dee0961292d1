//! Entity generators for demo data.
//!
//! This module provides generators for the dashboard's demo population:
//! - [`IdentityGenerator`]: Bilingual names, emails, and phone numbers
//! - [`ScoringSynthesizer`]: XP, levels, badges, engagement, and development scores
//! - [`RosterGenerator`]: Students across grades and sections
//! - [`TeacherGenerator`]: Teachers with subjects and class assignments
//! - [`RelationshipLinker`]: Parents linked to children, spouses, and siblings
//! - [`ActivityFeedSynthesizer`]: Classroom moments with media, reactions, and comments
//! - [`PreschoolSynthesizer`]: Preschool children, activities, observations, and reports

pub mod feed;
pub mod identity;
pub mod linker;
pub mod preschool;
pub mod roster;
pub mod scoring;
pub mod teacher;

use rand::Rng;
use uuid::Uuid;

pub use feed::{ActivityFeedSynthesizer, FeedConfig};
pub use identity::{GeneratedIdentity, IdentityGenerator};
pub use linker::{Linkable, LinkerConfig, RelationshipLinker, parents_by_child};
pub use preschool::{PreschoolConfig, PreschoolData, PreschoolSynthesizer};
pub use roster::{RosterConfig, RosterGenerator};
pub use scoring::{Engagement, ScoringConfig, ScoringSynthesizer, XpBand};
pub use teacher::{TeacherConfig, TeacherGenerator, taught_classes};

/// A v4 UUID drawn from `rng`, so seeded runs produce the same ids.
pub fn new_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}
