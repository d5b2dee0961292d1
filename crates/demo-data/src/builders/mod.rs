//! Fluent builder APIs for demo snapshots.
//!
//! The [`DemoBuilder`] composes every generator into a [`DemoSnapshot`]:
//! students, their parents, teachers, the activity feed, and the preschool
//! section, all cross-referenced by id.

mod demo;
mod snapshot;

pub use demo::DemoBuilder;
pub use snapshot::{DemoMetrics, DemoSnapshot};
