//! Fluent builder that composes every generator into one snapshot.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;
use tracing::info;

use super::snapshot::{DemoMetrics, DemoSnapshot};
use crate::config::{
    DemoConfig, FeedConfig, LinkerConfig, PreschoolConfig, RosterConfig, ScoringConfig,
    TeacherConfig,
};
use crate::error::Result;
use crate::generators::{
    ActivityFeedSynthesizer, IdentityGenerator, PreschoolSynthesizer, RelationshipLinker,
    RosterGenerator, ScoringSynthesizer, TeacherGenerator,
};
use crate::tables::SeedTables;

/// Builder for a complete demo snapshot.
///
/// # Example
///
/// ```rust
/// use demo_data::prelude::*;
///
/// let snapshot = DemoBuilder::small()
///     .with_seed(42)
///     .with_metrics(true)
///     .build()
///     .unwrap();
///
/// assert!(!snapshot.students.is_empty());
/// assert!(snapshot.metrics.is_some());
/// ```
pub struct DemoBuilder {
    config: DemoConfig,
    tables: SeedTables,
    seed: Option<u64>,
    reference_time: Option<OffsetDateTime>,
    track_metrics: bool,
}

impl Default for DemoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: DemoConfig::default(),
            tables: SeedTables::builtin(),
            seed: None,
            reference_time: None,
            track_metrics: false,
        }
    }

    pub fn with_config(mut self, config: DemoConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_roster(mut self, roster: RosterConfig) -> Self {
        self.config.roster = roster;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    pub fn with_teachers(mut self, teachers: TeacherConfig) -> Self {
        self.config.teachers = teachers;
        self
    }

    pub fn with_linker(mut self, linker: LinkerConfig) -> Self {
        self.config.linker = linker;
        self
    }

    pub fn with_feed(mut self, feed: FeedConfig) -> Self {
        self.config.feed = feed;
        self
    }

    pub fn with_preschool(mut self, preschool: PreschoolConfig) -> Self {
        self.config.preschool = preschool;
        self
    }

    /// Replaces the built-in seed tables.
    pub fn with_tables(mut self, tables: SeedTables) -> Self {
        self.tables = tables;
        self
    }

    /// Seeds the random source so the same snapshot is produced on every run.
    ///
    /// Only affects [`build`](Self::build); callers of
    /// [`build_with_rng`](Self::build_with_rng) supply their own source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fixes "now" for dates, ages and the feed window. Defaults to the current time.
    pub fn with_reference_time(mut self, now: OffsetDateTime) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Builds the snapshot with a seeded source when a seed is set, otherwise
    /// with the thread-local source.
    pub fn build(&self) -> Result<DemoSnapshot> {
        match self.seed {
            Some(seed) => self.build_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.build_with_rng(&mut rand::thread_rng()),
        }
    }

    /// Runs every generator in order and verifies the result.
    ///
    /// Students come first, then teachers and parents (the linker needs the
    /// full roster), then the activity feed and the preschool section.
    pub fn build_with_rng(&self, rng: &mut impl Rng) -> Result<DemoSnapshot> {
        let start = self.track_metrics.then(Instant::now);
        let now = self.reference_time.unwrap_or_else(OffsetDateTime::now_utc);
        let config = &self.config;

        config.validate()?;
        let identity = IdentityGenerator::with_tables(self.tables)?;
        let scoring = ScoringSynthesizer::with_config(config.scoring.clone())?;

        let roster =
            RosterGenerator::with_parts(config.roster.clone(), identity.clone(), scoring.clone())?;
        let students = roster.generate(now, rng)?;
        info!(students = students.len(), "Generated roster");

        let teachers = TeacherGenerator::with_parts(config.teachers.clone(), identity.clone())?
            .generate(&config.roster.grades, &config.roster.sections, now, rng)?;
        info!(teachers = teachers.len(), "Generated teachers");

        let linker =
            RelationshipLinker::with_parts(config.linker.clone(), identity.clone(), scoring.clone())?;
        let parents = linker.link(&students, now, rng);
        info!(parents = parents.len(), "Linked parents");

        let activity_feed = ActivityFeedSynthesizer::with_parts(config.feed.clone(), identity.clone())?
            .generate(config.feed.moment_count, &teachers, now, rng)?;
        info!(moments = activity_feed.len(), "Generated activity feed");

        let preschool = PreschoolSynthesizer::with_parts(
            config.preschool.clone(),
            identity,
            scoring,
            linker,
        )?
        .generate(now, rng)?;
        info!(
            children = preschool.children.len(),
            reports = preschool.reports.len(),
            "Generated preschool data"
        );

        let mut snapshot = DemoSnapshot {
            students,
            parents,
            teachers,
            activity_feed,
            preschool,
            metrics: None,
        };
        snapshot.verify()?;

        if let Some(start) = start {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            snapshot.metrics = Some(DemoMetrics::from_snapshot(&snapshot, elapsed_ms));
            info!(elapsed_ms, "Demo snapshot complete");
        }

        Ok(snapshot)
    }

    // ========================================================================
    // Presets
    // ========================================================================

    /// A handful of classes, teachers and preschool children.
    pub fn small() -> Self {
        Self::new().with_config(DemoConfig::small())
    }

    /// Every grade and section with larger classes and a busier feed.
    pub fn full() -> Self {
        Self::new().with_config(DemoConfig::full())
    }
}
