//! Gamification and development score synthesis.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use school::models::{
    DevelopmentScores, EngagementTier, MOOD_CHECKIN_XP, Mood, MoodEntry, ParentBadge, Streaks,
    StudentBadge, XpProgress,
};

use crate::error::{GenerationError, Result, ensure_range};

/// A weighted half-open XP band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XpBand {
    pub weight: f64,
    pub min: u32,
    /// Exclusive.
    pub max: u32,
}

/// Engagement profile granted to a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Engagement {
    pub score: u8,
    pub tier: EngagementTier,
    pub xp: u32,
    pub badges: Vec<ParentBadge>,
}

/// Configuration for score synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Student XP bands. Weights must sum to 1.
    pub xp_bands: Vec<XpBand>,
    /// Weights of bronze, silver, gold and platinum. Must sum to 1.
    pub engagement_weights: [f64; 4],
    /// Badges per student (inclusive range).
    pub badges_per_student: (usize, usize),
    /// Mood check-ins per student (inclusive range).
    pub mood_entries: (usize, usize),
    /// Per-child base development score (inclusive range).
    pub development_base: (u8, u8),
    /// Maximum per-domain deviation from the base.
    pub development_jitter: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            // Skewed population: most students sit between levels 2 and 5.
            xp_bands: vec![
                XpBand { weight: 0.10, min: 0, max: 100 },
                XpBand { weight: 0.50, min: 100, max: 500 },
                XpBand { weight: 0.30, min: 500, max: 1500 },
                XpBand { weight: 0.10, min: 1500, max: 3000 },
            ],
            engagement_weights: [0.20, 0.30, 0.30, 0.20],
            badges_per_student: (2, 6),
            mood_entries: (3, 7),
            development_base: (60, 90),
            development_jitter: 5,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.xp_bands.is_empty() {
            return Err(GenerationError::config("xp_bands must not be empty"));
        }
        for band in &self.xp_bands {
            if band.min >= band.max {
                return Err(GenerationError::config(format!(
                    "xp band {}..{} is empty",
                    band.min, band.max
                )));
            }
        }
        ensure_weights("xp_bands", self.xp_bands.iter().map(|b| b.weight))?;
        ensure_weights("engagement_weights", self.engagement_weights.iter().copied())?;

        ensure_range("badges_per_student", self.badges_per_student)?;
        if self.badges_per_student.1 > StudentBadge::ALL.len() {
            return Err(GenerationError::config(format!(
                "at most {} distinct student badges exist",
                StudentBadge::ALL.len()
            )));
        }
        ensure_range("mood_entries", self.mood_entries)?;
        ensure_range("development_base", self.development_base)?;
        if self.development_base.1 > 100 {
            return Err(GenerationError::config(
                "development_base must stay within 0..=100",
            ));
        }
        Ok(())
    }
}

fn ensure_weights(name: &str, weights: impl Iterator<Item = f64>) -> Result<()> {
    let mut total = 0.0;
    for weight in weights {
        if weight.is_nan() || weight < 0.0 {
            return Err(GenerationError::config(format!(
                "{name} contains a negative weight"
            )));
        }
        total += weight;
    }
    if (total - 1.0).abs() > 1e-6 {
        return Err(GenerationError::config(format!(
            "{name} weights sum to {total}, expected 1.0"
        )));
    }
    Ok(())
}

/// Picks an index from `weights` (summing to 1) with a single uniform roll.
fn pick_weighted(weights: impl IntoIterator<Item = f64>, rng: &mut impl Rng) -> usize {
    let roll: f64 = rng.r#gen();
    let mut cumulative = 0.0;
    let mut last = 0;

    for (i, weight) in weights.into_iter().enumerate() {
        cumulative += weight;
        last = i;
        if roll < cumulative {
            return i;
        }
    }

    last
}

/// Samples XP, badges, streaks, mood history, engagement and development scores.
#[derive(Debug, Clone)]
pub struct ScoringSynthesizer {
    config: ScoringConfig,
}

impl ScoringSynthesizer {
    pub fn new() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    pub fn with_config(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Samples student XP from the weighted bands and derives the level.
    pub fn student_progress(&self, rng: &mut impl Rng) -> XpProgress {
        let idx = pick_weighted(self.config.xp_bands.iter().map(|b| b.weight), rng);
        let band = self.config.xp_bands[idx];
        XpProgress::new(rng.gen_range(band.min..band.max))
    }

    /// A uniform sample of distinct badges: shuffle the catalog, keep a prefix.
    pub fn student_badges(&self, rng: &mut impl Rng) -> Vec<StudentBadge> {
        let (min, max) = self.config.badges_per_student;
        let count = rng.gen_range(min..=max);

        let mut catalog = StudentBadge::ALL.to_vec();
        catalog.shuffle(rng);
        catalog.truncate(count);
        catalog
    }

    pub fn streaks(&self, rng: &mut impl Rng) -> Streaks {
        Streaks {
            homework: rng.gen_range(0..=30),
            attendance: rng.gen_range(0..=60),
            reading: rng.gen_range(0..=21),
            login: rng.gen_range(0..=45),
        }
    }

    /// Daily check-ins ending at `today`, newest first.
    pub fn mood_history(&self, today: Date, rng: &mut impl Rng) -> Vec<MoodEntry> {
        let (min, max) = self.config.mood_entries;
        let count = rng.gen_range(min..=max);

        (0..count)
            .map(|days_ago| MoodEntry {
                date: today - Duration::days(days_ago as i64),
                mood: Mood::ALL[rng.gen_range(0..Mood::ALL.len())],
                xp_earned: MOOD_CHECKIN_XP,
            })
            .collect()
    }

    /// Picks a tier by weight, then a score and XP inside that tier's ranges.
    pub fn parent_engagement(&self, rng: &mut impl Rng) -> Engagement {
        let idx = pick_weighted(self.config.engagement_weights, rng);
        let tier = EngagementTier::ALL[idx];

        Engagement {
            score: rng.gen_range(tier.score_range()),
            tier,
            xp: rng.gen_range(tier.xp_range()),
            badges: tier.badges().to_vec(),
        }
    }

    /// One base per child, each domain jittered independently around it.
    pub fn development_scores(&self, rng: &mut impl Rng) -> DevelopmentScores {
        let (min, max) = self.config.development_base;
        let base = i16::from(rng.gen_range(min..=max));
        let jitter = i16::from(self.config.development_jitter);

        let domains = [(); 5].map(|_| (base + rng.gen_range(-jitter..=jitter)).clamp(0, 100) as u8);
        DevelopmentScores::from_domains(domains)
    }

    /// A lower earlier-term score: each domain drops by 5 plus `0..10`, floored at 0.
    pub fn previous_scores(
        &self,
        current: &DevelopmentScores,
        rng: &mut impl Rng,
    ) -> DevelopmentScores {
        current.map(|score| score.saturating_sub(5 + rng.gen_range(0..10)))
    }
}

impl Default for ScoringSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_xp_band_shape() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = StdRng::seed_from_u64(12345);

        let samples: Vec<u32> = (0..10_000)
            .map(|_| scoring.student_progress(&mut rng).xp())
            .collect();
        let share = |lo: u32, hi: u32| {
            samples.iter().filter(|&&xp| xp >= lo && xp < hi).count() as f64 / 10_000.0
        };

        assert!((share(0, 100) - 0.10).abs() < 0.02);
        assert!((share(100, 500) - 0.50).abs() < 0.02);
        assert!((share(500, 1500) - 0.30).abs() < 0.02);
        assert!((share(1500, 3000) - 0.10).abs() < 0.02);
        assert!(samples.iter().all(|&xp| xp < 3000));
    }

    #[test]
    fn test_level_tracks_xp() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let progress = scoring.student_progress(&mut rng);
            assert_eq!(progress.level(), progress.xp() / 100 + 1);
        }
    }

    #[test]
    fn test_badges_are_distinct() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let badges = scoring.student_badges(&mut rng);
            assert!((2..=6).contains(&badges.len()));
            let unique: HashSet<_> = badges.iter().collect();
            assert_eq!(unique.len(), badges.len());
        }
    }

    #[test]
    fn test_badges_uniform_over_catalog() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = std::collections::HashMap::new();

        for _ in 0..6000 {
            for badge in scoring.student_badges(&mut rng) {
                *counts.entry(badge).or_insert(0usize) += 1;
            }
        }

        // Mean of 4 badges per student over 12 badges: ~2000 each.
        assert_eq!(counts.len(), StudentBadge::ALL.len());
        for (badge, count) in counts {
            assert!(
                (1700..2300).contains(&count),
                "{badge:?} drawn {count} times"
            );
        }
    }

    #[test]
    fn test_mood_history_newest_first() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = rand::thread_rng();
        let today = time::OffsetDateTime::now_utc().date();

        let history = scoring.mood_history(today, &mut rng);
        assert!((3..=7).contains(&history.len()));
        assert_eq!(history[0].date, today);
        for pair in history.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
        assert!(history.iter().all(|e| e.xp_earned == MOOD_CHECKIN_XP));
    }

    #[test]
    fn test_engagement_consistent_with_tier() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut per_tier = [0usize; 4];

        for _ in 0..5000 {
            let engagement = scoring.parent_engagement(&mut rng);
            assert!(engagement.tier.score_range().contains(&engagement.score));
            assert!(engagement.tier.xp_range().contains(&engagement.xp));
            assert_eq!(EngagementTier::from_score(engagement.score), engagement.tier);
            assert_eq!(engagement.badges, engagement.tier.badges());
            per_tier[engagement.tier as usize] += 1;
        }

        let shares = per_tier.map(|c| c as f64 / 5000.0);
        for (share, expected) in shares.iter().zip([0.2, 0.3, 0.3, 0.2]) {
            assert!((share - expected).abs() < 0.03, "share {share} vs {expected}");
        }
    }

    #[test]
    fn test_development_scores_near_base() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = rand::thread_rng();

        for _ in 0..500 {
            let scores = scoring.development_scores(&mut rng);
            let values: Vec<u8> = scores.domains().iter().map(|(_, s)| *s).collect();
            let spread = values.iter().max().unwrap() - values.iter().min().unwrap();
            assert!(spread <= 10);
            assert!(values.iter().all(|&s| (55..=95).contains(&s)));

            let sum: u32 = values.iter().map(|&s| u32::from(s)).sum();
            assert_eq!(scores.overall(), (f64::from(sum) / 5.0).round() as u8);
        }
    }

    #[test]
    fn test_previous_scores_never_exceed_current() {
        let scoring = ScoringSynthesizer::new();
        let mut rng = rand::thread_rng();

        for _ in 0..500 {
            let current = scoring.development_scores(&mut rng);
            let previous = scoring.previous_scores(&current, &mut rng);
            assert!(previous.overall() <= current.overall());
            for ((_, now), (_, before)) in current.domains().iter().zip(previous.domains()) {
                assert!(before + 5 <= *now || before == 0);
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScoringConfig {
            engagement_weights: [0.5, 0.5, 0.5, 0.5],
            ..Default::default()
        };
        assert!(ScoringSynthesizer::with_config(config).is_err());

        let config = ScoringConfig {
            badges_per_student: (2, 20),
            ..Default::default()
        };
        assert!(ScoringSynthesizer::with_config(config).is_err());
    }
}
