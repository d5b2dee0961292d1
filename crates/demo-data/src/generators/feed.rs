//! Activity feed (classroom moment) synthesis.

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use school::models::{
    ActivityFeedItem, FeedComment, FeedVisibility, MediaItem, MediaKind, MomentType,
    ReactionCounts, Teacher,
};
use school::{Bilingual, Role};

use super::identity::IdentityGenerator;
use super::new_id;
use super::teacher::taught_classes;
use crate::error::{GenerationError, Result, ensure_probability, ensure_range};
use crate::tables::moments::{
    COMMENT_PHRASES, FALLBACK_TEMPLATE, MEDIA_CAPTIONS, MomentTemplate, templates_for, topics_for,
};
use crate::tables::{Pair, fill};

/// Largest mean accepted for a single reaction counter.
pub const MAX_REACTION_MEAN: f64 = 10_000.0;

/// Configuration for the activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Moments generated for the snapshot.
    pub moment_count: usize,
    /// Moments are spread over this many days before now.
    pub history_days: i64,
    /// Probability that a media item is a video.
    pub video_probability: f64,
    /// Media items per moment (inclusive range).
    pub media_per_moment: (usize, usize),
    /// Comments per moment (inclusive range).
    pub comments_per_moment: (usize, usize),
    /// Comments are dated within this many days before now.
    pub comment_window_days: i64,
    /// Mean of each reaction counter: heart, clap, smile, celebrate, fire.
    pub reaction_means: [f64; 5],
    /// Probability that a moment is pinned.
    pub pin_probability: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            moment_count: 30,
            history_days: 30,
            video_probability: 0.15,
            media_per_moment: (1, 4),
            comments_per_moment: (0, 4),
            comment_window_days: 7,
            reaction_means: [12.0, 8.0, 6.0, 4.0, 3.0],
            pin_probability: 0.05,
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_probability("video_probability", self.video_probability)?;
        ensure_probability("pin_probability", self.pin_probability)?;
        ensure_range("media_per_moment", self.media_per_moment)?;
        ensure_range("comments_per_moment", self.comments_per_moment)?;
        if self.media_per_moment.0 == 0 {
            return Err(GenerationError::config(
                "every moment needs at least one media item",
            ));
        }
        if self.history_days <= 0 || self.comment_window_days <= 0 {
            return Err(GenerationError::config(
                "history_days and comment_window_days must be positive",
            ));
        }
        if self
            .reaction_means
            .iter()
            .any(|&mean| mean.is_nan() || mean <= 0.0 || mean > MAX_REACTION_MEAN)
        {
            return Err(GenerationError::config(format!(
                "reaction means must lie in (0, {MAX_REACTION_MEAN}]"
            )));
        }
        Ok(())
    }
}

/// Produces classroom moments for the activity feed.
pub struct ActivityFeedSynthesizer {
    config: FeedConfig,
    identity: IdentityGenerator,
}

impl ActivityFeedSynthesizer {
    pub fn new() -> Self {
        Self {
            config: FeedConfig::default(),
            identity: IdentityGenerator::new(),
        }
    }

    pub fn with_parts(config: FeedConfig, identity: IdentityGenerator) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, identity })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Generates `count` moments authored by `authors`, newest first.
    pub fn generate(
        &self,
        count: usize,
        authors: &[Teacher],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<ActivityFeedItem>> {
        self.config.validate()?;
        if count > 0 && authors.is_empty() {
            return Err(GenerationError::config(
                "the activity feed needs at least one teacher to author moments",
            ));
        }
        if let Some(idle) = authors.iter().find(|t| t.classes.is_empty()) {
            return Err(GenerationError::config(format!(
                "teacher {} has no classes to post moments for",
                idle.employee_id
            )));
        }

        let reactions = self
            .config
            .reaction_means
            .iter()
            .map(|&mean| Poisson::new(mean))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GenerationError::config(format!("reaction distribution: {e}")))?;

        let mut items: Vec<ActivityFeedItem> = (0..count)
            .map(|_| {
                let author = &authors[rng.gen_range(0..authors.len())];
                self.generate_single(author, &reactions, now, rng)
            })
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(moments = items.len(), "Generated activity feed");

        Ok(items)
    }

    fn generate_single(
        &self,
        author: &Teacher,
        reactions: &[Poisson<f64>],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> ActivityFeedItem {
        let moment_type = MomentType::ALL[rng.gen_range(0..MomentType::ALL.len())];
        let template = pick_template(moment_type, rng);
        let topics = topics_for(moment_type);
        let topic = topics[rng.gen_range(0..topics.len())];

        let (title_en, title_hi) = fill(template.title, "topic", topic);
        let (content_en, content_hi) = fill(template.content, "topic", topic);

        let classes = taught_classes(author);
        let class_id = classes[rng.gen_range(0..classes.len())].clone();

        let window = Duration::days(self.config.history_days).whole_seconds();
        let created_at = now - Duration::seconds(rng.gen_range(0..window));

        let media = self.generate_media(rng);
        let comments = self.generate_comments(created_at, now, rng);
        let counts: Vec<u32> = reactions.iter().map(|d| d.sample(rng) as u32).collect();

        ActivityFeedItem {
            id: new_id(rng),
            author_id: author.base.id,
            author_name: author.base.name.clone(),
            moment_type,
            tags: vec![
                moment_type.as_str().to_string(),
                class_id.to_lowercase(),
                topic_tag(topic),
            ],
            class_id,
            title: Bilingual::new(title_en, title_hi),
            content: Bilingual::new(content_en, content_hi),
            media,
            reactions: ReactionCounts::new(counts[0], counts[1], counts[2], counts[3], counts[4]),
            comments,
            visibility: pick_visibility(rng),
            is_pinned: rng.gen_bool(self.config.pin_probability),
            created_at,
        }
    }

    fn generate_media(&self, rng: &mut impl Rng) -> Vec<MediaItem> {
        let (min, max) = self.config.media_per_moment;
        let count = rng.gen_range(min..=max);

        (0..count)
            .map(|_| {
                let id = new_id(rng);
                let (kind, url, thumbnail_url) = if rng.gen_bool(self.config.video_probability) {
                    (
                        MediaKind::Video,
                        format!("https://media.demoschool.edu/moments/{id}.mp4"),
                        Some(format!("https://media.demoschool.edu/moments/{id}-thumb.jpg")),
                    )
                } else {
                    (
                        MediaKind::Image,
                        format!("https://media.demoschool.edu/moments/{id}.jpg"),
                        None,
                    )
                };
                let (en, hi) = MEDIA_CAPTIONS[rng.gen_range(0..MEDIA_CAPTIONS.len())];

                MediaItem {
                    id,
                    kind,
                    url,
                    thumbnail_url,
                    caption: Bilingual::new(en, hi),
                }
            })
            .collect()
    }

    /// Comments dated within the comment window, never before the moment itself.
    fn generate_comments(
        &self,
        created_at: OffsetDateTime,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<FeedComment> {
        let (min, max) = self.config.comments_per_moment;
        let count = rng.gen_range(min..=max);
        let window = Duration::days(self.config.comment_window_days).whole_seconds();

        let mut comments: Vec<FeedComment> = (0..count)
            .map(|_| {
                let author = self.identity.generate(Role::Parent, None, rng);
                let (en, hi) = COMMENT_PHRASES[rng.gen_range(0..COMMENT_PHRASES.len())];
                let posted = (now - Duration::seconds(rng.gen_range(0..window))).max(created_at);

                FeedComment {
                    id: new_id(rng),
                    author_name: author.name,
                    text: Bilingual::new(en, hi),
                    created_at: posted,
                }
            })
            .collect();

        comments.sort_by_key(|c| c.created_at);
        comments
    }
}

impl Default for ActivityFeedSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered template for the type, or the fallback when none exist.
pub fn pick_template(kind: MomentType, rng: &mut impl Rng) -> MomentTemplate {
    let templates = templates_for(kind);
    if templates.is_empty() {
        FALLBACK_TEMPLATE
    } else {
        templates[rng.gen_range(0..templates.len())]
    }
}

fn topic_tag((en, _): Pair) -> String {
    en.trim_start_matches("the ")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn pick_visibility(rng: &mut impl Rng) -> FeedVisibility {
    let roll: f64 = rng.r#gen();
    if roll < 0.6 {
        FeedVisibility::Public
    } else if roll < 0.9 {
        FeedVisibility::ClassOnly
    } else {
        FeedVisibility::ParentsOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::teacher::TeacherGenerator;

    fn teachers() -> Vec<Teacher> {
        let grades: Vec<u8> = (1..=10).collect();
        TeacherGenerator::new()
            .generate(
                &grades,
                &['A', 'B'],
                OffsetDateTime::now_utc(),
                &mut rand::thread_rng(),
            )
            .unwrap()
    }

    fn feed(count: usize) -> Vec<ActivityFeedItem> {
        ActivityFeedSynthesizer::new()
            .generate(
                count,
                &teachers(),
                OffsetDateTime::now_utc(),
                &mut rand::thread_rng(),
            )
            .unwrap()
    }

    #[test]
    fn test_feed_sorted_newest_first() {
        let items = feed(50);
        assert_eq!(items.len(), 50);
        for pair in items.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_moment_structure() {
        let now = OffsetDateTime::now_utc();
        for item in feed(100) {
            assert!((1..=4).contains(&item.media.len()));
            assert!(item.comments.len() <= 4);
            assert!(item.title.is_complete());
            assert!(item.content.is_complete());
            assert!(!item.title.en.contains("{topic}"));
            assert!(!item.content.hi.contains("{topic}"));
            assert!(item.created_at <= now);
            assert!(item.created_at >= now - Duration::days(30));

            let r = item.reactions;
            assert_eq!(
                r.total(),
                r.heart() + r.clap() + r.smile() + r.celebrate() + r.fire()
            );

            for media in &item.media {
                assert!(media.caption.is_complete());
                assert_eq!(media.kind == MediaKind::Video, media.thumbnail_url.is_some());
            }
            for comment in &item.comments {
                assert!(comment.text.is_complete());
                assert!(comment.created_at >= item.created_at);
                assert!(
                    comment.created_at >= now - Duration::days(7)
                        || comment.created_at == item.created_at
                );
            }
        }
    }

    #[test]
    fn test_topic_languages_stay_paired() {
        for item in feed(100) {
            let topics = topics_for(item.moment_type);
            let paired = topics
                .iter()
                .any(|(en, hi)| item.title.en.contains(en) && item.title.hi.contains(hi));
            assert!(paired, "mismatched topic in {:?}", item.title);
        }
    }

    #[test]
    fn test_fallback_template_for_unregistered_types() {
        let mut rng = rand::thread_rng();
        for kind in [MomentType::Music, MomentType::Reading] {
            let template = pick_template(kind, &mut rng);
            assert_eq!(template.title, FALLBACK_TEMPLATE.title);
            assert_eq!(template.content, FALLBACK_TEMPLATE.content);
        }
        let template = pick_template(MomentType::Art, &mut rng);
        assert_ne!(template.title, FALLBACK_TEMPLATE.title);
    }

    #[test]
    fn test_video_share() {
        use rand::SeedableRng;
        let synthesizer = ActivityFeedSynthesizer::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(15);

        let media: Vec<MediaItem> = (0..2000)
            .flat_map(|_| synthesizer.generate_media(&mut rng))
            .collect();
        let videos = media.iter().filter(|m| m.kind == MediaKind::Video).count();
        let share = videos as f64 / media.len() as f64;
        assert!((share - 0.15).abs() < 0.02, "video share {share}");
    }

    #[test]
    fn test_moments_in_authors_classes() {
        let teachers = teachers();
        let items = ActivityFeedSynthesizer::new()
            .generate(40, &teachers, OffsetDateTime::now_utc(), &mut rand::thread_rng())
            .unwrap();

        for item in items {
            let author = teachers.iter().find(|t| t.base.id == item.author_id).unwrap();
            assert!(taught_classes(author).contains(&item.class_id));
            assert_eq!(item.author_name, author.base.name);
        }
    }

    #[test]
    fn test_requires_authors() {
        let result = ActivityFeedSynthesizer::new().generate(
            5,
            &[],
            OffsetDateTime::now_utc(),
            &mut rand::thread_rng(),
        );
        assert!(result.is_err());

        let empty = ActivityFeedSynthesizer::new()
            .generate(0, &[], OffsetDateTime::now_utc(), &mut rand::thread_rng())
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_author_without_classes_rejected() {
        let mut authors = teachers();
        authors[0].classes.clear();
        let result = ActivityFeedSynthesizer::new().generate(
            5,
            &authors,
            OffsetDateTime::now_utc(),
            &mut rand::thread_rng(),
        );
        assert!(matches!(result, Err(GenerationError::InvalidConfig(_))));
    }

    #[test]
    fn test_reaction_means_bounded() {
        for mean in [0.0, -1.0, f64::NAN, MAX_REACTION_MEAN * 2.0, 1e12] {
            let mut reaction_means = FeedConfig::default().reaction_means;
            reaction_means[2] = mean;
            let config = FeedConfig {
                reaction_means,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "mean {mean} accepted");
        }

        let config = FeedConfig {
            reaction_means: [MAX_REACTION_MEAN; 5],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_topic_tag() {
        assert_eq!(topic_tag(("the water cycle", "जल चक्र")), "water-cycle");
        assert_eq!(topic_tag(("Diwali", "दीवाली")), "diwali");
    }
}
