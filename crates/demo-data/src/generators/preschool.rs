//! Preschool children, classroom activities, observations and progress reports.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use school::models::{
    Attendance, ChildMood, DevelopmentDomain, DomainNarrative, EngagementLevel, Hprc,
    NarrativeBand, Observation, Parent, PreschoolActivity, PreschoolActivityType, PreschoolChild,
    PreschoolClass, TaggedChild,
};
use school::{Bilingual, Role};

use super::identity::IdentityGenerator;
use super::linker::{RelationshipLinker, parents_by_child};
use super::new_id;
use super::scoring::ScoringSynthesizer;
use crate::error::{GenerationError, Result, ensure_range};
use crate::tables::fill;
use crate::tables::preschool::{
    CURRENT_TERM, GROWTH_TEMPLATE, OBSERVATION_NOTES, STRENGTHS_TEMPLATE, activity_text,
    narrative_template,
};

/// Configuration for the preschool section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreschoolConfig {
    /// Children generated in each of Nursery, LKG and UKG.
    pub children_per_class: usize,
    pub activities_per_class: usize,
    /// Observations per child (inclusive range).
    pub observations_per_child: (usize, usize),
    /// Children tagged in one activity (inclusive range), capped at the class size.
    pub tagged_per_activity: (usize, usize),
    /// Activities and observations fall within this many days before now.
    pub history_days: i64,
    /// Attendance days recorded for the term (inclusive range).
    pub term_days: (u16, u16),
    /// Share of term days a child attended (inclusive range).
    pub attendance_rate: (f64, f64),
}

impl Default for PreschoolConfig {
    fn default() -> Self {
        Self {
            children_per_class: 8,
            activities_per_class: 20,
            observations_per_child: (5, 10),
            tagged_per_activity: (3, 8),
            history_days: 90,
            term_days: (60, 80),
            attendance_rate: (0.8, 1.0),
        }
    }
}

impl PreschoolConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_range("observations_per_child", self.observations_per_child)?;
        ensure_range("tagged_per_activity", self.tagged_per_activity)?;
        ensure_range("term_days", self.term_days)?;
        if self.children_per_class == 0 && self.activities_per_class > 0 {
            return Err(GenerationError::config(
                "activities need at least one child per class to tag",
            ));
        }
        if self.tagged_per_activity.0 == 0 {
            return Err(GenerationError::config(
                "an activity must tag at least one child",
            ));
        }
        if self.history_days <= 0 {
            return Err(GenerationError::config("history_days must be positive"));
        }
        let (low, high) = self.attendance_rate;
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
            return Err(GenerationError::config(format!(
                "attendance_rate ({low}, {high}) must be an ordered range within [0, 1]"
            )));
        }
        Ok(())
    }
}

/// Everything generated for the preschool section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreschoolData {
    pub children: Vec<PreschoolChild>,
    pub parents: Vec<Parent>,
    pub activities: Vec<PreschoolActivity>,
    pub observations: Vec<Observation>,
    pub reports: Vec<Hprc>,
}

impl PreschoolData {
    pub fn children_in(&self, class: PreschoolClass) -> impl Iterator<Item = &PreschoolChild> {
        self.children.iter().filter(move |c| c.class == class)
    }
}

/// Generates the preschool population and its records.
pub struct PreschoolSynthesizer {
    config: PreschoolConfig,
    identity: IdentityGenerator,
    scoring: ScoringSynthesizer,
    linker: RelationshipLinker,
}

impl PreschoolSynthesizer {
    pub fn new() -> Self {
        Self {
            config: PreschoolConfig::default(),
            identity: IdentityGenerator::new(),
            scoring: ScoringSynthesizer::new(),
            linker: RelationshipLinker::new(),
        }
    }

    pub fn with_parts(
        config: PreschoolConfig,
        identity: IdentityGenerator,
        scoring: ScoringSynthesizer,
        linker: RelationshipLinker,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            identity,
            scoring,
            linker,
        })
    }

    pub fn config(&self) -> &PreschoolConfig {
        &self.config
    }

    /// Generates children, their parents, class activities, observations and
    /// one progress report per child.
    pub fn generate(&self, now: OffsetDateTime, rng: &mut impl Rng) -> Result<PreschoolData> {
        self.config.validate()?;
        let today = now.date();

        let mut children = Vec::with_capacity(self.config.children_per_class * 3);
        for class in PreschoolClass::ALL {
            for _ in 0..self.config.children_per_class {
                children.push(self.generate_child(class, now, rng)?);
            }
        }

        let parents = self.linker.link(&children, now, rng);
        let mut links = parents_by_child(&parents);
        for child in &mut children {
            child.parent_ids = links.remove(&child.base.id).unwrap_or_default();
        }

        let observers: HashMap<PreschoolClass, Bilingual> = PreschoolClass::ALL
            .into_iter()
            .map(|class| (class, self.identity.generate(Role::Teacher, None, rng).name))
            .collect();

        let mut observations = Vec::new();
        for child in &children {
            let observer = &observers[&child.class];
            observations.extend(self.observations_for(child, observer, today, rng));
        }

        let reports = children
            .iter()
            .map(|child| self.report_for(child, today, rng))
            .collect();

        let mut activities = Vec::with_capacity(self.config.activities_per_class * 3);
        for class in PreschoolClass::ALL {
            let roster: Vec<&PreschoolChild> =
                children.iter().filter(|c| c.class == class).collect();
            for _ in 0..self.config.activities_per_class {
                activities.push(self.generate_activity(class, &roster, today, rng)?);
            }
        }
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(
            children = children.len(),
            parents = parents.len(),
            activities = activities.len(),
            observations = observations.len(),
            "Generated preschool data"
        );

        Ok(PreschoolData {
            children,
            parents,
            activities,
            observations,
            reports,
        })
    }

    fn generate_child(
        &self,
        class: PreschoolClass,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<PreschoolChild> {
        let identity = self.identity.generate(Role::PreschoolChild, None, rng);
        let gender = identity.gender;
        let today = now.date();

        // Born no later in the month than today, so exactly `age_months` have passed.
        let age_months = rng.gen_range(class.age_months());
        let day = rng.gen_range(1..=today.day().min(28));
        let date_of_birth = months_before(today, u32::from(age_months), day)?;
        let created_at = now - Duration::days(rng.gen_range(30..365));

        Ok(PreschoolChild {
            base: identity.into_base(created_at, rng),
            gender,
            date_of_birth,
            age_months,
            class,
            class_name: class.name().to_string(),
            parent_ids: Vec::new(),
            development_scores: self.scoring.development_scores(rng),
            last_assessment: today - Duration::days(rng.gen_range(0..60)),
        })
    }

    fn observations_for(
        &self,
        child: &PreschoolChild,
        observer: &Bilingual,
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<Observation> {
        let (min, max) = self.config.observations_per_child;
        let count = rng.gen_range(min..=max);

        let mut observations: Vec<Observation> = (0..count)
            .map(|_| {
                let (en, hi) = OBSERVATION_NOTES[rng.gen_range(0..OBSERVATION_NOTES.len())];
                Observation {
                    id: new_id(rng),
                    child_id: child.base.id,
                    domain: DevelopmentDomain::ALL[rng.gen_range(0..DevelopmentDomain::ALL.len())],
                    date: today - Duration::days(rng.gen_range(0..self.config.history_days)),
                    note: Bilingual::new(en, hi),
                    rating: rng.gen_range(1..=5),
                    observer: observer.clone(),
                }
            })
            .collect();

        observations.sort_by(|a, b| b.date.cmp(&a.date));
        observations
    }

    fn report_for(&self, child: &PreschoolChild, today: Date, rng: &mut impl Rng) -> Hprc {
        let current = child.development_scores;
        let previous = self.scoring.previous_scores(&current, rng);

        let domain_narratives = current
            .domains()
            .into_iter()
            .map(|(domain, score)| domain_narrative(domain, score))
            .collect();

        let mut ranked = current.domains();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let first = domain_words(ranked[0].0);
        let second = domain_words(ranked[1].0);
        let weakest = domain_words(ranked[4].0);

        let (strengths_en, strengths_hi) = fill(STRENGTHS_TEMPLATE, "first", pair(&first));
        let strengths = Bilingual::new(
            strengths_en.replace("{second}", &second.en),
            strengths_hi.replace("{second}", &second.hi),
        );
        let (growth_en, growth_hi) = fill(GROWTH_TEMPLATE, "domain", pair(&weakest));

        let (min, max) = self.config.term_days;
        let total_days = rng.gen_range(min..=max);
        let (low, high) = self.config.attendance_rate;
        let rate = rng.gen_range(low..=high);
        let present_days = (f64::from(total_days) * rate).round() as u16;

        Hprc {
            id: new_id(rng),
            child_id: child.base.id,
            term: Bilingual::from(CURRENT_TERM),
            development_scores: current,
            previous_scores: previous,
            domain_narratives,
            strengths,
            growth_areas: Bilingual::new(growth_en, growth_hi),
            attendance: Attendance::new(present_days, total_days),
            generated_on: today,
        }
    }

    fn generate_activity(
        &self,
        class: PreschoolClass,
        roster: &[&PreschoolChild],
        today: Date,
        rng: &mut impl Rng,
    ) -> Result<PreschoolActivity> {
        let activity_type =
            PreschoolActivityType::ALL[rng.gen_range(0..PreschoolActivityType::ALL.len())];
        let ((title_en, title_hi), (desc_en, desc_hi)) = activity_text(activity_type);
        let date = today - Duration::days(rng.gen_range(0..self.config.history_days));
        let created_at = date
            .with_hms(rng.gen_range(9..13), rng.gen_range(0..60), 0)?
            .assume_utc();

        let (min, max) = self.config.tagged_per_activity;
        let count = rng.gen_range(min..=max).min(roster.len());
        let tagged_children = roster
            .choose_multiple(rng, count)
            .map(|child| child.base.id)
            .collect::<Vec<Uuid>>()
            .into_iter()
            .map(|child_id| TaggedChild {
                child_id,
                mood: ChildMood::ALL[rng.gen_range(0..ChildMood::ALL.len())],
                engagement: EngagementLevel::ALL[rng.gen_range(0..EngagementLevel::ALL.len())],
            })
            .collect();

        Ok(PreschoolActivity {
            id: new_id(rng),
            class,
            date,
            activity_type,
            title: Bilingual::new(title_en, title_hi),
            description: Bilingual::new(desc_en, desc_hi),
            domains: activity_type.domains().to_vec(),
            tagged_children,
            created_at,
        })
    }
}

impl Default for PreschoolSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The narrative for one domain, chosen by the band its score falls in.
pub fn domain_narrative(domain: DevelopmentDomain, score: u8) -> DomainNarrative {
    let band = NarrativeBand::for_score(score);
    let words = domain_words(domain);
    let (en, hi) = fill(narrative_template(band), "domain", pair(&words));

    DomainNarrative {
        domain,
        score,
        band,
        narrative: Bilingual::new(en, hi),
    }
}

/// Domain label as it reads mid-sentence.
fn domain_words(domain: DevelopmentDomain) -> Bilingual {
    let label = domain.label();
    Bilingual::new(label.en.to_lowercase(), label.hi)
}

fn pair(text: &Bilingual) -> (&str, &str) {
    (&text.en, &text.hi)
}

/// The date `months` calendar months before `date`, on `day` of that month.
pub fn months_before(date: Date, months: u32, day: u8) -> Result<Date> {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months as i32;
    let month = Month::try_from((index.rem_euclid(12) + 1) as u8)?;
    Ok(Date::from_calendar_date(index.div_euclid(12), month, day)?)
}
