//! Parent generation and parent/child linking.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use school::models::{Parent, ParentRelation, PreschoolChild, Student};
use school::{Bilingual, Role};

use super::identity::{IdentityGenerator, family_name_of};
use super::scoring::ScoringSynthesizer;
use crate::error::{Result, ensure_probability};

/// Anything a parent can be linked to.
pub trait Linkable {
    fn id(&self) -> Uuid;

    /// Position on the grade ladder, used to bound sibling age gaps.
    fn rank(&self) -> i32;

    fn full_name(&self) -> &Bilingual;
}

impl Linkable for Student {
    fn id(&self) -> Uuid {
        self.base.id
    }

    fn rank(&self) -> i32 {
        i32::from(self.grade)
    }

    fn full_name(&self) -> &Bilingual {
        &self.base.name
    }
}

impl Linkable for PreschoolChild {
    fn id(&self) -> Uuid {
        self.base.id
    }

    fn rank(&self) -> i32 {
        self.class.rank()
    }

    fn full_name(&self) -> &Bilingual {
        &self.base.name
    }
}

/// Configuration for parent linking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Probability that a second parent is generated for a household.
    pub second_parent_probability: f64,
    /// Probability that a household claims an additional sibling.
    pub sibling_probability: f64,
    /// Largest rank distance between siblings.
    pub sibling_grade_window: u8,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            second_parent_probability: 0.8,
            sibling_probability: 0.3,
            sibling_grade_window: 3,
        }
    }
}

impl LinkerConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_probability("second_parent_probability", self.second_parent_probability)?;
        ensure_probability("sibling_probability", self.sibling_probability)
    }
}

/// Builds parents for a set of children.
///
/// Every child ends up in exactly one household: a primary parent, and
/// optionally a spouse who lists the same first child.
#[derive(Debug, Clone)]
pub struct RelationshipLinker {
    config: LinkerConfig,
    identity: IdentityGenerator,
    scoring: ScoringSynthesizer,
}

impl RelationshipLinker {
    pub fn new() -> Self {
        Self {
            config: LinkerConfig::default(),
            identity: IdentityGenerator::new(),
            scoring: ScoringSynthesizer::new(),
        }
    }

    pub fn with_parts(
        config: LinkerConfig,
        identity: IdentityGenerator,
        scoring: ScoringSynthesizer,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            identity,
            scoring,
        })
    }

    /// Links every child to a freshly generated household.
    pub fn link<C: Linkable>(
        &self,
        children: &[C],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<Parent> {
        let mut processed = HashSet::with_capacity(children.len());
        self.link_with(children, &mut processed, now, rng)
    }

    /// Links the children not yet in `processed`, marking each as it is claimed.
    ///
    /// A child already in `processed` is never linked again, so passing the same
    /// set across calls keeps households disjoint.
    pub fn link_with<C: Linkable>(
        &self,
        children: &[C],
        processed: &mut HashSet<Uuid>,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<Parent> {
        let mut parents = Vec::new();
        let mut sibling_links = 0usize;

        for child in children {
            if !processed.insert(child.id()) {
                continue;
            }

            let family = family_name_of(child.full_name());
            let relation = if rng.gen_bool(0.5) {
                ParentRelation::Father
            } else {
                ParentRelation::Mother
            };
            let mut primary = self.generate_parent(relation, &family, child.id(), now, rng);

            let spouse = if rng.gen_bool(self.config.second_parent_probability) {
                let mut spouse =
                    self.generate_parent(relation.complement(), &family, child.id(), now, rng);
                spouse.spouse_id = Some(primary.base.id);
                primary.spouse_id = Some(spouse.base.id);
                Some(spouse)
            } else {
                None
            };

            if rng.gen_bool(self.config.sibling_probability)
                && let Some(sibling) = self.find_sibling(child, children, processed, rng)
            {
                processed.insert(sibling);
                primary.children_ids.push(sibling);
                sibling_links += 1;
            }

            parents.push(primary);
            parents.extend(spouse);
        }

        debug!(
            children = children.len(),
            parents = parents.len(),
            sibling_links,
            "Linked households"
        );

        parents
    }

    /// A random unclaimed child within the sibling window, if any.
    fn find_sibling<C: Linkable>(
        &self,
        child: &C,
        children: &[C],
        processed: &HashSet<Uuid>,
        rng: &mut impl Rng,
    ) -> Option<Uuid> {
        let window = i32::from(self.config.sibling_grade_window);
        let candidates: Vec<Uuid> = children
            .iter()
            .filter(|c| !processed.contains(&c.id()))
            .filter(|c| (c.rank() - child.rank()).abs() <= window)
            .map(Linkable::id)
            .collect();

        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.gen_range(0..candidates.len())])
        }
    }

    fn generate_parent(
        &self,
        relation: ParentRelation,
        family: &Bilingual,
        child_id: Uuid,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Parent {
        let identity =
            self.identity
                .generate_in_family(Role::Parent, relation.gender(), family, rng);
        let occupations = self.identity.tables().occupations;
        let (en, hi) = occupations[rng.gen_range(0..occupations.len())];
        let engagement = self.scoring.parent_engagement(rng);
        let created_at = now - Duration::days(rng.gen_range(30..365));
        let last_active = now - Duration::minutes(rng.gen_range(0..14 * 24 * 60));

        Parent {
            base: identity.into_base(created_at, rng),
            relation,
            spouse_id: None,
            occupation: Bilingual::new(en, hi),
            children_ids: vec![child_id],
            engagement_score: engagement.score,
            engagement_tier: engagement.tier,
            xp: engagement.xp,
            badges: engagement.badges,
            last_active,
        }
    }
}

impl Default for RelationshipLinker {
    fn default() -> Self {
        Self::new()
    }
}

/// Child id to the ids of every parent listing it.
pub fn parents_by_child(parents: &[Parent]) -> HashMap<Uuid, Vec<Uuid>> {
    let mut map: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for parent in parents {
        for &child in &parent.children_ids {
            map.entry(child).or_default().push(parent.base.id);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::roster::{RosterConfig, RosterGenerator};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roster(students_per_section: usize, rng: &mut impl Rng) -> Vec<Student> {
        RosterGenerator::with_parts(
            RosterConfig {
                students_per_section,
                ..Default::default()
            },
            IdentityGenerator::new(),
            ScoringSynthesizer::new(),
        )
        .unwrap()
        .generate(OffsetDateTime::now_utc(), rng)
        .unwrap()
    }

    /// Children claimed by more than one household.
    fn duplicate_claims(parents: &[Parent]) -> usize {
        let by_id: HashMap<Uuid, &Parent> = parents.iter().map(|p| (p.base.id, p)).collect();
        parents_by_child(parents)
            .values()
            .filter(|claimants| match claimants.as_slice() {
                [_] => false,
                [a, b] => by_id[a].spouse_id != Some(*b),
                _ => true,
            })
            .count()
    }

    #[test]
    fn test_link_covers_every_student_once() {
        let mut rng = rand::thread_rng();
        let students = roster(5, &mut rng);
        let parents = RelationshipLinker::new().link(&students, OffsetDateTime::now_utc(), &mut rng);

        let claimed: HashSet<Uuid> = parents
            .iter()
            .flat_map(|p| p.children_ids.iter().copied())
            .collect();
        let ids: HashSet<Uuid> = students.iter().map(|s| s.base.id).collect();
        assert_eq!(claimed, ids);
        assert_eq!(duplicate_claims(&parents), 0);
    }

    #[test]
    fn test_fifty_students_link_to_fifty_to_hundred_parents() {
        let mut rng = StdRng::seed_from_u64(50);
        let students: Vec<Student> = roster(5, &mut rng).into_iter().take(50).collect();
        let parents = RelationshipLinker::new().link(&students, OffsetDateTime::now_utc(), &mut rng);

        assert!(
            (50..=100).contains(&parents.len()),
            "{} parents",
            parents.len()
        );
        assert_eq!(duplicate_claims(&parents), 0);

        let claimed: HashSet<Uuid> = parents
            .iter()
            .flat_map(|p| p.children_ids.iter().copied())
            .collect();
        assert_eq!(claimed.len(), 50);
    }

    #[test]
    fn test_without_siblings_every_student_gets_a_household() {
        let linker = RelationshipLinker::with_parts(
            LinkerConfig {
                sibling_probability: 0.0,
                ..Default::default()
            },
            IdentityGenerator::new(),
            ScoringSynthesizer::new(),
        )
        .unwrap();
        let mut rng = rand::thread_rng();
        let students: Vec<Student> = roster(5, &mut rng).into_iter().take(50).collect();
        let parents = linker.link(&students, OffsetDateTime::now_utc(), &mut rng);

        assert!((50..=100).contains(&parents.len()));
        assert!(parents.iter().all(|p| p.children_ids.len() == 1));
    }

    #[test]
    fn test_siblings_respect_grade_window() {
        let linker = RelationshipLinker::with_parts(
            LinkerConfig {
                sibling_probability: 1.0,
                ..Default::default()
            },
            IdentityGenerator::new(),
            ScoringSynthesizer::new(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let students = roster(3, &mut rng);
        let grade_of: HashMap<Uuid, u8> = students.iter().map(|s| (s.base.id, s.grade)).collect();
        let parents = linker.link(&students, OffsetDateTime::now_utc(), &mut rng);

        let with_siblings: Vec<_> = parents.iter().filter(|p| p.children_ids.len() == 2).collect();
        assert!(!with_siblings.is_empty());
        for parent in with_siblings {
            let a = grade_of[&parent.children_ids[0]];
            let b = grade_of[&parent.children_ids[1]];
            assert!(a.abs_diff(b) <= 3);
        }
        assert_eq!(duplicate_claims(&parents), 0);
    }

    #[test]
    fn test_spouses_point_at_each_other() {
        let mut rng = rand::thread_rng();
        let students = roster(2, &mut rng);
        let parents = RelationshipLinker::new().link(&students, OffsetDateTime::now_utc(), &mut rng);
        let by_id: HashMap<Uuid, &Parent> = parents.iter().map(|p| (p.base.id, p)).collect();

        for parent in &parents {
            if let Some(spouse_id) = parent.spouse_id {
                let spouse = by_id[&spouse_id];
                assert_eq!(spouse.spouse_id, Some(parent.base.id));
                assert_eq!(spouse.relation, parent.relation.complement());
                assert_eq!(spouse.children_ids[0], parent.children_ids[0]);
            }
            assert!(
                parent
                    .engagement_tier
                    .score_range()
                    .contains(&parent.engagement_score)
            );
        }
    }

    #[test]
    fn test_parents_share_family_name() {
        let mut rng = rand::thread_rng();
        let students = roster(1, &mut rng);
        let by_id: HashMap<Uuid, &Student> = students.iter().map(|s| (s.base.id, s)).collect();
        let parents = RelationshipLinker::new().link(&students, OffsetDateTime::now_utc(), &mut rng);

        for parent in &parents {
            let child = by_id[&parent.children_ids[0]];
            assert_eq!(
                family_name_of(&parent.base.name),
                family_name_of(&child.base.name)
            );
        }
    }

    #[test]
    fn test_processed_set_is_respected() {
        let mut rng = rand::thread_rng();
        let students = roster(1, &mut rng);
        let mut processed: HashSet<Uuid> = students.iter().take(10).map(|s| s.base.id).collect();
        let parents = RelationshipLinker::new().link_with(
            &students,
            &mut processed,
            OffsetDateTime::now_utc(),
            &mut rng,
        );

        let claimed: HashSet<Uuid> = parents
            .iter()
            .flat_map(|p| p.children_ids.iter().copied())
            .collect();
        assert_eq!(claimed.len(), students.len() - 10);
        assert!(students.iter().take(10).all(|s| !claimed.contains(&s.base.id)));
        assert_eq!(processed.len(), students.len());
    }
}
