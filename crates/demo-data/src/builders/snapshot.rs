//! The generated snapshot and its integrity checks.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use school::Person;
use school::models::{
    ActivityFeedItem, DevelopmentScores, Parent, PreschoolChild, Student, Teacher, XpProgress,
};

use crate::error::{GenerationError, Result};
use crate::generators::PreschoolData;

/// Everything the dashboard reads, produced once and held in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSnapshot {
    pub students: Vec<Student>,
    pub parents: Vec<Parent>,
    pub teachers: Vec<Teacher>,
    pub activity_feed: Vec<ActivityFeedItem>,
    pub preschool: PreschoolData,
    /// Populated when metrics tracking is enabled on the builder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DemoMetrics>,
}

/// Counts and timing from snapshot generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    pub student_count: usize,
    pub parent_count: usize,
    pub teacher_count: usize,
    pub moment_count: usize,
    pub preschool_child_count: usize,
    pub preschool_parent_count: usize,
    pub preschool_activity_count: usize,
    pub observation_count: usize,
    /// Parents listing more than one child.
    pub sibling_households: usize,
}

impl DemoMetrics {
    pub fn from_snapshot(snapshot: &DemoSnapshot, generation_time_ms: u64) -> Self {
        let preschool = &snapshot.preschool;
        Self {
            generation_time_ms,
            student_count: snapshot.students.len(),
            parent_count: snapshot.parents.len(),
            teacher_count: snapshot.teachers.len(),
            moment_count: snapshot.activity_feed.len(),
            preschool_child_count: preschool.children.len(),
            preschool_parent_count: preschool.parents.len(),
            preschool_activity_count: preschool.activities.len(),
            observation_count: preschool.observations.len(),
            sibling_households: snapshot
                .parents
                .iter()
                .chain(&preschool.parents)
                .filter(|p| p.children_ids.len() > 1)
                .count(),
        }
    }
}

impl DemoSnapshot {
    /// Every person in the snapshot as the role-tagged union.
    pub fn people(&self) -> impl Iterator<Item = Person> + '_ {
        let students = self.students.iter().cloned().map(Person::Student);
        let parents = self
            .parents
            .iter()
            .chain(&self.preschool.parents)
            .cloned()
            .map(Person::Parent);
        let teachers = self.teachers.iter().cloned().map(Person::Teacher);
        let children = self
            .preschool
            .children
            .iter()
            .cloned()
            .map(Person::PreschoolChild);

        students.chain(parents).chain(teachers).chain(children)
    }

    /// Students of one class, in roll-number order.
    pub fn class_roster(&self, class_id: &str) -> Vec<&Student> {
        let mut roster: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| s.class_id == class_id)
            .collect();
        roster.sort_by_key(|s| s.roll_number);
        roster
    }

    /// Re-checks the snapshot's cross-references and derived values.
    ///
    /// Unresolved ids fail with [`GenerationError::DanglingReference`]; any
    /// other broken invariant fails with [`GenerationError::InvariantViolation`].
    pub fn verify(&self) -> Result<()> {
        let student_ids: HashSet<Uuid> = self.students.iter().map(|s| s.base.id).collect();
        let child_ids: HashSet<Uuid> = self
            .preschool
            .children
            .iter()
            .map(|c| c.base.id)
            .collect();
        let teacher_ids: HashSet<Uuid> = self.teachers.iter().map(|t| t.base.id).collect();

        verify_unique_ids(self.people().map(|p| p.id()))?;
        verify_roll_numbers(&self.students)?;
        for student in &self.students {
            verify_progress(student.base.id, &student.progress)?;
        }

        verify_households(&self.parents, &student_ids)?;
        verify_households(&self.preschool.parents, &child_ids)?;
        verify_children(&self.preschool)?;

        for item in &self.activity_feed {
            if !teacher_ids.contains(&item.author_id) {
                return Err(GenerationError::DanglingReference {
                    from: item.id,
                    to: item.author_id,
                });
            }
            let r = item.reactions;
            let sum = [r.clap(), r.smile(), r.celebrate(), r.fire()]
                .into_iter()
                .fold(r.heart(), u32::saturating_add);
            if r.total() != sum {
                return Err(violation(format!("reaction total of moment {}", item.id)));
            }
        }
        if self
            .activity_feed
            .windows(2)
            .any(|pair| pair[0].created_at < pair[1].created_at)
        {
            return Err(violation("activity feed is not newest first"));
        }

        Ok(())
    }
}

fn violation(message: impl Into<String>) -> GenerationError {
    GenerationError::InvariantViolation(message.into())
}

fn verify_unique_ids(ids: impl Iterator<Item = Uuid>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(violation(format!("id {id} is used by two people")));
        }
    }
    Ok(())
}

fn verify_roll_numbers(students: &[Student]) -> Result<()> {
    let mut seen = HashSet::new();
    for s in students {
        if !seen.insert((s.grade, s.section, s.roll_number)) {
            return Err(violation(format!(
                "roll number {} repeats in {}",
                s.roll_number, s.class_id
            )));
        }
    }
    Ok(())
}

fn verify_progress(id: Uuid, progress: &XpProgress) -> Result<()> {
    if progress.level() != XpProgress::level_for(progress.xp()) {
        return Err(violation(format!("level of student {id}")));
    }
    Ok(())
}

fn verify_scores(id: Uuid, scores: &DevelopmentScores) -> Result<()> {
    let sum: u32 = scores.domains().iter().map(|&(_, s)| u32::from(s)).sum();
    if u32::from(scores.overall()) != (f64::from(sum) / 5.0).round() as u32 {
        return Err(violation(format!("overall development score of {id}")));
    }
    Ok(())
}

/// Parents resolve to `children`, spouses point at each other, and the
/// claimed children are exactly `children` with one household each.
fn verify_households(parents: &[Parent], children: &HashSet<Uuid>) -> Result<()> {
    let by_id: HashMap<Uuid, &Parent> = parents.iter().map(|p| (p.base.id, p)).collect();
    let mut claims: HashMap<Uuid, Vec<&Parent>> = HashMap::new();

    for parent in parents {
        if parent.children_ids.is_empty() {
            return Err(violation(format!("parent {} has no children", parent.base.id)));
        }
        for child in &parent.children_ids {
            if !children.contains(child) {
                return Err(GenerationError::DanglingReference {
                    from: parent.base.id,
                    to: *child,
                });
            }
            claims.entry(*child).or_default().push(parent);
        }
        if let Some(spouse_id) = parent.spouse_id {
            let spouse = by_id.get(&spouse_id).ok_or(GenerationError::DanglingReference {
                from: parent.base.id,
                to: spouse_id,
            })?;
            if spouse.spouse_id != Some(parent.base.id) {
                return Err(violation(format!(
                    "spouse link {} -> {spouse_id} is one-sided",
                    parent.base.id
                )));
            }
        }
    }

    for (child, claimants) in &claims {
        let shared_by_spouses = match claimants.as_slice() {
            [_] => true,
            [a, b] => a.spouse_id == Some(b.base.id),
            _ => false,
        };
        if !shared_by_spouses {
            return Err(violation(format!("child {child} is claimed by two households")));
        }
    }

    if let Some(orphan) = children.iter().find(|id| !claims.contains_key(*id)) {
        return Err(violation(format!("child {orphan} has no parent")));
    }

    Ok(())
}

fn verify_children(preschool: &PreschoolData) -> Result<()> {
    let parent_ids: HashSet<Uuid> = preschool.parents.iter().map(|p| p.base.id).collect();
    let children: HashMap<Uuid, &PreschoolChild> = preschool
        .children
        .iter()
        .map(|c| (c.base.id, c))
        .collect();

    for child in &preschool.children {
        verify_scores(child.base.id, &child.development_scores)?;
        if !child.class.age_months().contains(&child.age_months) {
            return Err(violation(format!("age of child {}", child.base.id)));
        }
        if let Some(parent) = child.parent_ids.iter().find(|id| !parent_ids.contains(*id)) {
            return Err(GenerationError::DanglingReference {
                from: child.base.id,
                to: *parent,
            });
        }
    }

    for activity in &preschool.activities {
        for tagged in &activity.tagged_children {
            let child = children.get(&tagged.child_id).ok_or(
                GenerationError::DanglingReference {
                    from: activity.id,
                    to: tagged.child_id,
                },
            )?;
            if child.class != activity.class {
                return Err(violation(format!(
                    "activity {} tags a child from another class",
                    activity.id
                )));
            }
        }
    }

    for observation in &preschool.observations {
        if !children.contains_key(&observation.child_id) {
            return Err(GenerationError::DanglingReference {
                from: observation.id,
                to: observation.child_id,
            });
        }
    }

    for report in &preschool.reports {
        if !children.contains_key(&report.child_id) {
            return Err(GenerationError::DanglingReference {
                from: report.id,
                to: report.child_id,
            });
        }
        verify_scores(report.id, &report.development_scores)?;
        let regressed = report
            .development_scores
            .domains()
            .iter()
            .any(|&(domain, score)| report.previous_scores.get(domain) > score);
        if regressed || report.previous_scores.overall() > report.development_scores.overall() {
            return Err(violation(format!("report {} shows a regression", report.id)));
        }
        if report.attendance.present_days > report.attendance.total_days {
            return Err(violation(format!("attendance of report {}", report.id)));
        }
    }

    Ok(())
}
