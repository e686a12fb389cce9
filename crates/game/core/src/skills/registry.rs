//! Build-once skill table.

use std::collections::HashMap;

use crate::catalog::RegistryError;
use crate::common::{JobId, SkillId};

use super::SkillDefinition;

/// Aggregate cost of a set of skills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkillCostSummary {
    pub skills: usize,
    pub total_ranks: u64,
    /// Points needed to max every skill in the set.
    pub total_points: u64,
}

/// Read-only skill table.
///
/// Prerequisites are validated at construction: no self references, no
/// unknown ids, no minimum rank above the prerequisite's own max, and no
/// cycles of any length. Runtime checks can therefore walk the flat
/// prerequisite list without cycle detection.
#[derive(Debug)]
pub struct SkillRegistry {
    skills: HashMap<SkillId, SkillDefinition>,
    order: Vec<SkillId>,
    by_job: HashMap<JobId, Vec<SkillId>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

impl SkillRegistry {
    pub fn new(definitions: Vec<SkillDefinition>) -> Result<Self, RegistryError> {
        let mut skills = HashMap::with_capacity(definitions.len());
        let mut order = Vec::with_capacity(definitions.len());
        let mut by_job: HashMap<JobId, Vec<SkillId>> = HashMap::new();

        for definition in definitions {
            if skills.contains_key(&definition.id) {
                return Err(RegistryError::DuplicateSkill(definition.id));
            }
            if definition.max_rank == 0 {
                return Err(RegistryError::InvalidMaxRank(definition.id));
            }
            order.push(definition.id.clone());
            by_job
                .entry(definition.required_job.clone())
                .or_default()
                .push(definition.id.clone());
            skills.insert(definition.id.clone(), definition);
        }

        for id in &order {
            let skill = &skills[id];
            for prerequisite in &skill.prerequisites {
                if prerequisite.skill == skill.id {
                    return Err(RegistryError::SelfPrerequisite(id.clone()));
                }
                let Some(required) = skills.get(&prerequisite.skill) else {
                    return Err(RegistryError::UnknownPrerequisite {
                        skill: id.clone(),
                        prerequisite: prerequisite.skill.clone(),
                    });
                };
                if prerequisite.min_rank == 0 || prerequisite.min_rank > required.max_rank {
                    return Err(RegistryError::PrerequisiteRank {
                        skill: id.clone(),
                        prerequisite: prerequisite.skill.clone(),
                        min_rank: prerequisite.min_rank,
                        max_rank: required.max_rank,
                    });
                }
            }
        }

        let registry = Self {
            skills,
            order,
            by_job,
        };
        registry.check_acyclic()?;
        Ok(registry)
    }

    /// Depth-first walk over prerequisite edges; a grey node reached again is a cycle.
    fn check_acyclic(&self) -> Result<(), RegistryError> {
        let mut state: HashMap<&str, Visit> = HashMap::with_capacity(self.order.len());
        for root in &self.order {
            if state.contains_key(root.as_str()) {
                continue;
            }
            let mut stack: Vec<(&SkillId, usize)> = vec![(root, 0)];
            state.insert(root.as_str(), Visit::InProgress);
            while let Some((id, next)) = stack.pop() {
                let prerequisites = &self.skills[id].prerequisites;
                let Some(prerequisite) = prerequisites.get(next) else {
                    state.insert(id.as_str(), Visit::Done);
                    continue;
                };
                stack.push((id, next + 1));
                match state.get(prerequisite.skill.as_str()) {
                    Some(Visit::InProgress) => {
                        return Err(RegistryError::PrerequisiteCycle(prerequisite.skill.clone()));
                    }
                    Some(Visit::Done) => {}
                    None => {
                        state.insert(prerequisite.skill.as_str(), Visit::InProgress);
                        stack.push((&prerequisite.skill, 0));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    /// Definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> + '_ {
        self.order.iter().map(|id| &self.skills[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Skills whose `required_job` is exactly `job`, in declaration order.
    pub fn for_job<'a>(&'a self, job: &str) -> impl Iterator<Item = &'a SkillDefinition> + 'a {
        self.by_job
            .get(job)
            .into_iter()
            .flatten()
            .map(|id| &self.skills[id])
    }

    /// Skills required by any job along `lineage` (root first).
    pub fn for_lineage<'a>(
        &'a self,
        lineage: &'a [JobId],
    ) -> impl Iterator<Item = &'a SkillDefinition> + 'a {
        lineage.iter().flat_map(|job| self.for_job(job.as_str()))
    }

    /// Cost of maxing every listed skill; unknown ids are skipped.
    pub fn cost_summary<'a, I>(&self, ids: I) -> SkillCostSummary
    where
        I: IntoIterator<Item = &'a SkillId>,
    {
        ids.into_iter()
            .filter_map(|id| self.get(id.as_str()))
            .fold(SkillCostSummary::default(), |mut summary, skill| {
                summary.skills += 1;
                summary.total_ranks += skill.max_rank as u64;
                summary.total_points += skill.cost_to_max();
                summary
            })
    }

    pub fn total_cost_to_max<'a, I>(&self, ids: I) -> u64
    where
        I: IntoIterator<Item = &'a SkillId>,
    {
        self.cost_summary(ids).total_points
    }
}
