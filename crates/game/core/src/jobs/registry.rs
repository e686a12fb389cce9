//! Build-once job table with memoized lineage queries.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::catalog::RegistryError;
use crate::common::{JobId, SkillId};

use super::{JobDefinition, JobTier};

#[derive(Debug)]
struct JobEntry {
    definition: JobDefinition,
    /// Root-first ancestry ending with this job.
    lineage: OnceLock<Vec<JobId>>,
    /// Skills of every job in `lineage`, root first, without duplicates.
    unlockable_skills: OnceLock<Vec<SkillId>>,
}

/// Read-only job table.
///
/// Shared by every character of a session; lookups never mutate a
/// definition, and each memoized record is computed at most once.
#[derive(Debug)]
pub struct JobRegistry {
    entries: HashMap<JobId, JobEntry>,
    order: Vec<JobId>,
    root: JobId,
}

impl JobRegistry {
    /// Validates and indexes job definitions.
    ///
    /// # Errors
    ///
    /// - duplicate ids
    /// - a Novice job with a predecessor, or a higher-tier job without one
    /// - a predecessor that is unknown or not exactly one tier below
    /// - no Novice job to act as root
    pub fn new(definitions: Vec<JobDefinition>) -> Result<Self, RegistryError> {
        let mut entries = HashMap::with_capacity(definitions.len());
        let mut order = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if entries.contains_key(&definition.id) {
                return Err(RegistryError::DuplicateJob(definition.id));
            }
            order.push(definition.id.clone());
            entries.insert(
                definition.id.clone(),
                JobEntry {
                    definition,
                    lineage: OnceLock::new(),
                    unlockable_skills: OnceLock::new(),
                },
            );
        }

        for id in &order {
            let job = &entries[id].definition;
            match (job.tier.previous(), &job.requirement.predecessor) {
                (None, Some(_)) => return Err(RegistryError::RootWithPredecessor(id.clone())),
                (Some(_), None) => return Err(RegistryError::MissingPredecessor(id.clone())),
                (Some(expected), Some(predecessor)) => {
                    let Some(parent) = entries.get(predecessor) else {
                        return Err(RegistryError::UnknownPredecessor {
                            job: id.clone(),
                            predecessor: predecessor.clone(),
                        });
                    };
                    if parent.definition.tier != expected {
                        return Err(RegistryError::PredecessorTier {
                            job: id.clone(),
                            predecessor: predecessor.clone(),
                        });
                    }
                }
                (None, None) => {}
            }
        }

        let root = order
            .iter()
            .find(|id| entries[*id].definition.tier == JobTier::Novice)
            .cloned()
            .ok_or(RegistryError::NoRootJob)?;

        Ok(Self {
            entries,
            order,
            root,
        })
    }

    pub fn get(&self, id: &str) -> Option<&JobDefinition> {
        self.entries.get(id).map(|entry| &entry.definition)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// First Novice-tier job; fallback for characters with an unknown job.
    pub fn root(&self) -> &JobDefinition {
        &self.entries[&self.root].definition
    }

    /// Definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &JobDefinition> + '_ {
        self.order.iter().map(|id| &self.entries[id].definition)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Root-first ancestry of `id`, ending with `id` itself.
    ///
    /// Predecessors always sit exactly one tier lower, so the walk is bounded
    /// by the number of tiers.
    pub fn lineage(&self, id: &str) -> Option<&[JobId]> {
        let entry = self.entries.get(id)?;
        let lineage = entry.lineage.get_or_init(|| {
            let mut chain = vec![entry.definition.id.clone()];
            let mut cursor = &entry.definition;
            while let Some(parent_id) = &cursor.requirement.predecessor {
                let Some(parent) = self.entries.get(parent_id) else {
                    break;
                };
                chain.push(parent_id.clone());
                cursor = &parent.definition;
            }
            chain.reverse();
            chain
        });
        Some(lineage.as_slice())
    }

    /// True when `ancestor` appears strictly before `descendant` in its lineage.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        self.lineage(descendant).is_some_and(|chain| {
            chain
                .iter()
                .rev()
                .skip(1)
                .any(|id| id.as_str() == ancestor)
        })
    }

    /// Whether a character holding `current` may learn skills of `skill_job`.
    pub fn grants_access(&self, current: &str, skill_job: &str) -> bool {
        current == skill_job || self.is_ancestor(skill_job, current)
    }

    /// All skills unlockable along the lineage of `id`, root first.
    pub fn unlockable_skills(&self, id: &str) -> Option<&[SkillId]> {
        let entry = self.entries.get(id)?;
        let lineage = self.lineage(id)?;
        let skills = entry.unlockable_skills.get_or_init(|| {
            let mut skills: Vec<SkillId> = Vec::new();
            for job in lineage {
                for skill in &self.entries[job].definition.skills {
                    if !skills.contains(skill) {
                        skills.push(skill.clone());
                    }
                }
            }
            skills
        });
        Some(skills.as_slice())
    }

    /// Jobs whose predecessor is `id`.
    pub fn successors<'a, 'id>(
        &'a self,
        id: &'id str,
    ) -> impl Iterator<Item = &'a JobDefinition> + use<'a, 'id> {
        self.iter().filter(move |job| {
            job.requirement
                .predecessor
                .as_ref()
                .is_some_and(|predecessor| predecessor.as_str() == id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobUnlockRequirement;

    fn job(
        id: &str,
        tier: JobTier,
        predecessor: Option<&str>,
        skills: &[&str],
    ) -> JobDefinition {
        JobDefinition {
            id: JobId::from(id),
            tier,
            name: id.to_owned(),
            description: String::new(),
            stat_bonuses: Vec::new(),
            growth: Vec::new(),
            requirement: JobUnlockRequirement {
                predecessor: predecessor.map(JobId::from),
                ..JobUnlockRequirement::default()
            },
            skills: skills.iter().map(|s| SkillId::from(*s)).collect(),
        }
    }

    fn registry() -> JobRegistry {
        JobRegistry::new(vec![
            job("novice", JobTier::Novice, None, &["first_aid"]),
            job("swordsman", JobTier::Tier1, Some("novice"), &["bash", "first_aid"]),
            job("knight", JobTier::Tier2, Some("swordsman"), &["bowling_bash"]),
            job("mage", JobTier::Tier1, Some("novice"), &["fire_bolt"]),
        ])
        .expect("valid registry")
    }

    #[test]
    fn lineage_is_root_first() {
        let registry = registry();
        let lineage: Vec<_> = registry
            .lineage("knight")
            .unwrap()
            .iter()
            .map(JobId::as_str)
            .collect();
        assert_eq!(lineage, ["novice", "swordsman", "knight"]);
        assert!(registry.lineage("ghost").is_none());
    }

    #[test]
    fn lineage_is_memoized() {
        let registry = registry();
        let first = registry.lineage("knight").unwrap().as_ptr();
        let second = registry.lineage("knight").unwrap().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn ancestry_checks() {
        let registry = registry();
        assert!(registry.is_ancestor("novice", "knight"));
        assert!(registry.is_ancestor("swordsman", "knight"));
        assert!(!registry.is_ancestor("knight", "knight"));
        assert!(!registry.is_ancestor("mage", "knight"));
        assert!(registry.grants_access("knight", "knight"));
        assert!(!registry.grants_access("swordsman", "knight"));
    }

    #[test]
    fn unlockable_skills_deduplicate_along_lineage() {
        let registry = registry();
        let skills: Vec<_> = registry
            .unlockable_skills("knight")
            .unwrap()
            .iter()
            .map(SkillId::as_str)
            .collect();
        assert_eq!(skills, ["first_aid", "bash", "bowling_bash"]);
    }

    #[test]
    fn successors_and_root() {
        let registry = registry();
        let next: Vec<_> = registry.successors("novice").map(|j| j.id.as_str()).collect();
        assert_eq!(next, ["swordsman", "mage"]);
        assert_eq!(registry.root().id.as_str(), "novice");
    }

    #[test]
    fn rejects_malformed_trees() {
        let duplicate = JobRegistry::new(vec![
            job("novice", JobTier::Novice, None, &[]),
            job("novice", JobTier::Novice, None, &[]),
        ]);
        assert!(matches!(duplicate, Err(RegistryError::DuplicateJob(_))));

        let skipped = JobRegistry::new(vec![
            job("novice", JobTier::Novice, None, &[]),
            job("knight", JobTier::Tier2, Some("novice"), &[]),
        ]);
        assert!(matches!(skipped, Err(RegistryError::PredecessorTier { .. })));

        let orphan = JobRegistry::new(vec![job("swordsman", JobTier::Tier1, None, &[])]);
        assert!(matches!(orphan, Err(RegistryError::MissingPredecessor(_))));

        let rootless = JobRegistry::new(Vec::new());
        assert!(matches!(rootless, Err(RegistryError::NoRootJob)));
    }
}
