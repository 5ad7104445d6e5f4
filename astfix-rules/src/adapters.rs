//! In-memory implementations of the selection ports, for embedding and
//! testing.

use crate::descriptor::{RepositoryId, RuleDescriptor};
use crate::ports::{EnablementState, RuleSource, SourceError};
use crate::repository::RuleRepository;
use std::collections::BTreeSet;

/// Enablement state that reports every rule as enabled.
///
/// The engine's default when the host supplies no preference store.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllEnabled;

impl EnablementState for AllEnabled {
    fn is_enabled(&self, _descriptor: &RuleDescriptor) -> bool {
        true
    }
}

/// Enablement state backed by an explicit id set. Rules are disabled
/// unless enabled by id.
#[derive(Debug, Clone, Default)]
pub struct ExplicitEnablement {
    enabled: BTreeSet<String>,
}

impl ExplicitEnablement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, rule_id: impl Into<String>) -> &mut Self {
        self.enabled.insert(rule_id.into());
        self
    }

    pub fn disable(&mut self, rule_id: &str) -> &mut Self {
        self.enabled.remove(rule_id);
        self
    }
}

impl EnablementState for ExplicitEnablement {
    fn is_enabled(&self, descriptor: &RuleDescriptor) -> bool {
        self.enabled.contains(descriptor.id())
    }
}

/// Rule source over a fixed, ordered list of repositories.
///
/// Repository order is the construction order and is identical across
/// calls, which satisfies the stability the engine requires within one
/// run.
#[derive(Debug, Default)]
pub struct StaticRuleSource {
    repositories: Vec<RuleRepository>,
}

impl StaticRuleSource {
    pub fn new(repositories: Vec<RuleRepository>) -> Self {
        Self { repositories }
    }

    pub fn push(&mut self, repository: RuleRepository) {
        self.repositories.push(repository);
    }
}

impl RuleSource for StaticRuleSource {
    fn repositories(
        &self,
        ids: &BTreeSet<RepositoryId>,
    ) -> Result<Vec<&RuleRepository>, SourceError> {
        if ids.is_empty() {
            return Ok(self.repositories.iter().collect());
        }
        Ok(self
            .repositories
            .iter()
            .filter(|r| ids.contains(r.id()))
            .collect())
    }
}
