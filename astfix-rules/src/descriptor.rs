use crate::rule::Rule;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a rule repository.
///
/// Assumed unique within one rule source; uniqueness is the source's
/// concern, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(String);

impl RepositoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepositoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Binds one rule implementation to its metadata and owning repository.
///
/// The repository back-reference is a non-owning id, `None` until the
/// descriptor is registered. A descriptor belongs to at most one repository
/// at a time; registration into a repository overwrites the back-reference.
pub struct RuleDescriptor {
    id: String,
    description: String,
    mandatory: bool,
    repository: Option<RepositoryId>,
    rule: Box<dyn Rule>,
}

impl RuleDescriptor {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        mandatory: bool,
        rule: Box<dyn Rule>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            mandatory,
            repository: None,
            rule,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Mandatory rules run unconditionally, bypassing the enablement state.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn repository(&self) -> Option<&RepositoryId> {
        self.repository.as_ref()
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub(crate) fn set_repository(&mut self, repository: RepositoryId) {
        self.repository = Some(repository);
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("mandatory", &self.mandatory)
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}
