use crate::descriptor::{RepositoryId, RuleDescriptor};
use crate::ports::{EnablementState, Unit};

/// Named collection of rule descriptors.
///
/// Descriptors are deduplicated by id and unordered; callers must not rely
/// on iteration order across descriptors of one repository.
#[derive(Debug)]
pub struct RuleRepository {
    id: RepositoryId,
    rules: Vec<RuleDescriptor>,
}

impl RuleRepository {
    pub fn new(id: impl Into<RepositoryId>) -> Self {
        Self {
            id: id.into(),
            rules: Vec::new(),
        }
    }

    pub fn id(&self) -> &RepositoryId {
        &self.id
    }

    /// Unfiltered snapshot of every registered descriptor; no enablement
    /// check.
    pub fn rules(&self) -> Vec<&RuleDescriptor> {
        self.rules.iter().collect()
    }

    /// Descriptors selected for execution against `unit`: every mandatory
    /// descriptor, plus every non-mandatory descriptor the enablement
    /// state reports as enabled.
    ///
    /// Selection does not currently vary per unit; the parameter is kept
    /// so a per-unit policy can be introduced without changing callers.
    pub fn enabled_rules(
        &self,
        unit: &dyn Unit,
        enablement: &dyn EnablementState,
    ) -> Vec<&RuleDescriptor> {
        let _ = unit;
        self.rules
            .iter()
            .filter(|d| d.is_mandatory() || enablement.is_enabled(d))
            .collect()
    }

    /// Replaces the repository's descriptor set. Existing descriptors are
    /// dropped; every descriptor in the new set gets its back-reference
    /// pointed at this repository.
    pub fn register_rules(&mut self, descriptors: Vec<RuleDescriptor>) {
        self.rules.clear();
        for descriptor in descriptors {
            self.register_rule(descriptor);
        }
    }

    /// Adds one descriptor and points its back-reference at this
    /// repository. A descriptor with an id already present replaces the
    /// existing entry.
    pub fn register_rule(&mut self, mut descriptor: RuleDescriptor) {
        descriptor.set_repository(self.id.clone());
        match self.rules.iter_mut().find(|d| d.id() == descriptor.id()) {
            Some(existing) => *existing = descriptor,
            None => self.rules.push(descriptor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AllEnabled, ExplicitEnablement};
    use crate::rule::{MutationSink, Rule};
    use astfix_types::{FormatOptions, SyntaxTree};
    use pretty_assertions::assert_eq;

    struct NoopRule;

    impl Rule for NoopRule {
        fn traverse(&self, tree: &mut SyntaxTree, _sink: &mut MutationSink) -> anyhow::Result<u64> {
            Ok(tree.node_count())
        }
    }

    struct StubUnit;

    impl Unit for StubUnit {
        fn name(&self) -> &str {
            "Foo.src"
        }

        fn source_text(&self) -> anyhow::Result<String> {
            Ok(String::new())
        }

        fn set_buffer_contents(&self, _text: String) -> anyhow::Result<()> {
            Ok(())
        }

        fn persist_buffer(&self) -> anyhow::Result<()> {
            Ok(())
        }

        fn format_options(&self) -> FormatOptions {
            FormatOptions::new()
        }
    }

    fn descriptor(id: &str, mandatory: bool) -> RuleDescriptor {
        RuleDescriptor::new(id, id.to_uppercase(), mandatory, Box::new(NoopRule))
    }

    fn ids(descriptors: &[&RuleDescriptor]) -> Vec<String> {
        let mut out: Vec<String> = descriptors.iter().map(|d| d.id().to_string()).collect();
        out.sort();
        out
    }

    #[test]
    fn register_rules_sets_back_references() {
        let mut repo = RuleRepository::new("R1");
        repo.register_rules(vec![descriptor("a", false), descriptor("b", true)]);

        for d in repo.rules() {
            assert_eq!(d.repository(), Some(&RepositoryId::new("R1")));
        }
    }

    #[test]
    fn register_rules_is_destructive() {
        let mut repo = RuleRepository::new("R1");
        repo.register_rules(vec![descriptor("a", false), descriptor("b", false)]);
        repo.register_rules(vec![descriptor("c", false)]);

        assert_eq!(ids(&repo.rules()), vec!["c"]);
    }

    #[test]
    fn register_rule_is_additive() {
        let mut repo = RuleRepository::new("R1");
        repo.register_rules(vec![descriptor("a", false)]);
        repo.register_rule(descriptor("b", false));

        assert_eq!(ids(&repo.rules()), vec!["a", "b"]);
    }

    #[test]
    fn register_rule_replaces_same_id() {
        let mut repo = RuleRepository::new("R1");
        repo.register_rule(descriptor("a", false));
        repo.register_rule(descriptor("a", true));

        let rules = repo.rules();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].is_mandatory());
    }

    #[test]
    fn mandatory_rules_bypass_enablement() {
        let mut repo = RuleRepository::new("R1");
        repo.register_rules(vec![descriptor("a", true), descriptor("b", false)]);

        // Nothing explicitly enabled: only the mandatory rule is selected.
        let none_enabled = ExplicitEnablement::new();
        assert_eq!(ids(&repo.enabled_rules(&StubUnit, &none_enabled)), vec!["a"]);
    }

    #[test]
    fn non_mandatory_rules_follow_enablement_state() {
        let mut repo = RuleRepository::new("R1");
        repo.register_rules(vec![descriptor("a", false), descriptor("b", false)]);

        let mut enablement = ExplicitEnablement::new();
        enablement.enable("b");
        assert_eq!(ids(&repo.enabled_rules(&StubUnit, &enablement)), vec!["b"]);

        assert_eq!(
            ids(&repo.enabled_rules(&StubUnit, &AllEnabled)),
            vec!["a", "b"]
        );
    }
}
