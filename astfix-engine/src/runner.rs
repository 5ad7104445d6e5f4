//! Run/rewrite protocol for one (unit, rule) execution.
//!
//! State machine: `Parsed → Traversed → {Clean | Dirty → Rewritten →
//! Persisted}`. Any error short-circuits to `Errored`, which the engine
//! loop absorbs; nothing here aborts sibling rules.

use crate::ports::{SourceParser, TreePrinter};
use anyhow::Context;
use astfix_rules::{MutationSink, RuleDescriptor, Unit};
use astfix_types::ParseOptions;

/// Terminal state of one successful rule invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The traversal never marked the tree dirty; no write occurred. The
    /// common case for purely diagnostic rules.
    Clean,
    /// The traversal marked the tree dirty and the rewrite was persisted.
    Persisted,
}

/// Executes one rule against one unit.
///
/// Parses the unit's current source, runs the rule's traversal, and, only
/// if the traversal marked the tree dirty, reconciles the mutated tree
/// back into source text and persists it. The replacement text is computed
/// in full before the unit's buffer is touched, so a failure anywhere
/// leaves the unit unmodified.
pub fn run_rule(
    descriptor: &RuleDescriptor,
    unit: &dyn Unit,
    parser: &dyn SourceParser,
    printer: &dyn TreePrinter,
) -> anyhow::Result<RunOutcome> {
    let original = unit
        .source_text()
        .with_context(|| format!("read source of {}", unit.name()))?;

    let mut tree = parser
        .parse(&original, &ParseOptions::default())
        .with_context(|| format!("parse {}", unit.name()))?;

    let mut sink = MutationSink::new();
    descriptor
        .rule()
        .traverse(&mut tree, &mut sink)
        .with_context(|| format!("traverse with rule {}", descriptor.id()))?;

    if !sink.is_dirty() {
        return Ok(RunOutcome::Clean);
    }

    let serialized = printer
        .print(&tree, &unit.format_options())
        .with_context(|| format!("serialize rewritten tree of {}", unit.name()))?;
    let rewritten = rewrite(&original, &serialized)?;

    unit.set_buffer_contents(rewritten)
        .with_context(|| format!("stage rewrite of {}", unit.name()))?;
    unit.persist_buffer()
        .with_context(|| format!("persist {}", unit.name()))?;

    Ok(RunOutcome::Persisted)
}

/// Reconciles the serialized tree with the original source: the edit is
/// expressed as a textual diff and applied to an in-memory copy.
fn rewrite(original: &str, serialized: &str) -> anyhow::Result<String> {
    let patch = diffy::create_patch(original, serialized);
    diffy::apply(original, &patch).context("apply rewrite edit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemUnit, PlainTextParser, PlainTextPrinter};
    use astfix_rules::Rule;
    use astfix_types::SyntaxTree;
    use pretty_assertions::assert_eq;

    struct DiagnosticRule;

    impl Rule for DiagnosticRule {
        fn traverse(&self, tree: &mut SyntaxTree, _sink: &mut MutationSink) -> anyhow::Result<u64> {
            Ok(tree.node_count())
        }
    }

    struct UppercaseRule;

    impl Rule for UppercaseRule {
        fn traverse(&self, tree: &mut SyntaxTree, sink: &mut MutationSink) -> anyhow::Result<u64> {
            let mut visited = 0;
            tree.root_mut().children.iter_mut().for_each(|line| {
                visited += 1;
                if let Some(text) = &line.text {
                    let upper = text.to_uppercase();
                    if upper != *text {
                        line.set_text(upper);
                        sink.mark_dirty();
                    }
                }
            });
            Ok(visited)
        }
    }

    struct FailingRule;

    impl Rule for FailingRule {
        fn traverse(
            &self,
            _tree: &mut SyntaxTree,
            _sink: &mut MutationSink,
        ) -> anyhow::Result<u64> {
            anyhow::bail!("traversal exploded")
        }
    }

    fn descriptor(rule: Box<dyn Rule>) -> RuleDescriptor {
        RuleDescriptor::new("r.test", "Test", true, rule)
    }

    #[test]
    fn clean_traversal_never_persists() {
        let unit = MemUnit::new("Foo.src", "alpha\nbeta\n");
        let outcome = run_rule(
            &descriptor(Box::new(DiagnosticRule)),
            &unit,
            &PlainTextParser,
            &PlainTextPrinter,
        )
        .expect("run");

        assert_eq!(outcome, RunOutcome::Clean);
        assert_eq!(unit.persist_count(), 0);
        assert_eq!(unit.persisted_text(), "alpha\nbeta\n");
    }

    #[test]
    fn dirty_traversal_persists_exactly_once() {
        let unit = MemUnit::new("Foo.src", "alpha\nbeta\n");
        let outcome = run_rule(
            &descriptor(Box::new(UppercaseRule)),
            &unit,
            &PlainTextParser,
            &PlainTextPrinter,
        )
        .expect("run");

        assert_eq!(outcome, RunOutcome::Persisted);
        assert_eq!(unit.persist_count(), 1);
        assert_eq!(unit.persisted_text(), "ALPHA\nBETA\n");
    }

    #[test]
    fn failing_traversal_leaves_unit_untouched() {
        let unit = MemUnit::new("Foo.src", "alpha\n");
        let err = run_rule(
            &descriptor(Box::new(FailingRule)),
            &unit,
            &PlainTextParser,
            &PlainTextPrinter,
        )
        .expect_err("should fail");

        assert!(format!("{err:#}").contains("traversal exploded"));
        assert_eq!(unit.persist_count(), 0);
        assert_eq!(unit.persisted_text(), "alpha\n");
    }

    #[test]
    fn rewrite_reconciles_tree_changes_into_text() {
        let rewritten = rewrite("one\ntwo\nthree\n", "one\nTWO\nthree\n").expect("rewrite");
        assert_eq!(rewritten, "one\nTWO\nthree\n");
    }
}
