use astfix_types::SyntaxTree;

/// Per-execution marker a rule sets to request that its tree mutations be
/// persisted.
///
/// One sink is created per (unit, rule) invocation; the flag is never
/// shared between executions.
#[derive(Debug, Default)]
pub struct MutationSink {
    dirty: bool,
}

impl MutationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the traversal mutated the tree in a way that must be
    /// written back to source.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Executable logic of one rule: a traversal over the unit's syntax tree.
///
/// A rule may mutate nodes during traversal; every mutation that should be
/// persisted must be announced through [`MutationSink::mark_dirty`]. Purely
/// diagnostic rules leave the sink untouched and report violations through
/// their own side channels. Returns the number of visited nodes.
pub trait Rule: Send + Sync {
    fn traverse(&self, tree: &mut SyntaxTree, sink: &mut MutationSink) -> anyhow::Result<u64>;
}
