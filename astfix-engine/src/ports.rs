//! Port traits for the engine's external collaborators.

use astfix_types::{FormatOptions, ParseOptions, SyntaxTree};

/// Parses one unit's source text into a mutable tree.
///
/// With `options.statement_recovery` set, malformed fragments must not
/// abort the whole parse; the parser recovers and represents them as best
/// it can.
pub trait SourceParser {
    fn parse(&self, source: &str, options: &ParseOptions) -> anyhow::Result<SyntaxTree>;
}

/// Serializes a (possibly mutated) tree back into source text, honoring
/// the unit's formatting configuration.
pub trait TreePrinter {
    fn print(&self, tree: &SyntaxTree, options: &FormatOptions) -> anyhow::Result<String>;
}

/// Progress reporting and advisory cancellation.
///
/// Cancellation is polled, not pushed; the engine checks it at minimum
/// before starting each rule.
pub trait Progress {
    fn report_subtask(&self, message: &str);

    fn is_cancelled(&self) -> bool;
}
