//! Engine orchestration: units × repositories × enabled rules.

use crate::messages::{MessageCatalog, keys};
use crate::ports::{Progress, SourceParser, TreePrinter};
use crate::runner::{self, RunOutcome};
use astfix_rules::{AllEnabled, EnablementState, RepositoryId, RuleSource, SourceError, Unit};
use std::collections::BTreeSet;
use tracing::warn;

static ALL_ENABLED: AllEnabled = AllEnabled;

/// Error surfaced by [`RefactorEngine::execute`].
///
/// Only data-source failures cross the engine boundary; rule-level
/// failures are absorbed and show up in the [`ExecuteSummary`] and the
/// log.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// What happened during one `execute` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteSummary {
    /// Rule invocations that ran to a terminal `Clean` or `Persisted`
    /// state.
    pub rules_run: u64,
    /// Invocations that persisted a rewrite.
    pub rewrites: u64,
    /// Invocations absorbed as failures.
    pub failures: u64,
    /// True when cancellation stopped the loop before it finished.
    pub cancelled: bool,
}

/// Executes rules against a collection of units, one engine per
/// validation pass.
///
/// Iteration order is fixed: units in list order, repositories in the
/// order the source returns them, then each repository's enabled rules
/// (unordered within one repository). Repositories are re-fetched per
/// unit; the source must answer stably within one run.
pub struct RefactorEngine<'a> {
    units: Vec<&'a dyn Unit>,
    valid_repositories: BTreeSet<RepositoryId>,
    source: &'a dyn RuleSource,
    enablement: &'a dyn EnablementState,
    parser: &'a dyn SourceParser,
    printer: &'a dyn TreePrinter,
    messages: MessageCatalog,
}

impl<'a> RefactorEngine<'a> {
    /// Engine over `units`, restricted to `valid_repositories` (empty =
    /// all). Every rule is treated as enabled; use
    /// [`with_enablement`](Self::with_enablement) to wire a preference
    /// store.
    pub fn new(
        units: Vec<&'a dyn Unit>,
        valid_repositories: BTreeSet<RepositoryId>,
        source: &'a dyn RuleSource,
        parser: &'a dyn SourceParser,
        printer: &'a dyn TreePrinter,
    ) -> Self {
        Self {
            units,
            valid_repositories,
            source,
            enablement: &ALL_ENABLED,
            parser,
            printer,
            messages: MessageCatalog::builtin(),
        }
    }

    pub fn with_enablement(mut self, enablement: &'a dyn EnablementState) -> Self {
        self.enablement = enablement;
        self
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Runs every enabled rule against every unit.
    ///
    /// Cancellation is polled before each rule; detecting it stops the
    /// loop cleanly, never mid-rewrite. Rule failures are logged and
    /// counted, not propagated.
    pub fn execute(&self, progress: &dyn Progress) -> Result<ExecuteSummary, EngineError> {
        let mut summary = ExecuteSummary::default();

        for unit in &self.units {
            let repositories = self.source.repositories(&self.valid_repositories)?;
            for repository in repositories {
                for descriptor in repository.enabled_rules(*unit, self.enablement) {
                    if progress.is_cancelled() {
                        summary.cancelled = true;
                        return Ok(summary);
                    }

                    progress.report_subtask(&self.messages.format(
                        keys::VALIDATING_UNIT,
                        &[unit.name(), descriptor.description()],
                    ));

                    match runner::run_rule(descriptor, *unit, self.parser, self.printer) {
                        Ok(RunOutcome::Clean) => summary.rules_run += 1,
                        Ok(RunOutcome::Persisted) => {
                            summary.rules_run += 1;
                            summary.rewrites += 1;
                        }
                        Err(err) => {
                            summary.failures += 1;
                            warn!(
                                rule = descriptor.id(),
                                unit = unit.name(),
                                "rule execution failed: {err:#}"
                            );
                        }
                    }
                }
            }
        }

        Ok(summary)
    }
}
