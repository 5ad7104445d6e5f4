//! Port traits for the capabilities the rule layer consumes.
//!
//! All three are injected rather than ambient so the selection logic can be
//! tested against in-memory implementations; see [`crate::adapters`].

use crate::descriptor::{RepositoryId, RuleDescriptor};
use crate::repository::RuleRepository;
use astfix_types::FormatOptions;
use std::collections::BTreeSet;

/// One source artifact subject to rule execution.
///
/// Units are owned by the host; the engine only reads and rewrites their
/// content. `set_buffer_contents` stages a rewrite in memory and
/// `persist_buffer` commits the staged text to the backing store.
pub trait Unit {
    fn name(&self) -> &str;

    fn source_text(&self) -> anyhow::Result<String>;

    fn set_buffer_contents(&self, text: String) -> anyhow::Result<()>;

    fn persist_buffer(&self) -> anyhow::Result<()>;

    /// Formatting/style configuration, consumed only during rewrite
    /// serialization.
    fn format_options(&self) -> FormatOptions;
}

/// Persistent enablement preferences, queried only for non-mandatory
/// descriptors.
pub trait EnablementState {
    fn is_enabled(&self, descriptor: &RuleDescriptor) -> bool;
}

/// Failure while enumerating repositories from a rule source.
///
/// Unlike rule-level failures, these are fatal to the whole engine run and
/// propagate to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("rule source unavailable: {message}")]
    Unavailable { message: String },
    #[error("rule discovery failed: {message}")]
    Discovery { message: String },
}

/// Supplies the rule repositories known to the host.
pub trait RuleSource {
    /// Returns the repositories whose id is in `ids`, or all known
    /// repositories when `ids` is empty. Unmatched ids are silently
    /// ignored. The order is source-defined and must be stable across
    /// calls within one run.
    fn repositories(
        &self,
        ids: &BTreeSet<RepositoryId>,
    ) -> Result<Vec<&RuleRepository>, SourceError>;
}
