//! Embeddable rule execution engine.
//!
//! Dispatches validation/refactoring rules against a collection of source
//! units: repositories of rule descriptors decide which rules apply, the
//! engine runs them in a defined order, and the run/rewrite protocol turns
//! an in-memory tree mutation into an atomic textual update.
//!
//! # Port traits
//!
//! All external capabilities are abstracted behind ports:
//! - [`Unit`] — read and rewrite one source artifact (from `astfix-rules`)
//! - [`RuleSource`] / [`EnablementState`] — rule discovery and preferences
//!   (from `astfix-rules`)
//! - [`SourceParser`](ports::SourceParser) / [`TreePrinter`](ports::TreePrinter)
//!   — the concrete parser/printer pair
//! - [`Progress`](ports::Progress) — subtask reporting and cancellation
//!
//! The [`adapters`] module provides in-memory and filesystem-backed
//! implementations for embedding and testing.
//!
//! # Failure semantics
//!
//! A failure while enumerating repositories aborts
//! [`RefactorEngine::execute`](engine::RefactorEngine::execute) and
//! propagates as [`EngineError`](engine::EngineError). A failure inside a
//! single rule's execution is caught, logged with rule and unit context,
//! and absorbed; the loop continues with the next rule.

pub mod adapters;
pub mod engine;
pub mod messages;
pub mod ports;
pub mod runner;

pub use engine::{EngineError, ExecuteSummary, RefactorEngine};
pub use runner::{RunOutcome, run_rule};

// Re-export the rule layer's ports so embedders don't need astfix-rules
// directly.
pub use astfix_rules::{EnablementState, RuleSource, SourceError, Unit};
