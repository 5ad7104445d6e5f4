//! Rule data model: descriptors, repositories, and the selection ports.
//!
//! This crate owns *which* rules exist and which of them are currently
//! selected for a unit. It does not own *how* a rule executes; that's the
//! run/rewrite protocol in `astfix-engine`.

mod adapters;
mod descriptor;
mod ports;
mod repository;
mod rule;

pub use adapters::{AllEnabled, ExplicitEnablement, StaticRuleSource};
pub use descriptor::{RepositoryId, RuleDescriptor};
pub use ports::{EnablementState, RuleSource, SourceError, Unit};
pub use repository::RuleRepository;
pub use rule::{MutationSink, Rule};
