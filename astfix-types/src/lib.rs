//! Shared data model for the astfix workspace.
//!
//! # Design constraints
//! - This crate owns the mutable tree representation and the option types
//!   that cross the parser/printer boundary. It performs no I/O.
//! - Parsing text into a tree and printing a tree back are external
//!   concerns; see the port traits in `astfix-engine`.

pub mod options;
pub mod tree;

pub use options::{FormatOptions, ParseOptions};
pub use tree::{NodeKind, SyntaxNode, SyntaxTree};
