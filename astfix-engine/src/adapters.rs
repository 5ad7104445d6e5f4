//! Default port implementations for embedding and testing.
//!
//! `MemUnit` and `PlainTextParser`/`PlainTextPrinter` keep everything in
//! memory; `FsUnit` persists to a file. Hosts with a real language
//! frontend plug their own parser/printer pair instead.

use crate::ports::{Progress, SourceParser, TreePrinter};
use anyhow::{Context, anyhow, bail};
use astfix_rules::Unit;
use astfix_types::{FormatOptions, ParseOptions, SyntaxNode, SyntaxTree};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// In-memory unit with a staged buffer and a separate persisted text.
///
/// `source_text` reads the persisted text, so a later rule observes an
/// earlier rule's persisted mutation, same as a store-backed unit.
#[derive(Debug)]
pub struct MemUnit {
    name: String,
    format: FormatOptions,
    buffer: Mutex<String>,
    persisted: Mutex<String>,
    persist_count: AtomicU64,
}

impl MemUnit {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            name: name.into(),
            format: FormatOptions::new(),
            buffer: Mutex::new(source.clone()),
            persisted: Mutex::new(source),
            persist_count: AtomicU64::new(0),
        }
    }

    pub fn with_format_options(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    /// Currently persisted text.
    pub fn persisted_text(&self) -> String {
        self.persisted.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Number of persist calls this unit has seen.
    pub fn persist_count(&self) -> u64 {
        self.persist_count.load(Ordering::SeqCst)
    }
}

impl Unit for MemUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_text(&self) -> anyhow::Result<String> {
        let persisted = self
            .persisted
            .lock()
            .map_err(|_| anyhow!("unit {} poisoned", self.name))?;
        Ok(persisted.clone())
    }

    fn set_buffer_contents(&self, text: String) -> anyhow::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| anyhow!("unit {} poisoned", self.name))?;
        *buffer = text;
        Ok(())
    }

    fn persist_buffer(&self) -> anyhow::Result<()> {
        let buffer = self
            .buffer
            .lock()
            .map_err(|_| anyhow!("unit {} poisoned", self.name))?;
        let mut persisted = self
            .persisted
            .lock()
            .map_err(|_| anyhow!("unit {} poisoned", self.name))?;
        *persisted = buffer.clone();
        self.persist_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn format_options(&self) -> FormatOptions {
        self.format.clone()
    }
}

/// File-backed unit. The staged buffer lives in memory; persisting writes
/// it to the backing file.
#[derive(Debug)]
pub struct FsUnit {
    path: Utf8PathBuf,
    name: String,
    format: FormatOptions,
    buffer: Mutex<Option<String>>,
}

impl FsUnit {
    pub fn new(path: Utf8PathBuf) -> Self {
        let name = path
            .file_name()
            .unwrap_or_else(|| path.as_str())
            .to_string();
        Self {
            path,
            name,
            format: FormatOptions::new(),
            buffer: Mutex::new(None),
        }
    }

    pub fn with_format_options(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Unit for FsUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_text(&self) -> anyhow::Result<String> {
        fs::read_to_string(&self.path).with_context(|| format!("read {}", self.path))
    }

    fn set_buffer_contents(&self, text: String) -> anyhow::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| anyhow!("unit {} poisoned", self.name))?;
        *buffer = Some(text);
        Ok(())
    }

    fn persist_buffer(&self) -> anyhow::Result<()> {
        let buffer = self
            .buffer
            .lock()
            .map_err(|_| anyhow!("unit {} poisoned", self.name))?;
        // Nothing staged: persisting is a no-op.
        let Some(text) = buffer.as_ref() else {
            return Ok(());
        };
        fs::write(&self.path, text).with_context(|| format!("write {}", self.path))
    }

    fn format_options(&self) -> FormatOptions {
        self.format.clone()
    }
}

/// Progress implementation that discards subtasks and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn report_subtask(&self, message: &str) {
        debug!(subtask = message, "progress");
    }

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Node kinds produced by [`PlainTextParser`].
pub mod plain_text {
    pub const UNIT: &str = "unit";
    pub const LINE: &str = "line";
    pub const ERROR: &str = "error";

    pub const ATTR_TRAILING_NEWLINE: &str = "trailing_newline";
    pub const ATTR_BINDINGS: &str = "bindings";

    /// Formatting option: trim trailing whitespace from every line on
    /// serialization.
    pub const OPT_TRIM_TRAILING_WS: &str = "trim-trailing-whitespace";
}

/// Reference parser: one `line` leaf per input line under a `unit` root.
///
/// A final line ending in `\` announces a continuation that never arrives
/// and is treated as malformed: with statement recovery it becomes an
/// `error` node preserving the raw text, without recovery the parse
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl SourceParser for PlainTextParser {
    fn parse(&self, source: &str, options: &ParseOptions) -> anyhow::Result<SyntaxTree> {
        let mut root = SyntaxNode::new(plain_text::UNIT);
        if source.ends_with('\n') {
            root.set_attr(plain_text::ATTR_TRAILING_NEWLINE, "true");
        }
        if options.resolve_bindings {
            root.set_attr(plain_text::ATTR_BINDINGS, "resolved");
        }

        let lines: Vec<&str> = source.lines().collect();
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let dangling_continuation = i == last && line.ends_with('\\');
            if dangling_continuation {
                if !options.statement_recovery {
                    bail!("dangling continuation at line {}", i + 1);
                }
                root.push_child(SyntaxNode::leaf(plain_text::ERROR, *line));
            } else {
                root.push_child(SyntaxNode::leaf(plain_text::LINE, *line));
            }
        }

        Ok(SyntaxTree::new(root))
    }
}

/// Printer matching [`PlainTextParser`]: joins line texts with newlines,
/// restoring the trailing newline the parser recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextPrinter;

impl TreePrinter for PlainTextPrinter {
    fn print(&self, tree: &SyntaxTree, options: &FormatOptions) -> anyhow::Result<String> {
        let trim = options.get(plain_text::OPT_TRIM_TRAILING_WS) == Some("true");

        let mut lines = Vec::new();
        for node in &tree.root().children {
            let Some(text) = node.text.as_deref() else {
                continue;
            };
            lines.push(if trim { text.trim_end() } else { text }.to_string());
        }

        let mut out = lines.join("\n");
        if tree.root().attr(plain_text::ATTR_TRAILING_NEWLINE) == Some("true") {
            out.push('\n');
        }
        Ok(out)
    }
}
