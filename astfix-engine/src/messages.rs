//! Human-readable messages for progress reporting.
//!
//! A missing key degrades to a visible `!!key!!` placeholder instead of
//! failing; message lookup is never fatal.

use std::collections::BTreeMap;

/// Message keys used by the engine.
pub mod keys {
    /// Subtask message for one (unit, rule) execution. Arguments: unit
    /// name, rule description.
    pub const VALIDATING_UNIT: &str = "validating-unit";
}

/// Catalog of message templates with positional `{0}`, `{1}`, ...
/// placeholders.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: BTreeMap<String, String>,
}

impl MessageCatalog {
    /// Catalog with the engine's built-in messages.
    pub fn builtin() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            keys::VALIDATING_UNIT.to_string(),
            "Validating {0} — {1}".to_string(),
        );
        Self { templates }
    }

    /// Empty catalog; every lookup degrades to a placeholder.
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Formats the message for `key`, substituting positional arguments.
    /// Unknown keys produce `!!key!!`.
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        let Some(template) = self.templates.get(key) else {
            return format!("!!{key}!!");
        };
        let mut out = template.clone();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), arg);
        }
        out
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
