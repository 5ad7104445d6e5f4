use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options handed to the parser port for every rule execution.
///
/// Binding resolution and statement recovery are both on by default: a
/// malformed fragment must not abort the whole parse, and rules expect
/// identifier/type bindings to be available on the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub resolve_bindings: bool,
    pub statement_recovery: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            resolve_bindings: true,
            statement_recovery: true,
        }
    }
}

/// Per-unit formatting/style configuration, consumed only during rewrite
/// serialization.
///
/// Keys are printer-defined; the engine treats the map as opaque and passes
/// it through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatOptions {
    entries: BTreeMap<String, String>,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_options_default_enables_recovery_and_bindings() {
        let opts = ParseOptions::default();
        assert!(opts.resolve_bindings);
        assert!(opts.statement_recovery);
    }

    #[test]
    fn format_options_roundtrip_as_flat_map() {
        let mut opts = FormatOptions::new();
        opts.set("indent", "4").set("newline", "lf");

        let json = serde_json::to_string(&opts).expect("serialize");
        assert_eq!(json, r#"{"indent":"4","newline":"lf"}"#);

        let back: FormatOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.get("indent"), Some("4"));
        assert_eq!(back.get("newline"), Some("lf"));
    }
}
