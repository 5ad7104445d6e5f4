use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parser-defined node category.
///
/// The engine never interprets kinds; they only have to be stable between
/// the parser that produced the tree and the rules that traverse it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKind(String);

impl NodeKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// One node of the mutable syntax representation.
///
/// Leaves carry source text; interior nodes carry children. Attributes hold
/// parser-supplied metadata such as resolved bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            text: None,
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn leaf(kind: impl Into<NodeKind>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: Some(text.into()),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn count(&self) -> u64 {
        1 + self.children.iter().map(SyntaxNode::count).sum::<u64>()
    }
}

/// Mutable tree over one unit's source, produced by the parser port and
/// consumed by rule traversals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SyntaxNode {
        &mut self.root
    }

    pub fn node_count(&self) -> u64 {
        self.root.count()
    }

    /// Pre-order traversal over shared references.
    pub fn walk(&self, visit: &mut dyn FnMut(&SyntaxNode)) {
        fn inner(node: &SyntaxNode, visit: &mut dyn FnMut(&SyntaxNode)) {
            visit(node);
            for child in &node.children {
                inner(child, visit);
            }
        }
        inner(&self.root, visit);
    }

    /// Pre-order traversal over mutable references. Children added during
    /// the visit of their parent are themselves visited.
    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut SyntaxNode)) {
        fn inner(node: &mut SyntaxNode, visit: &mut dyn FnMut(&mut SyntaxNode)) {
            visit(node);
            for child in &mut node.children {
                inner(child, visit);
            }
        }
        inner(&mut self.root, visit);
    }
}
