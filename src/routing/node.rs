//! Trie vertices for the radix router.
//!
//! # Representation
//! Nodes live in an arena owned by the [`Router`](super::router::Router) and
//! are addressed by [`NodeId`]. The parent link is a plain index, so the tree
//! never holds a strong reference cycle.
//!
//! # Segment Classes
//! ```text
//! "**" / "**:name"  → Wildcard     (consumes the rest of the path)
//! ":name" / "*"     → Placeholder  (consumes exactly one segment)
//! anything else     → Normal       (literal match)
//! ```

use std::collections::HashMap;

/// Index of a node inside the router's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
}

/// Classification of a trie vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Normal,
    Wildcard,
    Placeholder,
}

impl NodeKind {
    /// Classify a single pattern segment.
    pub fn of_segment(segment: &str) -> Self {
        if segment.starts_with("**") {
            NodeKind::Wildcard
        } else if segment.starts_with(':') || segment == "*" {
            NodeKind::Placeholder
        } else {
            NodeKind::Normal
        }
    }

    /// Whether this kind captures path text into a parameter.
    pub fn is_dynamic(self) -> bool {
        !matches!(self, NodeKind::Normal)
    }
}

/// Parameter name reported for a wildcard segment.
///
/// `**:rest` captures under `rest`; a bare `**` (or `**:`) uses `_`.
pub(crate) fn wildcard_param_name(segment: &str) -> String {
    match segment.strip_prefix("**:") {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "_".to_string(),
    }
}

/// A trie vertex.
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: HashMap<String, NodeId>,
    pub(crate) wildcard_child: Option<NodeId>,
    pub(crate) placeholder_children: Vec<NodeId>,
    pub(crate) param_name: Option<String>,
    pub(crate) max_depth: usize,
    pub(crate) data: Option<T>,
}

impl<T> Node<T> {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: HashMap::new(),
            wildcard_child: None,
            placeholder_children: Vec::new(),
            param_name: None,
            max_depth: 0,
            data: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Key under which a match through this node is reported.
    pub fn param_name(&self) -> Option<&str> {
        self.param_name.as_deref()
    }

    /// Longest registered chain, in segments, starting at this node.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Number of literal children, dynamic ones included.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_wildcard_child(&self) -> bool {
        self.wildcard_child.is_some()
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholder_children.len()
    }
}
