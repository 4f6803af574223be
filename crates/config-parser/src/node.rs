//! Configuration tree node
//!
//! Every vendor dialect parses into the same hierarchical shape. A node is
//! either a section (opens a scope), a command (leaf statement), or a
//! synthetic virtual root grouping orphan top-level commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node kind with the per-case data it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Opens a scope; depth is assigned by the schema at parse time
    Section {
        /// Zero-rooted nesting depth from the matching block starter
        block_depth: usize,
    },
    /// Leaf statement within a section
    Command,
    /// Synthetic grouping of orphan top-level commands
    VirtualRoot,
}

/// Whether a tree came from a full configuration or a sub-range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Full configuration document
    Base,
    /// Extracted sub-range of a document
    Snippet,
}

/// Inclusive zero-based line span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    /// First line of the node
    pub start_line: usize,
    /// Last line attributed to the node
    pub end_line: usize,
}

impl Loc {
    /// Single-line span
    #[must_use]
    pub const fn at(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
        }
    }

    /// True when this span shares at least one line with `[start, end]`
    #[must_use]
    pub const fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start_line <= end && start <= self.end_line
    }
}

/// A hierarchical configuration tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigNode {
    /// Canonical form: sanitized line content, trimmed, trailing `;` removed
    pub id: String,
    /// Node kind and per-kind data
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Original line, byte for byte
    pub raw_text: String,
    /// Quote-aware tokenization of `id`
    pub params: Vec<String>,
    /// Nested nodes in source order
    pub children: Vec<ConfigNode>,
    /// Provenance of the parse
    pub source: Source,
    /// Inclusive zero-based line span
    pub loc: Loc,
    /// Count of leading whitespace characters in the original line
    pub indent: usize,
}

impl ConfigNode {
    /// True for section nodes (including the virtual root)
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self.kind, NodeKind::Section { .. } | NodeKind::VirtualRoot)
    }

    /// True for leaf command nodes
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(self.kind, NodeKind::Command)
    }

    /// Schema-assigned depth, present only on sections
    #[must_use]
    pub const fn block_depth(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Section { block_depth } => Some(block_depth),
            NodeKind::Command | NodeKind::VirtualRoot => None,
        }
    }

    /// First whitespace-delimited token of the canonical id
    #[must_use]
    pub fn first_token(&self) -> &str {
        self.id.split_whitespace().next().unwrap_or("")
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section { .. } => write!(f, "section"),
            Self::Command => write!(f, "command"),
            Self::VirtualRoot => write!(f, "virtual_root"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Snippet => write!(f, "snippet"),
        }
    }
}

/// Tree traversal utilities over a parsed forest
pub struct TreeTraversal;

impl TreeTraversal {
    /// Depth-first pre-order visit over every node in the forest
    pub fn depth_first<F>(forest: &[ConfigNode], mut visitor: F)
    where
        F: FnMut(&ConfigNode),
    {
        for node in forest {
            Self::depth_first_node(node, &mut visitor);
        }
    }

    fn depth_first_node<F>(node: &ConfigNode, visitor: &mut F)
    where
        F: FnMut(&ConfigNode),
    {
        visitor(node);
        for child in &node.children {
            Self::depth_first_node(child, visitor);
        }
    }

    /// Collect nodes matching a predicate, in encounter order
    #[must_use]
    pub fn find_nodes<'a, F>(forest: &'a [ConfigNode], predicate: F) -> Vec<&'a ConfigNode>
    where
        F: Fn(&ConfigNode) -> bool,
    {
        let mut matches = Vec::new();
        for node in forest {
            Self::find_nodes_recursive(node, &predicate, &mut matches);
        }
        matches
    }

    fn find_nodes_recursive<'a, F>(
        node: &'a ConfigNode,
        predicate: &F,
        matches: &mut Vec<&'a ConfigNode>,
    ) where
        F: Fn(&ConfigNode) -> bool,
    {
        if predicate(node) {
            matches.push(node);
        }
        for child in &node.children {
            Self::find_nodes_recursive(child, predicate, matches);
        }
    }

    /// Collect nodes whose canonical id starts with `prefix`
    #[must_use]
    pub fn find_by_prefix<'a>(forest: &'a [ConfigNode], prefix: &str) -> Vec<&'a ConfigNode> {
        Self::find_nodes(forest, |node| node.id.starts_with(prefix))
    }

    /// Maximum nesting depth of the forest (empty forest is 0)
    #[must_use]
    pub fn max_depth(forest: &[ConfigNode]) -> usize {
        forest
            .iter()
            .map(|n| 1 + Self::max_depth(&n.children))
            .max()
            .unwrap_or(0)
    }
}
