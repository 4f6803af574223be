//! Structural validation of parsed trees
//!
//! Downstream rule packs assume a handful of shape guarantees from every
//! parsed forest. This validator re-checks them on demand, which is mainly
//! useful in tests and when triaging a misbehaving vendor schema.

use crate::limits::MAX_NESTING_DEPTH;
use crate::node::{ConfigNode, NodeKind};

/// Validation report for a parsed forest
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Total number of nodes visited
    pub total_nodes: usize,
    /// Violations of hard guarantees
    pub errors: Vec<String>,
    /// Suspicious but tolerated shapes
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no hard guarantee was violated
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the structural guarantees of a parsed forest.
///
/// Checked per node: `loc` ordering, child spans contained in the parent
/// span, non-empty `params` for non-empty ids, virtual roots holding only
/// commands, and total nesting below the cap.
#[must_use]
pub fn validate_forest(forest: &[ConfigNode]) -> ValidationReport {
    let mut report = ValidationReport::new();
    for node in forest {
        validate_node(node, 1, &mut report);
    }
    report
}

fn validate_node(node: &ConfigNode, depth: usize, report: &mut ValidationReport) {
    report.total_nodes += 1;

    if depth > MAX_NESTING_DEPTH {
        report.errors.push(format!(
            "nesting depth {depth} exceeds cap at line {}: {}",
            node.loc.start_line, node.id
        ));
        return;
    }

    if node.loc.start_line > node.loc.end_line {
        report.errors.push(format!(
            "inverted span {}..{} at: {}",
            node.loc.start_line, node.loc.end_line, node.id
        ));
    }

    if !node.id.is_empty() && node.params.is_empty() {
        report
            .errors
            .push(format!("empty params for non-empty id: {}", node.id));
    }

    if node.kind == NodeKind::VirtualRoot {
        for child in &node.children {
            if !child.is_command() {
                report.errors.push(format!(
                    "virtual root at line {} contains a non-command child: {}",
                    node.loc.start_line, child.id
                ));
            }
        }
    }

    for child in &node.children {
        if child.loc.start_line < node.loc.start_line || child.loc.end_line > node.loc.end_line {
            report.warnings.push(format!(
                "child span {}..{} escapes parent {}..{} at: {}",
                child.loc.start_line,
                child.loc.end_line,
                node.loc.start_line,
                node.loc.end_line,
                child.id
            ));
        }
        validate_node(child, depth + 1, report);
    }
}
