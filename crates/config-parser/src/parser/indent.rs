//! Indentation/keyword hierarchy engine
//!
//! Used by every schema that does not declare a brace hierarchy. Sections
//! open on schema block-starter matches, close on block-ender matches or
//! when a shallower node arrives, and commands nest by indentation.

use super::{
    SourceLine, close_top, drain_stack, enforce_nesting_cap, make_node,
};
use crate::limits::MAX_NESTING_DEPTH;
use crate::node::{ConfigNode, NodeKind};
use crate::parser::ParseOptions;
use crate::schema::{StarterMatch, VendorSchema};

/// Where a classified line goes before the push
enum Placement {
    /// Leaf statement; nests by indentation
    Command,
    /// Section placed by the generic popping rule
    Section { depth: usize },
    /// Section anchored under a specific stack entry (flat-config search);
    /// everything above `keep` entries is closed first
    AnchoredSection { depth: usize, keep: usize },
}

pub(crate) fn parse_lines(
    lines: &[SourceLine<'_>],
    schema: &VendorSchema,
    options: &ParseOptions,
) -> Vec<ConfigNode> {
    let mut roots: Vec<ConfigNode> = Vec::new();
    let mut stack: Vec<ConfigNode> = Vec::new();

    for line in lines {
        let id = line.sane.trim_end_matches(';').trim_end();

        if schema.is_block_ender(id) {
            // An ender closes the innermost open section; its own line does
            // not become a node. Trailing commands close with the section.
            while stack.last().is_some_and(|n| !n.is_section()) {
                close_top(&mut stack, &mut roots);
            }
            if !stack.is_empty() {
                close_top(&mut stack, &mut roots);
            }
            continue;
        }

        match classify(id, line.indent, schema.match_starter(id).as_ref(), &stack) {
            Placement::Command => {
                while let Some(top) = stack.last() {
                    if top.is_command() && top.indent >= line.indent {
                        close_top(&mut stack, &mut roots);
                    } else {
                        break;
                    }
                }
                enforce_nesting_cap(&mut stack, &mut roots);
                stack.push(make_node(
                    NodeKind::Command,
                    id.to_string(),
                    line.raw,
                    line.indent,
                    line.number,
                    options.source,
                ));
            }
            Placement::Section { depth } => {
                let marker = take_auto_marker(&mut stack, id);
                while let Some(top) = stack.last() {
                    let pop = match top.block_depth() {
                        Some(top_depth) => top.is_section() && top_depth >= depth,
                        None => true,
                    };
                    if pop {
                        close_top(&mut stack, &mut roots);
                    } else {
                        break;
                    }
                }
                enforce_nesting_cap(&mut stack, &mut roots);
                let mut node = make_node(
                    NodeKind::Section { block_depth: depth },
                    id.to_string(),
                    line.raw,
                    line.indent,
                    line.number,
                    options.source,
                );
                if let Some(marker) = marker {
                    node.loc.start_line = node.loc.start_line.min(marker.loc.start_line);
                    node.children.push(marker);
                }
                stack.push(node);
            }
            Placement::AnchoredSection { depth, keep } => {
                while stack.len() > keep {
                    close_top(&mut stack, &mut roots);
                }
                enforce_nesting_cap(&mut stack, &mut roots);
                stack.push(make_node(
                    NodeKind::Section { block_depth: depth },
                    id.to_string(),
                    line.raw,
                    line.indent,
                    line.number,
                    options.source,
                ));
            }
        }
    }

    drain_stack(&mut stack, &mut roots);
    roots
}

/// Innermost section currently open, if any
fn innermost_section(stack: &[ConfigNode]) -> Option<&ConfigNode> {
    stack.iter().rev().find(|n| n.is_section())
}

/// Claim a directly preceding `auto <name>` marker for an `iface <name>`
/// section.
///
/// An `auto` line declares an attribute of the stanza that follows it, so
/// a childless `auto eth0` still open on the stack folds into the arriving
/// `iface eth0` as its first command child; the stanza's span then covers
/// the marker line. A marker naming a different interface stays a sibling.
fn take_auto_marker(stack: &mut Vec<ConfigNode>, id: &str) -> Option<ConfigNode> {
    let mut parts = id.split_whitespace();
    if !parts.next()?.eq_ignore_ascii_case("iface") {
        return None;
    }
    let name = parts.next()?;

    let top = stack.last()?;
    let claimable = top.is_section()
        && top.children.is_empty()
        && top.first_token().eq_ignore_ascii_case("auto")
        && top.params.get(1).is_some_and(|p| p == name);
    if !claimable {
        return None;
    }

    let mut marker = stack.pop()?;
    marker.kind = NodeKind::Command;
    Some(marker)
}

/// Apply the context rules to decide kind and depth for one line
fn classify(
    id: &str,
    indent: usize,
    starter: Option<&StarterMatch>,
    stack: &[ConfigNode],
) -> Placement {
    let Some(m) = starter else {
        return Placement::Command;
    };
    let parent = innermost_section(stack);

    // Indented depth-0 matches inside an interface stanza stay commands:
    // `vrf mgmt` under `iface eth0` must not open a new top-level section.
    if m.depth == 0 && indent > 0 {
        if let Some(p) = parent {
            let head = p.first_token();
            if head.eq_ignore_ascii_case("iface") || head.eq_ignore_ascii_case("auto") {
                return Placement::Command;
            }
        }
    }

    if !m.is_multi_depth() {
        let mut depth = m.depth;
        // Child-depth promotion: an indented starter at or above its
        // parent's declared depth nests one level below the parent. This is
        // what lets FortiOS `config`/`edit` tables stack recursively.
        if let Some(p) = parent {
            let parent_depth = p.block_depth().unwrap_or(0);
            if indent > p.indent && depth <= parent_depth {
                depth = parent_depth + 1;
            }
        }
        return Placement::Section { depth };
    }

    if indent == 0 {
        return flat_ancestor_search(id, m, stack);
    }

    // Indented multi-depth token: pick the registered depth that makes it a
    // child of the innermost section.
    let parent_depth = parent.and_then(ConfigNode::block_depth);
    Placement::Section {
        depth: select_child_depth(&m.depths, parent_depth),
    }
}

/// Flat-config ancestor search for multi-depth tokens at indent zero.
///
/// Scans open sections innermost-first, skipping siblings (same first
/// token), and anchors under the first ancestor that admits a valid child
/// depth. The scan is bounded by [`MAX_NESTING_DEPTH`] iterations.
fn flat_ancestor_search(id: &str, m: &StarterMatch, stack: &[ConfigNode]) -> Placement {
    let first = id.split_whitespace().next().unwrap_or("");
    let mut iterations = 0;

    for (index, node) in stack.iter().enumerate().rev() {
        if !node.is_section() {
            continue;
        }
        iterations += 1;
        if iterations > MAX_NESTING_DEPTH {
            break;
        }
        if node.first_token() == first {
            // A sibling scope: two `address-family` blocks at the same
            // level must not nest inside each other.
            continue;
        }
        let ancestor_depth = node.block_depth().unwrap_or(0);
        if let Some(depth) = m.depths.iter().copied().find(|&d| d > ancestor_depth) {
            let depth = if m.depths.contains(&(ancestor_depth + 1)) {
                ancestor_depth + 1
            } else {
                depth
            };
            return Placement::AnchoredSection {
                depth,
                keep: index + 1,
            };
        }
    }

    // No viable ancestor: open at the shallowest registered depth.
    Placement::AnchoredSection {
        depth: m.depths[0],
        keep: 0,
    }
}

/// Depth selection for indented multi-depth tokens
fn select_child_depth(depths: &[usize], parent_depth: Option<usize>) -> usize {
    match parent_depth {
        Some(p) => {
            if depths.contains(&(p + 1)) {
                p + 1
            } else {
                depths.iter().copied().find(|&d| d > p).unwrap_or(p + 1)
            }
        }
        None => {
            if depths.contains(&0) {
                0
            } else {
                depths[0]
            }
        }
    }
}
