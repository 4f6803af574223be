//! Brace hierarchy engine
//!
//! Used by schemas that declare `use_brace_hierarchy` (Junos, VyOS,
//! PAN-OS). Depth comes from a running brace counter; schema starters only
//! refine the depth label of well-known top stanzas. Unbalanced input is
//! tolerated: extra closers bottom out at the root and unclosed openers
//! are drained at end of input.

use super::{SourceLine, close_top, drain_stack, enforce_nesting_cap, make_node};
use crate::node::{ConfigNode, NodeKind};
use crate::parser::ParseOptions;
use crate::schema::VendorSchema;

pub(crate) fn parse_lines(
    lines: &[SourceLine<'_>],
    schema: &VendorSchema,
    options: &ParseOptions,
) -> Vec<ConfigNode> {
    let mut roots: Vec<ConfigNode> = Vec::new();
    let mut stack: Vec<ConfigNode> = Vec::new();
    let mut brace_depth: usize = 0;

    for line in lines {
        let closes = line.sane.matches('}').count();
        for _ in 0..closes {
            if !stack.is_empty() {
                close_top(&mut stack, &mut roots);
            }
            brace_depth = brace_depth.saturating_sub(1);
        }

        let opens = line.sane.matches('{').count();
        let content = content_portion(&line.sane);
        if content.is_empty() {
            // The braces on a bare delimiter line have already done their
            // work above; openers still deepen the running counter.
            brace_depth += opens;
            continue;
        }

        let starter = schema.match_starter(content);
        let node = if starter.is_some() || opens > 0 {
            let block_depth = starter.map_or(brace_depth, |m| m.depth);
            make_node(
                NodeKind::Section { block_depth },
                content.to_string(),
                line.raw,
                line.indent,
                line.number,
                options.source,
            )
        } else {
            make_node(
                NodeKind::Command,
                content.to_string(),
                line.raw,
                line.indent,
                line.number,
                options.source,
            )
        };

        if opens > 0 {
            enforce_nesting_cap(&mut stack, &mut roots);
            stack.push(node);
            brace_depth += opens;
        } else {
            match stack.last_mut() {
                Some(top) => top.children.push(node),
                None => roots.push(node),
            }
        }
    }

    drain_stack(&mut stack, &mut roots);
    roots
}

/// Everything before the first `{`, stripped of braces, `;`, and space
fn content_portion(sane: &str) -> &str {
    let before = sane.split('{').next().unwrap_or("");
    before
        .trim_matches(|c: char| c == '}' || c.is_whitespace())
        .trim_end_matches(';')
        .trim_end()
}
