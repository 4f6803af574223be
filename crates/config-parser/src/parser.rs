//! Schema-aware hierarchical parser
//!
//! One engine, two dialect modes: indentation/keyword hierarchies
//! (Cisco-style and friends) and brace hierarchies (Junos-style). Both are
//! iterative with an explicit stack so [`MAX_NESTING_DEPTH`] is enforced
//! without relying on host call-stack limits, and both produce the same
//! [`ConfigNode`] forest.

mod brace;
mod indent;

use crate::detect::detect_vendor;
use crate::error::{ParserError, Result};
use crate::limits::{MAX_CONFIG_SIZE, MAX_LINE_COUNT, MAX_LINE_LENGTH, MAX_NESTING_DEPTH};
use crate::node::{ConfigNode, Loc, NodeKind, Source};
use crate::sanitize::{sanitize_line, tokenize_params};
use crate::schema::VendorSchema;
use tracing::{debug, info};

/// Options controlling a single parse
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Schema to parse with; auto-detected when absent
    pub vendor: Option<&'static VendorSchema>,
    /// Offset added to every emitted line number
    pub start_line: usize,
    /// Provenance recorded on every node
    pub source: Source,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            vendor: None,
            start_line: 0,
            source: Source::Base,
        }
    }
}

/// Parse a raw configuration into a top-level node forest.
///
/// When no vendor is given the dialect is auto-detected.
///
/// # Errors
///
/// Returns [`ParserError::SizeLimit`] when the input exceeds
/// [`MAX_CONFIG_SIZE`] or [`MAX_LINE_COUNT`]. Malformed input never fails;
/// the parser produces a best-effort tree.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Vec<ConfigNode>> {
    let schema = options.vendor.unwrap_or_else(|| detect_vendor(text));
    parse_with_schema(text, schema, options)
}

/// Parse with an explicit schema, bypassing detection.
///
/// # Errors
///
/// Returns [`ParserError::SizeLimit`] on size-cap breaches.
pub fn parse_with_schema(
    text: &str,
    schema: &VendorSchema,
    options: &ParseOptions,
) -> Result<Vec<ConfigNode>> {
    if text.len() > MAX_CONFIG_SIZE {
        return Err(ParserError::SizeLimit(format!(
            "configuration is {} bytes, maximum is {MAX_CONFIG_SIZE} bytes",
            text.len()
        )));
    }
    let line_count = text.lines().count();
    if line_count > MAX_LINE_COUNT {
        return Err(ParserError::SizeLimit(format!(
            "configuration has {line_count} lines, maximum is {MAX_LINE_COUNT} lines"
        )));
    }

    info!(
        vendor = schema.id,
        lines = line_count,
        brace = schema.use_brace_hierarchy,
        "parsing configuration"
    );

    let lines = prepare_lines(text, schema, options);
    let roots = if schema.use_brace_hierarchy {
        brace::parse_lines(&lines, schema, options)
    } else {
        indent::parse_lines(&lines, schema, options)
    };

    let mut roots = group_virtual_roots(roots, options.source);
    finalize_spans(&mut roots);

    info!(top_level = roots.len(), "parse complete");
    Ok(roots)
}

/// A non-comment source line with its derived facts
pub(crate) struct SourceLine<'a> {
    /// Sanitized content, trimmed
    pub sane: String,
    /// Original line, byte for byte
    pub raw: &'a str,
    /// Leading whitespace character count of the original line
    pub indent: usize,
    /// Absolute zero-based line number (start offset applied)
    pub number: usize,
}

/// Sanitize, filter, and annotate the input lines once
fn prepare_lines<'a>(
    text: &'a str,
    schema: &VendorSchema,
    options: &ParseOptions,
) -> Vec<SourceLine<'a>> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if raw.chars().count() > MAX_LINE_LENGTH {
            debug!(line = options.start_line + index, "skipping oversized line");
            continue;
        }
        let sane = sanitize_line(raw);
        if sane.is_empty() || schema.is_comment(&sane) {
            continue;
        }
        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
        lines.push(SourceLine {
            sane,
            raw,
            indent,
            number: options.start_line + index,
        });
    }
    lines
}

/// Build a node from its canonical id and line facts
pub(crate) fn make_node(
    kind: NodeKind,
    id: String,
    raw: &str,
    indent: usize,
    number: usize,
    source: Source,
) -> ConfigNode {
    let params = tokenize_params(&id);
    ConfigNode {
        id,
        kind,
        raw_text: raw.to_string(),
        params,
        children: Vec::new(),
        source,
        loc: Loc::at(number),
        indent,
    }
}

/// Pop the top of the stack and attach it to its parent (or the roots)
pub(crate) fn close_top(stack: &mut Vec<ConfigNode>, roots: &mut Vec<ConfigNode>) {
    if let Some(done) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

/// Close everything left open at end of input
pub(crate) fn drain_stack(stack: &mut Vec<ConfigNode>, roots: &mut Vec<ConfigNode>) {
    while !stack.is_empty() {
        close_top(stack, roots);
    }
}

/// Keep the stack below the nesting cap before a push
pub(crate) fn enforce_nesting_cap(stack: &mut Vec<ConfigNode>, roots: &mut Vec<ConfigNode>) {
    while stack.len() >= MAX_NESTING_DEPTH {
        close_top(stack, roots);
    }
}

/// Collapse every maximal run of top-level commands into a virtual root.
///
/// The synthetic section is named after its first contained command's
/// line, so repeated parses of the same document name it identically.
fn group_virtual_roots(roots: Vec<ConfigNode>, source: Source) -> Vec<ConfigNode> {
    let mut grouped = Vec::with_capacity(roots.len());
    let mut run: Vec<ConfigNode> = Vec::new();

    for node in roots {
        if node.is_command() {
            run.push(node);
        } else {
            flush_run(&mut run, &mut grouped, source);
            grouped.push(node);
        }
    }
    flush_run(&mut run, &mut grouped, source);
    grouped
}

fn flush_run(run: &mut Vec<ConfigNode>, grouped: &mut Vec<ConfigNode>, source: Source) {
    if run.is_empty() {
        return;
    }
    let children = std::mem::take(run);
    let start_line = children[0].loc.start_line;
    let end_line = children
        .iter()
        .map(|c| c.loc.end_line)
        .max()
        .unwrap_or(start_line);
    let id = format!("virtual_root_line_{start_line}");
    let params = tokenize_params(&id);
    grouped.push(ConfigNode {
        id,
        kind: NodeKind::VirtualRoot,
        raw_text: String::new(),
        params,
        children,
        source,
        loc: Loc {
            start_line,
            end_line,
        },
        indent: 0,
    });
}

/// Extend every parent's span over its children
fn finalize_spans(nodes: &mut [ConfigNode]) {
    for node in nodes {
        finalize_spans(&mut node.children);
        if let Some(last) = node.children.iter().map(|c| c.loc.end_line).max() {
            node.loc.end_line = node.loc.end_line.max(last);
        }
    }
}
