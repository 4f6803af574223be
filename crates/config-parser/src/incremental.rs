//! Incremental parse cache
//!
//! Wraps the schema-aware parser with a per-document cache keyed by URI.
//! Each entry keeps the last tree, one hash per source line, a monotonic
//! version, and the vendor schema resolved at cache time. Edits localized
//! to a few top-level sections re-parse only the affected region with
//! rebased line numbers; anything structural falls back to a full parse.
//!
//! The cache is owned by its parser instance and is not thread-safe;
//! callers wanting parallelism hold one instance per thread.

use crate::error::Result;
use crate::limits::INCREMENTAL_PARSE_THRESHOLD;
use crate::node::{ConfigNode, Source};
use crate::parser::{ParseOptions, parse_with_schema};
use crate::schema::{self, VendorSchema};
use crate::detect::detect_vendor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

/// Line-count delta beyond which an edit is treated as structural
const STRUCTURAL_LINE_DELTA: usize = 10;

/// Default vendor policy for an [`IncrementalParser`]
#[derive(Debug, Clone, Copy)]
pub enum VendorChoice {
    /// Detect per document, then stick with the cached choice
    Auto,
    /// Always use one schema
    Vendor(&'static VendorSchema),
}

/// Statistics for the most recent [`IncrementalParser::parse`] call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseStats {
    /// True when the whole document was re-parsed
    pub full_parse: bool,
    /// Number of contiguous changed line ranges detected
    pub changed_ranges: usize,
    /// Number of cached top-level sections re-parsed
    pub sections_reparsed: usize,
    /// Wall-clock parse time in milliseconds
    pub parse_time_ms: f64,
    /// Why a full parse was chosen, when one was
    pub reason: Option<String>,
    /// Id of the schema the call resolved to
    pub vendor: String,
}

struct CacheEntry {
    ast: Vec<ConfigNode>,
    line_hashes: Vec<String>,
    version: i64,
    line_count: usize,
    vendor_id: String,
}

/// Incremental parser with a per-URI document cache
pub struct IncrementalParser {
    default_vendor: VendorChoice,
    cache: HashMap<String, CacheEntry>,
    last_stats: Option<ParseStats>,
}

impl Default for IncrementalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalParser {
    /// New parser that auto-detects the vendor per document
    #[must_use]
    pub fn new() -> Self {
        Self::with_vendor(VendorChoice::Auto)
    }

    /// New parser with an explicit default vendor policy
    #[must_use]
    pub fn with_vendor(default_vendor: VendorChoice) -> Self {
        Self {
            default_vendor,
            cache: HashMap::new(),
            last_stats: None,
        }
    }

    /// Parse `content` for `uri` at `version`, reusing the cache when the
    /// edit allows it.
    ///
    /// `vendor` overrides the constructor policy for this call. Versions
    /// must be monotonically increasing per URI; a stale version returns
    /// the cached tree untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParserError::SizeLimit`] when the content exceeds
    /// the configured caps.
    pub fn parse(
        &mut self,
        uri: &str,
        content: &str,
        version: i64,
        vendor: Option<&str>,
    ) -> Result<Vec<ConfigNode>> {
        let started = Instant::now();
        let schema = self.resolve_schema(uri, content, vendor);

        enum Decision {
            Full {
                reason: Option<&'static str>,
                ranges: usize,
            },
            Stale,
            NoChange,
            Incremental {
                new_hashes: Vec<String>,
                ranges: Vec<(usize, usize)>,
            },
        }

        let decision = match self.cache.get(uri) {
            None => Decision::Full {
                reason: None,
                ranges: 0,
            },
            Some(entry) if entry.vendor_id != schema.id => Decision::Full {
                reason: Some("vendor_changed"),
                ranges: 0,
            },
            Some(entry) if version <= entry.version => Decision::Stale,
            Some(entry) => {
                let new_hashes: Vec<String> = content.lines().map(hash_line).collect();
                let ranges = changed_ranges(&entry.line_hashes, &new_hashes);
                if ranges.is_empty() {
                    Decision::NoChange
                } else {
                    let changed: usize = ranges.iter().map(|(a, b)| b - a + 1).sum();
                    let ratio = changed as f64 / new_hashes.len().max(1) as f64;
                    if ratio > INCREMENTAL_PARSE_THRESHOLD {
                        Decision::Full {
                            reason: Some("too_many_changes"),
                            ranges: ranges.len(),
                        }
                    } else if structural_change(entry, new_hashes.len(), &ranges) {
                        Decision::Full {
                            reason: Some("structural_changes"),
                            ranges: ranges.len(),
                        }
                    } else {
                        Decision::Incremental { new_hashes, ranges }
                    }
                }
            }
        };

        match decision {
            Decision::Stale => {
                let entry = self.cache.get(uri).expect("stale decision implies entry");
                debug!(uri, version, cached = entry.version, "stale version, cache untouched");
                Ok(entry.ast.clone())
            }
            Decision::NoChange => {
                let entry = self.cache.get_mut(uri).expect("no-change decision implies entry");
                entry.version = version;
                let ast = entry.ast.clone();
                self.last_stats = Some(ParseStats {
                    full_parse: false,
                    changed_ranges: 0,
                    sections_reparsed: 0,
                    parse_time_ms: elapsed_ms(started),
                    reason: None,
                    vendor: schema.id.to_string(),
                });
                Ok(ast)
            }
            Decision::Full { reason, ranges } => {
                self.full_parse(uri, content, version, schema, started, reason, ranges)
            }
            Decision::Incremental { new_hashes, ranges } => {
                self.incremental_parse(uri, content, version, schema, started, new_hashes, ranges)
            }
        }
    }

    /// Statistics for the most recent parse call
    #[must_use]
    pub fn get_last_stats(&self) -> Option<&ParseStats> {
        self.last_stats.as_ref()
    }

    /// Vendor id cached for `uri`
    #[must_use]
    pub fn get_cached_vendor(&self, uri: &str) -> Option<String> {
        self.cache.get(uri).map(|e| e.vendor_id.clone())
    }

    /// Cached version for `uri`, or −1 when absent
    #[must_use]
    pub fn get_cached_version(&self, uri: &str) -> i64 {
        self.cache.get(uri).map_or(-1, |e| e.version)
    }

    /// Drop the cache entry for `uri`; true when one existed
    pub fn invalidate(&mut self, uri: &str) -> bool {
        self.cache.remove(uri).is_some()
    }

    /// Drop every cache entry
    pub fn clear_all(&mut self) {
        self.cache.clear();
    }

    /// True when `uri` has a cache entry
    #[must_use]
    pub fn is_cached(&self, uri: &str) -> bool {
        self.cache.contains_key(uri)
    }

    /// Number of cached documents
    #[must_use]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn resolve_schema(
        &self,
        uri: &str,
        content: &str,
        vendor_override: Option<&str>,
    ) -> &'static VendorSchema {
        if let Some(id) = vendor_override {
            if let Some(found) = schema::get_vendor(id) {
                return found;
            }
            warn!(vendor = id, "unknown vendor override, using default schema");
            return schema::default_vendor();
        }
        match self.default_vendor {
            VendorChoice::Vendor(fixed) => fixed,
            VendorChoice::Auto => {
                // Stick with the vendor the document was cached under so a
                // sequence of edits parses consistently.
                if let Some(cached) = self
                    .cache
                    .get(uri)
                    .and_then(|e| schema::get_vendor(&e.vendor_id))
                {
                    return cached;
                }
                detect_vendor(content)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn full_parse(
        &mut self,
        uri: &str,
        content: &str,
        version: i64,
        schema: &'static VendorSchema,
        started: Instant,
        reason: Option<&str>,
        changed_ranges: usize,
    ) -> Result<Vec<ConfigNode>> {
        debug!(uri, vendor = schema.id, reason, "full parse");
        let ast = parse_with_schema(content, schema, &ParseOptions::default())?;
        let line_hashes: Vec<String> = content.lines().map(hash_line).collect();
        let line_count = line_hashes.len();
        self.cache.insert(
            uri.to_string(),
            CacheEntry {
                ast: ast.clone(),
                line_hashes,
                version,
                line_count,
                vendor_id: schema.id.to_string(),
            },
        );
        self.last_stats = Some(ParseStats {
            full_parse: true,
            changed_ranges,
            sections_reparsed: 0,
            parse_time_ms: elapsed_ms(started),
            reason: reason.map(String::from),
            vendor: schema.id.to_string(),
        });
        Ok(ast)
    }

    #[allow(clippy::too_many_arguments)]
    fn incremental_parse(
        &mut self,
        uri: &str,
        content: &str,
        version: i64,
        schema: &'static VendorSchema,
        started: Instant,
        new_hashes: Vec<String>,
        ranges: Vec<(usize, usize)>,
    ) -> Result<Vec<ConfigNode>> {
        let new_lines: Vec<&str> = content.lines().collect();

        let (regions, affected) = {
            let entry = self.cache.get(uri).expect("incremental decision implies entry");
            let regions = top_level_regions(&entry.ast, entry.line_count);
            let affected: Vec<bool> = regions
                .iter()
                .map(|&(start, end)| ranges.iter().any(|&(a, b)| start <= b && a <= end))
                .collect();
            (regions, affected)
        };

        if !affected.iter().any(|&a| a) {
            // Edits fell between sections; nothing to anchor a partial
            // re-parse on.
            return self.full_parse(uri, content, version, schema, started, None, ranges.len());
        }

        let (result, reparsed) = {
            let entry = self.cache.get(uri).expect("incremental decision implies entry");
            let mut result: Vec<ConfigNode> = Vec::with_capacity(entry.ast.len());
            let mut offset: i64 = 0;
            let mut reparsed = 0usize;
            let mut index = 0;

            while index < entry.ast.len() {
                if !affected[index] {
                    let mut node = entry.ast[index].clone();
                    if offset != 0 {
                        shift_node(&mut node, offset);
                    }
                    result.push(node);
                    index += 1;
                    continue;
                }

                // Coalesce consecutive affected sections into one slice so
                // content that moved across their old boundary re-parses as
                // a unit.
                let mut next = index;
                while next < entry.ast.len() && affected[next] {
                    next += 1;
                }
                let old_start = regions[index].0;
                let old_end = regions[next - 1].1;
                let slice_start = clamp_line(old_start as i64 + offset, new_lines.len());
                let slice_end = if next < entry.ast.len() {
                    clamp_line(regions[next].0 as i64 + offset, new_lines.len())
                        .max(slice_start)
                } else {
                    new_lines.len()
                };

                let slice_text = new_lines[slice_start..slice_end].join("\n");
                let options = ParseOptions {
                    vendor: None,
                    start_line: slice_start,
                    source: Source::Base,
                };
                debug!(
                    uri,
                    slice_start,
                    slice_end,
                    sections = next - index,
                    "re-parsing affected region"
                );
                result.extend(parse_with_schema(&slice_text, schema, &options)?);
                reparsed += next - index;

                let old_size = (old_end + 1 - old_start) as i64;
                let new_size = (slice_end - slice_start) as i64;
                offset += new_size - old_size;
                index = next;
            }

            (result, reparsed)
        };

        self.cache.insert(
            uri.to_string(),
            CacheEntry {
                ast: result.clone(),
                line_count: new_hashes.len(),
                line_hashes: new_hashes,
                version,
                vendor_id: schema.id.to_string(),
            },
        );
        self.last_stats = Some(ParseStats {
            full_parse: false,
            changed_ranges: ranges.len(),
            sections_reparsed: reparsed,
            parse_time_ms: elapsed_ms(started),
            reason: None,
            vendor: schema.id.to_string(),
        });
        Ok(result)
    }
}

/// Effective line region `[start, end]` of each cached top-level node.
///
/// A node's region runs to the line before the next top-level node, so
/// block enders and trailing comments are attributed to the section they
/// close. The last region extends to the end of the cached document.
fn top_level_regions(ast: &[ConfigNode], line_count: usize) -> Vec<(usize, usize)> {
    let len = ast.len();
    ast.iter()
        .enumerate()
        .map(|(i, node)| {
            let start = node.loc.start_line;
            let end = if i + 1 < len {
                ast[i + 1].loc.start_line.saturating_sub(1)
            } else {
                line_count.saturating_sub(1)
            };
            (start, end.max(node.loc.end_line))
        })
        .collect()
}

/// Changed section headers outnumbering half the top level, or a line
/// count swing past the delta cap, force a full parse.
fn structural_change(entry: &CacheEntry, new_count: usize, ranges: &[(usize, usize)]) -> bool {
    if entry.line_count.abs_diff(new_count) > STRUCTURAL_LINE_DELTA {
        return true;
    }
    if entry.ast.is_empty() {
        return false;
    }
    let moved_headers = entry
        .ast
        .iter()
        .filter(|node| {
            let header = node.loc.start_line;
            ranges.iter().any(|&(a, b)| header >= a && header <= b)
        })
        .count();
    moved_headers * 2 > entry.ast.len()
}

/// Group positions with differing hashes into inclusive ranges
fn changed_ranges(old: &[String], new: &[String]) -> Vec<(usize, usize)> {
    let limit = old.len().max(new.len());
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut open: Option<(usize, usize)> = None;

    for position in 0..limit {
        if old.get(position) == new.get(position) {
            if let Some(range) = open.take() {
                ranges.push(range);
            }
        } else {
            match open.as_mut() {
                Some((_, end)) => *end = position,
                None => open = Some((position, position)),
            }
        }
    }
    if let Some(range) = open {
        ranges.push(range);
    }
    ranges
}

/// DJB2 (xor variant) over the line bytes, rendered in base 36
fn hash_line(line: &str) -> String {
    let mut hash: u32 = 5381;
    for byte in line.bytes() {
        hash = hash.wrapping_mul(33) ^ u32::from(byte);
    }
    to_base36(hash)
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

fn shift_node(node: &mut ConfigNode, offset: i64) {
    node.loc.start_line = clamp_line(node.loc.start_line as i64 + offset, usize::MAX);
    node.loc.end_line = clamp_line(node.loc.end_line as i64 + offset, usize::MAX);
    for child in &mut node.children {
        shift_node(child, offset);
    }
}

fn clamp_line(value: i64, max: usize) -> usize {
    if value <= 0 {
        0
    } else {
        usize::try_from(value).map_or(max, |v| v.min(max))
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2_is_stable_and_distributed() {
        assert_eq!(hash_line("interface Gi0/1"), hash_line("interface Gi0/1"));
        assert_ne!(hash_line("interface Gi0/1"), hash_line("interface Gi0/2"));
        assert_eq!(hash_line(""), to_base36(5381));
    }

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn ranges_group_consecutive_differences() {
        let old: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| hash_line(s)).collect();
        let new: Vec<String> = ["a", "x", "y", "d", "z"].iter().map(|s| hash_line(s)).collect();
        assert_eq!(changed_ranges(&old, &new), vec![(1, 2), (4, 4)]);
    }

    #[test]
    fn trailing_tail_is_one_range() {
        let old: Vec<String> = ["a", "b"].iter().map(|s| hash_line(s)).collect();
        let new: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| hash_line(s)).collect();
        assert_eq!(changed_ranges(&old, &new), vec![(2, 3)]);
    }

    #[test]
    fn identical_hashes_produce_no_ranges() {
        let lines: Vec<String> = ["a", "b"].iter().map(|s| hash_line(s)).collect();
        assert!(changed_ranges(&lines, &lines).is_empty());
    }

    #[test]
    fn regions_cover_ender_lines() {
        let text = "router bgp 65001\n address-family ipv4\n  neighbor 10.0.0.1 activate\n exit-address-family\n";
        let schema = crate::schema::default_vendor();
        let ast = parse_with_schema(text, schema, &ParseOptions::default()).expect("parse");
        let regions = top_level_regions(&ast, 4);
        assert_eq!(regions, vec![(0, 3)]);
    }
}
