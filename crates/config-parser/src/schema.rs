//! Vendor schema model and registry
//!
//! A schema is pure data: ordered block-starter patterns with depth hints,
//! block-ender patterns, comment patterns, and a hierarchy mode flag. The
//! sixteen dialect schemas are compiled once at startup into a shared
//! read-only registry; lookup by id is a linear scan over the small set.

mod catalog;

use once_cell::sync::Lazy;
use regex::Regex;

/// Id of the fallback schema used when detection finds nothing better
pub const DEFAULT_VENDOR_ID: &str = "cisco-ios";

static SCHEMAS: Lazy<Vec<VendorSchema>> = Lazy::new(catalog::build);

/// A pattern that opens a section at a declared depth
#[derive(Debug, Clone)]
pub struct BlockStarter {
    /// Case-insensitive regex anchored at line start
    pub pattern: Regex,
    /// Zero-rooted depth the opened section sits at
    pub depth: usize,
}

/// Result of matching a line against a schema's block starters
#[derive(Debug, Clone)]
pub struct StarterMatch {
    /// Depth of the first matching pattern (list order is precedence)
    pub depth: usize,
    /// Every depth the matching pattern is registered at, ascending
    pub depths: Vec<usize>,
}

impl StarterMatch {
    /// True when the same pattern body is registered at several depths
    #[must_use]
    pub fn is_multi_depth(&self) -> bool {
        self.depths.len() > 1
    }
}

/// Immutable description of one vendor dialect
#[derive(Debug, Clone)]
pub struct VendorSchema {
    /// Stable string key (e.g. `cisco-ios`)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// True for brace-delimited hierarchies (Junos, VyOS, PAN-OS)
    pub use_brace_hierarchy: bool,
    /// Ordered block starters; more specific patterns first
    pub block_starters: Vec<BlockStarter>,
    /// Patterns that close the innermost open section
    pub block_enders: Vec<Regex>,
    /// Patterns marking a line as a comment, skipped entirely
    pub comment_patterns: Vec<Regex>,
    /// Informational section delimiter character
    pub section_delimiter: Option<char>,
}

impl VendorSchema {
    /// Match `id` against the ordered starter list; first match wins.
    ///
    /// The returned match also carries every depth the winning pattern body
    /// is registered at, so the parser can resolve multi-depth tokens such
    /// as `address-family` against the enclosing section.
    #[must_use]
    pub fn match_starter(&self, id: &str) -> Option<StarterMatch> {
        let first = self.block_starters.iter().find(|s| s.pattern.is_match(id))?;
        let body = first.pattern.as_str();
        let mut depths: Vec<usize> = self
            .block_starters
            .iter()
            .filter(|s| s.pattern.as_str() == body)
            .map(|s| s.depth)
            .collect();
        depths.sort_unstable();
        depths.dedup();
        Some(StarterMatch {
            depth: first.depth,
            depths,
        })
    }

    /// True when `id` matches any block-ender pattern
    #[must_use]
    pub fn is_block_ender(&self, id: &str) -> bool {
        self.block_enders.iter().any(|re| re.is_match(id))
    }

    /// True when `id` matches any comment pattern
    #[must_use]
    pub fn is_comment(&self, id: &str) -> bool {
        self.comment_patterns.iter().any(|re| re.is_match(id))
    }
}

impl std::fmt::Display for VendorSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// All registered vendor schemas, in registry order
#[must_use]
pub fn vendors() -> &'static [VendorSchema] {
    &SCHEMAS
}

/// Stable ids of all registered schemas
#[must_use]
pub fn vendor_ids() -> Vec<&'static str> {
    SCHEMAS.iter().map(|s| s.id).collect()
}

/// Look up a schema by id
#[must_use]
pub fn get_vendor(id: &str) -> Option<&'static VendorSchema> {
    SCHEMAS.iter().find(|s| s.id == id)
}

/// True when `id` names a registered schema
#[must_use]
pub fn is_valid_vendor(id: &str) -> bool {
    get_vendor(id).is_some()
}

/// The fallback schema (Cisco-IOS-style indentation hierarchy)
#[must_use]
pub fn default_vendor() -> &'static VendorSchema {
    get_vendor(DEFAULT_VENDOR_ID).expect("default vendor schema registered")
}
