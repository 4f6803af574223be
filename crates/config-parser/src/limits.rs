//! Input size caps and tuning constants
//!
//! All limits are compile-time constants so hosts can override them by
//! building with a patched crate; the core reads them from one place.

/// Longest line the parser will accept; longer lines are skipped silently
pub const MAX_LINE_LENGTH: usize = 10_000;

/// Largest configuration accepted, in bytes
pub const MAX_CONFIG_SIZE: usize = 50 * 1024 * 1024;

/// Largest configuration accepted, in lines
pub const MAX_LINE_COUNT: usize = 1_000_000;

/// Deepest tree the parsers will build
pub const MAX_NESTING_DEPTH: usize = 32;

/// Ratio of changed lines above which a full re-parse is preferred
pub const INCREMENTAL_PARSE_THRESHOLD: f64 = 0.30;

/// Number of leading characters the vendor detector inspects
pub const DETECTION_WINDOW: usize = 2_000;
