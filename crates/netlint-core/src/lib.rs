//! netlint core library
//!
//! Core functionality for netlint multi-vendor network configuration
//! compliance analysis: the schema-driven parser surface (re-exported from
//! `config-parser`), the declarative rule engine, unified error types, and
//! the logging bootstrap.
//!
//! # Quick start
//!
//! ```rust
//! use netlint_core::prelude::*;
//!
//! let forest = parse("interface Gi0/1\n shutdown\n", &ParseOptions::default()).unwrap();
//! let rule = Rule::new(
//!     "no-shutdown",
//!     Selector::token("interface"),
//!     VendorScope::Common,
//!     RuleMetadata::warning("interfaces should be enabled"),
//!     |node, _ctx| {
//!         if node.children.iter().any(|c| c.id == "shutdown") {
//!             CheckOutcome::fail("administratively down")
//!         } else {
//!             CheckOutcome::pass("enabled")
//!         }
//!     },
//! );
//! let report = RuleReport::from_results(run_rules(&forest, &[rule]));
//! assert_eq!(report.failed, 1);
//! ```

pub mod error;
pub mod logging;
pub mod rules;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for commonly used types
pub mod prelude {
    // Core error types
    pub use crate::error::{Error, Result};

    // Rule engine
    pub use crate::rules::{
        CheckOutcome, Rule, RuleContext, RuleLevel, RuleMetadata, RuleReport, RuleResult,
        SecurityMetadata, Selector, VendorScope, run_rules, run_rules_for_vendor,
    };

    // Logging bootstrap
    pub use crate::logging::{init_default_tracing, init_tracing};

    // Parser surface
    pub use config_parser::{
        ConfigNode, IncrementalParser, Loc, NodeKind, ParseOptions, ParseStats, ParserError,
        Source, TreeTraversal, VendorChoice, VendorSchema, default_vendor, detect_vendor,
        get_vendor, is_valid_vendor, parse, parse_with_schema, vendor_ids, vendors,
    };
}
