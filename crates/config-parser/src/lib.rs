//! config-parser: schema-driven multi-vendor network configuration parsing
//!
//! This library turns raw textual device configurations (Cisco-style
//! indentation hierarchies, Junos-style brace hierarchies, MikroTik path
//! syntax, FortiOS tables, and a dozen more dialects) into one
//! vendor-neutral hierarchical tree of [`ConfigNode`]s.
//!
//! # Quick start
//!
//! ```rust
//! use config_parser::{parse, ParseOptions};
//!
//! let config = "interface GigabitEthernet0/1\n description Uplink\n no shutdown\n";
//! let forest = parse(config, &ParseOptions::default()).unwrap();
//! assert_eq!(forest[0].id, "interface GigabitEthernet0/1");
//! assert_eq!(forest[0].children.len(), 2);
//! ```
//!
//! The vendor dialect is auto-detected unless a schema is supplied; see
//! [`detect_vendor`] and [`schema::vendors`]. Editors and long-running
//! hosts use [`IncrementalParser`] to re-parse only the sections an edit
//! touched.

pub mod detect;
pub mod error;
pub mod incremental;
pub mod limits;
pub mod node;
pub mod parser;
pub mod sanitize;
pub mod schema;
pub mod validate;

pub use detect::detect_vendor;
pub use error::{ParserError, Result};
pub use incremental::{IncrementalParser, ParseStats, VendorChoice};
pub use node::{ConfigNode, Loc, NodeKind, Source, TreeTraversal};
pub use parser::{ParseOptions, parse, parse_with_schema};
pub use sanitize::{sanitize_line, tokenize_params};
pub use schema::{
    BlockStarter, VendorSchema, default_vendor, get_vendor, is_valid_vendor, vendor_ids, vendors,
};
pub use validate::{ValidationReport, validate_forest};
