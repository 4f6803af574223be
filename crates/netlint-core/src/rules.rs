//! Compliance rule engine
//!
//! Rules are declarative checks over the parsed configuration tree. A rule
//! names a selector (the id prefix of the nodes it inspects), a vendor
//! scope, reporting metadata, and a check function returning a verdict per
//! inspected node. The engine dispatches rules over a forest, materializes
//! a [`RuleResult`] for every verdict, and returns the results in
//! deterministic order (rule id, then node encounter order).
//!
//! # Example
//!
//! ```rust
//! use config_parser::{parse, ParseOptions};
//! use netlint_core::rules::{
//!     CheckOutcome, Rule, RuleMetadata, Selector, VendorScope, run_rules,
//! };
//!
//! let forest = parse("interface Gi0/1\n no shutdown\n", &ParseOptions::default()).unwrap();
//! let rule = Rule::new(
//!     "iface-description",
//!     Selector::token("interface"),
//!     VendorScope::Common,
//!     RuleMetadata::warning("interfaces should carry a description"),
//!     |node, _ctx| {
//!         if node.children.iter().any(|c| c.id.starts_with("description")) {
//!             CheckOutcome::pass("description present")
//!         } else {
//!             CheckOutcome::fail("missing description")
//!         }
//!     },
//! );
//! let results = run_rules(&forest, &[rule]);
//! assert!(!results[0].passed);
//! ```

mod engine;
mod results;

pub use engine::{run_rules, run_rules_for_vendor};
pub use results::RuleReport;

use config_parser::{ConfigNode, Loc, TreeTraversal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a rule and its findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RuleLevel {
    /// Informational finding
    Info,
    /// Non-blocking violation
    Warning,
    /// Blocking violation
    Error,
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Security classification attached to security-relevant rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityMetadata {
    /// CWE identifier, when one applies
    pub cwe: Option<String>,
    /// Vendor-neutral severity label (e.g. `high`)
    pub severity: Option<String>,
    /// External references (advisories, hardening guides)
    pub references: Vec<String>,
}

/// Reporting metadata carried by every rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Severity of a failed check
    pub level: RuleLevel,
    /// What the rule verifies
    pub description: String,
    /// How to fix a violation
    pub remediation: Option<String>,
    /// Optional security classification
    pub security: Option<SecurityMetadata>,
}

impl RuleMetadata {
    /// Error-level metadata with a description only
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: RuleLevel::Error,
            description: description.into(),
            remediation: None,
            security: None,
        }
    }

    /// Warning-level metadata with a description only
    #[must_use]
    pub fn warning(description: impl Into<String>) -> Self {
        Self {
            level: RuleLevel::Warning,
            description: description.into(),
            remediation: None,
            security: None,
        }
    }

    /// Info-level metadata with a description only
    #[must_use]
    pub fn info(description: impl Into<String>) -> Self {
        Self {
            level: RuleLevel::Info,
            description: description.into(),
            remediation: None,
            security: None,
        }
    }

    /// Attach a remediation hint
    #[must_use]
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Attach security classification
    #[must_use]
    pub fn with_security(mut self, security: SecurityMetadata) -> Self {
        self.security = Some(security);
        self
    }
}

/// Node selector: one or more id prefixes a rule dispatches on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    /// Single id prefix
    Token(String),
    /// Any of several id prefixes
    Tokens(Vec<String>),
}

impl Selector {
    /// Single-token selector
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Multi-token selector
    #[must_use]
    pub fn tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tokens(tokens.into_iter().map(Into::into).collect())
    }

    /// True when `id` starts with any selector token
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::Token(token) => id.starts_with(token.as_str()),
            Self::Tokens(tokens) => tokens.iter().any(|t| id.starts_with(t.as_str())),
        }
    }
}

/// Which vendor dialects a rule applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorScope {
    /// Applies to every vendor
    Common,
    /// Applies to one vendor id
    One(String),
    /// Applies to a list of vendor ids
    Many(Vec<String>),
}

impl VendorScope {
    /// True when the scope covers `vendor_id`
    #[must_use]
    pub fn matches(&self, vendor_id: &str) -> bool {
        match self {
            Self::Common => true,
            Self::One(id) => id == vendor_id,
            Self::Many(ids) => ids.iter().any(|id| id == vendor_id),
        }
    }
}

/// Verdict a check function returns for one inspected node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The node complies
    Pass {
        /// Supporting detail
        message: String,
    },
    /// The node violates the rule
    Fail {
        /// What is wrong
        message: String,
    },
    /// The rule does not apply to this node; reported passed at info level
    NotApplicable {
        /// Why the rule was skipped
        message: String,
    },
}

impl CheckOutcome {
    /// Compliant verdict
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self::Pass {
            message: message.into(),
        }
    }

    /// Violation verdict
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
        }
    }

    /// "Does not apply" verdict
    #[must_use]
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self::NotApplicable {
            message: message.into(),
        }
    }
}

/// Check function signature: one inspected node plus the run context
pub type CheckFn = dyn Fn(&ConfigNode, &RuleContext<'_>) -> CheckOutcome + Send + Sync;

/// A declarative compliance rule
pub struct Rule {
    /// Stable rule identifier, used for result ordering
    pub id: String,
    /// Which node ids the rule dispatches on
    pub selector: Selector,
    /// Which vendors the rule applies to
    pub vendor: VendorScope,
    /// Reporting metadata
    pub metadata: RuleMetadata,
    check: Box<CheckFn>,
}

impl Rule {
    /// Build a rule from its parts and a check function
    pub fn new<F>(
        id: impl Into<String>,
        selector: Selector,
        vendor: VendorScope,
        metadata: RuleMetadata,
        check: F,
    ) -> Self
    where
        F: Fn(&ConfigNode, &RuleContext<'_>) -> CheckOutcome + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            selector,
            vendor,
            metadata,
            check: Box::new(check),
        }
    }

    /// Run the check against one node and materialize the result
    #[must_use]
    pub fn check(&self, node: &ConfigNode, context: &RuleContext<'_>) -> RuleResult {
        let (passed, level, message) = match (self.check)(node, context) {
            CheckOutcome::Pass { message } => (true, self.metadata.level, message),
            CheckOutcome::Fail { message } => (false, self.metadata.level, message),
            CheckOutcome::NotApplicable { message } => (true, RuleLevel::Info, message),
        };
        RuleResult {
            passed,
            message,
            rule_id: self.id.clone(),
            node_id: node.id.clone(),
            level,
            loc: node.loc,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("selector", &self.selector)
            .field("vendor", &self.vendor)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Outcome of one rule check against one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// True when the node complies (or the rule does not apply)
    pub passed: bool,
    /// Human-readable finding
    pub message: String,
    /// Id of the producing rule
    pub rule_id: String,
    /// Canonical id of the inspected node
    pub node_id: String,
    /// Severity of the finding
    pub level: RuleLevel,
    /// Line span of the inspected node
    pub loc: Loc,
}

/// Context handed to every check invocation
pub struct RuleContext<'a> {
    ast: &'a [ConfigNode],
}

impl<'a> RuleContext<'a> {
    /// Context over a parsed forest
    #[must_use]
    pub fn new(ast: &'a [ConfigNode]) -> Self {
        Self { ast }
    }

    /// The full forest, for cross-section lookups
    #[must_use]
    pub fn ast(&self) -> &'a [ConfigNode] {
        self.ast
    }

    /// Every node in the forest whose id starts with `prefix`
    #[must_use]
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&'a ConfigNode> {
        TreeTraversal::find_by_prefix(self.ast, prefix)
    }
}
