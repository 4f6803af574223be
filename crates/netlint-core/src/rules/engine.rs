//! Rule dispatch over a parsed forest

use super::{Rule, RuleContext, RuleLevel, RuleResult};
use config_parser::{ConfigNode, TreeTraversal};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, warn};

/// Evaluate every rule against the forest.
///
/// Each rule dispatches on the nodes whose id starts with one of its
/// selector tokens. Results come back in deterministic order: rules sorted
/// by id, nodes in depth-first encounter order. A check that panics is
/// converted into a passed, info-level result describing the failure; the
/// engine never halts on a single rule.
#[must_use]
pub fn run_rules(ast: &[ConfigNode], rules: &[Rule]) -> Vec<RuleResult> {
    let all: Vec<&Rule> = rules.iter().collect();
    dispatch(ast, all)
}

/// Evaluate only the rules whose vendor scope covers `vendor_id`
#[must_use]
pub fn run_rules_for_vendor(
    ast: &[ConfigNode],
    rules: &[Rule],
    vendor_id: &str,
) -> Vec<RuleResult> {
    let applicable: Vec<&Rule> = rules
        .iter()
        .filter(|rule| rule.vendor.matches(vendor_id))
        .collect();
    debug!(
        vendor = vendor_id,
        applicable = applicable.len(),
        total = rules.len(),
        "vendor-scoped rule run"
    );
    dispatch(ast, applicable)
}

fn dispatch(ast: &[ConfigNode], mut rules: Vec<&Rule>) -> Vec<RuleResult> {
    rules.sort_by(|a, b| a.id.cmp(&b.id));

    let context = RuleContext::new(ast);
    let mut results = Vec::new();

    for rule in rules {
        let nodes = TreeTraversal::find_nodes(ast, |node| rule.selector.matches(&node.id));
        debug!(rule = %rule.id, nodes = nodes.len(), "dispatching rule");

        for node in nodes {
            match catch_unwind(AssertUnwindSafe(|| rule.check(node, &context))) {
                Ok(result) => results.push(result),
                Err(payload) => {
                    warn!(rule = %rule.id, node = %node.id, "rule check panicked");
                    results.push(RuleResult {
                        passed: true,
                        message: format!("rule check failed: {}", panic_message(&payload)),
                        rule_id: rule.id.clone(),
                        node_id: node.id.clone(),
                        level: RuleLevel::Info,
                        loc: node.loc,
                    });
                }
            }
        }
    }

    results
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
