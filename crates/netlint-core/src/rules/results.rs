//! Result aggregation for rule runs

use super::{RuleLevel, RuleResult};
use serde::{Deserialize, Serialize};

/// Aggregated outcome of one rule run over one configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleReport {
    /// Total results produced
    pub total: usize,
    /// Results that passed (including "does not apply")
    pub passed: usize,
    /// Results that failed
    pub failed: usize,
    /// Failed results at error level
    pub errors: usize,
    /// Failed results at warning level
    pub warnings: usize,
    /// Detailed results in engine order
    pub results: Vec<RuleResult>,
    /// Human-readable summary
    pub summary: String,
}

impl RuleReport {
    /// Build a report from a rule run's results
    #[must_use]
    pub fn from_results(results: Vec<RuleResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        let errors = results
            .iter()
            .filter(|r| !r.passed && r.level == RuleLevel::Error)
            .count();
        let warnings = results
            .iter()
            .filter(|r| !r.passed && r.level == RuleLevel::Warning)
            .count();

        let summary = Self::generate_summary(total, passed, failed, errors, warnings);

        Self {
            total,
            passed,
            failed,
            errors,
            warnings,
            results,
            summary,
        }
    }

    /// True when no error-level violation was found
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.errors == 0
    }

    /// The failed results, in engine order
    #[must_use]
    pub fn failures(&self) -> Vec<&RuleResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    fn generate_summary(
        total: usize,
        passed: usize,
        failed: usize,
        errors: usize,
        warnings: usize,
    ) -> String {
        if total == 0 {
            return "No rules evaluated".to_string();
        }

        let mut parts = vec![format!("{total} checks")];
        if passed > 0 {
            parts.push(format!("{passed} passed"));
        }
        if failed > 0 {
            parts.push(format!("{failed} failed"));
        }
        if errors > 0 {
            parts.push(format!("{errors} errors"));
        }
        if warnings > 0 {
            parts.push(format!("{warnings} warnings"));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_parser::Loc;

    fn result(rule: &str, passed: bool, level: RuleLevel) -> RuleResult {
        RuleResult {
            passed,
            message: String::new(),
            rule_id: rule.to_string(),
            node_id: "interface Gi0/1".to_string(),
            level,
            loc: Loc::at(0),
        }
    }

    #[test]
    fn empty_run_summary() {
        let report = RuleReport::from_results(Vec::new());
        assert_eq!(report.total, 0);
        assert!(report.is_compliant());
        assert_eq!(report.summary, "No rules evaluated");
    }

    #[test]
    fn counts_by_verdict_and_level() {
        let report = RuleReport::from_results(vec![
            result("a", true, RuleLevel::Error),
            result("b", false, RuleLevel::Error),
            result("c", false, RuleLevel::Warning),
            result("d", true, RuleLevel::Info),
        ]);
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.warnings, 1);
        assert!(!report.is_compliant());
        assert_eq!(report.failures().len(), 2);
        assert_eq!(report.summary, "4 checks, 2 passed, 2 failed, 1 errors, 1 warnings");
    }

    #[test]
    fn warnings_alone_stay_compliant() {
        let report = RuleReport::from_results(vec![result("a", false, RuleLevel::Warning)]);
        assert!(report.is_compliant());
    }

    #[test]
    fn report_serializes() {
        let report = RuleReport::from_results(vec![result("a", true, RuleLevel::Info)]);
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"][0]["level"], "info");
    }
}
