use crate::report_consolidation::domain::Constraint;
use regex::Regex;
use std::sync::LazyLock;

/// CVE identifier: 4-digit year, then a variable-length sequence number
static CVE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"CVE-[0-9]{4}-[0-9]+").ok());

const CONDITION_SEPARATOR: &str = " | ";
const CVE_SEPARATOR: &str = ", ";

/// Human-readable facts pulled out of one violation's constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedViolation {
    /// Name of the last constraint processed
    pub constraint_name: String,
    /// Condition fragments of every constraint, joined with `" | "`
    pub condition: String,
    /// Distinct CVE IDs in first-seen order
    pub cve_ids: Vec<String>,
}

impl ExtractedViolation {
    /// CVE IDs joined with `", "`
    pub fn cve_list(&self) -> String {
        self.cve_ids.join(CVE_SEPARATOR)
    }
}

/// ViolationExtractor service for parsing constraint and condition text
///
/// The constraint name is a single slot overwritten by every constraint, so
/// only the last one survives. Condition fragments and CVE IDs accumulate
/// across all constraints.
pub struct ViolationExtractor;

impl ViolationExtractor {
    pub fn extract(constraints: &[Constraint]) -> ExtractedViolation {
        let mut constraint_name = String::new();
        let mut fragments: Vec<&str> = Vec::new();
        let mut cve_ids: Vec<String> = Vec::new();

        for constraint in constraints {
            constraint_name.clone_from(&constraint.constraint_name);

            for condition in &constraint.conditions {
                let summary = condition.condition_summary.as_str();
                let reason = condition.condition_reason.as_str();

                let text = format!("{} {}", summary, reason);
                if let Some(cve) = Self::first_unseen_cve(&text, &cve_ids) {
                    cve_ids.push(cve);
                }

                if !reason.is_empty() {
                    fragments.push(reason);
                } else if !summary.is_empty() {
                    fragments.push(summary);
                }
            }
        }

        ExtractedViolation {
            constraint_name,
            condition: fragments.join(CONDITION_SEPARATOR),
            cve_ids,
        }
    }

    /// First CVE ID in `text` that is not already in `seen`
    fn first_unseen_cve(text: &str, seen: &[String]) -> Option<String> {
        let pattern = CVE_PATTERN.as_ref()?;
        pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|id| !seen.iter().any(|s| s == id))
            .map(str::to_string)
    }
}
