use super::severity::SeverityTally;
use serde::Serialize;

/// Placeholder written to the `time` column of every row
pub const PLACEHOLDER_TIME: &str = "10 hours ago";

/// Column order of the consolidated table
pub const CONSOLIDATED_HEADER: [&str; 14] = [
    "No.",
    "Application",
    "Organization",
    "time",
    "Critical (7-10)",
    "Severe (4-6)",
    "Moderate (1-3)",
    "Policy",
    "Component",
    "Threat",
    "Policy/Action",
    "Constraint Name",
    "Condition",
    "CVE",
];

/// One row of the consolidated report: a single policy violation,
/// annotated with its application's severity totals
///
/// Field order and serde names define the CSV columns and must match
/// [`CONSOLIDATED_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedRow {
    #[serde(rename = "No.")]
    pub sequence: usize,
    #[serde(rename = "Application")]
    pub application: String,
    #[serde(rename = "Organization")]
    pub organization: String,
    #[serde(rename = "time")]
    pub time: String,
    #[serde(rename = "Critical (7-10)")]
    pub critical: u32,
    #[serde(rename = "Severe (4-6)")]
    pub severe: u32,
    #[serde(rename = "Moderate (1-3)")]
    pub moderate: u32,
    #[serde(rename = "Policy")]
    pub policy: String,
    #[serde(rename = "Component")]
    pub component: String,
    #[serde(rename = "Threat")]
    pub threat: i32,
    #[serde(rename = "Policy/Action")]
    pub policy_action: String,
    #[serde(rename = "Constraint Name")]
    pub constraint_name: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "CVE")]
    pub cve: String,
}

impl ConsolidatedRow {
    /// The application's tally as carried by this row
    pub fn tally(&self) -> SeverityTally {
        SeverityTally::new(self.critical, self.severe, self.moderate)
    }
}
