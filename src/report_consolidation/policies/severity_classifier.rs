use crate::report_consolidation::domain::SeverityBucket;

/// Threat category that switches labelling to the security scheme
const SECURITY_CATEGORY: &str = "SECURITY";

const SECURITY_CRITICAL_LABEL: &str = "Security-Critical";
// Wording kept exactly as the report consumers expect it.
const SECURITY_SEVERE_LABEL: &str = "Security-CVSS score than or equals 7";
const SECURITY_MODERATE_LABEL: &str = "Security-Moderate";

/// Result of classifying one violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub bucket: SeverityBucket,
    pub label: String,
}

/// SeverityClassifier policy for labelling policy violations
///
/// Buckets always follow the threat-level thresholds of [`SeverityBucket`].
/// Labels depend on the threat category:
/// - `SECURITY` (case-insensitive): three labels only. Everything below 4,
///   including levels below 1, is `Security-Moderate`.
/// - Any other category: `"{category}-{bucket}"`, or just the bucket name
///   when the category is empty or absent. `Low` is included here.
pub struct SeverityClassifier;

impl SeverityClassifier {
    pub fn classify(threat_level: i32, category: Option<&str>) -> Classification {
        let bucket = SeverityBucket::from_threat_level(threat_level);
        let category = category.unwrap_or("");

        let label = if category.to_uppercase() == SECURITY_CATEGORY {
            Self::security_label(bucket).to_string()
        } else if category.is_empty() {
            bucket.to_string()
        } else {
            format!("{}-{}", category, bucket)
        };

        Classification { bucket, label }
    }

    fn security_label(bucket: SeverityBucket) -> &'static str {
        match bucket {
            SeverityBucket::Critical => SECURITY_CRITICAL_LABEL,
            SeverityBucket::Severe => SECURITY_SEVERE_LABEL,
            SeverityBucket::Moderate | SeverityBucket::Low => SECURITY_MODERATE_LABEL,
        }
    }
}
