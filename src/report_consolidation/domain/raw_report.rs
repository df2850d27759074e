//! Typed view of the IQ Server policy-violation report.
//!
//! The server payload is large and loosely populated. Every field here is
//! optional on the wire: absent or `null` values fall back to defaults so the
//! rest of the pipeline can treat the document as total.

use serde::{Deserialize, Deserializer, Serialize};

/// Value substituted for a missing application or organization ID
pub const UNKNOWN_ID: &str = "unknown";

/// Raw per-application report document as returned by the policy endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawReportDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub application: ApplicationDescriptor,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<Component>,
}

impl RawReportDocument {
    pub fn new(application: ApplicationDescriptor, components: Vec<Component>) -> Self {
        Self {
            application,
            components,
        }
    }

    /// Total number of violations across all components
    pub fn violation_count(&self) -> usize {
        self.components.iter().map(|c| c.violations.len()).sum()
    }
}

/// Application descriptor embedded in a report document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl ApplicationDescriptor {
    pub fn new(public_id: &str, organization_id: &str) -> Self {
        Self {
            public_id: Some(public_id.to_string()),
            organization_id: Some(organization_id.to_string()),
        }
    }

    /// Public ID, or `"unknown"` when the server omitted it
    pub fn public_id(&self) -> &str {
        self.public_id.as_deref().unwrap_or(UNKNOWN_ID)
    }

    /// Organization ID, or `"unknown"` when the server omitted it
    pub fn organization_id(&self) -> &str {
        self.organization_id.as_deref().unwrap_or(UNKNOWN_ID)
    }
}

/// A component (dependency) with the policy violations raised against it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Component {
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub violations: Vec<Violation>,
}

impl Component {
    pub fn new(display_name: &str, violations: Vec<Violation>) -> Self {
        Self {
            display_name: display_name.to_string(),
            violations,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Violation {
    #[serde(deserialize_with = "lenient_threat_level")]
    pub policy_threat_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_threat_category: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub policy_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub constraints: Vec<Constraint>,
}

impl Violation {
    pub fn new(
        policy_name: &str,
        policy_threat_level: i32,
        policy_threat_category: Option<&str>,
        constraints: Vec<Constraint>,
    ) -> Self {
        Self {
            policy_threat_level,
            policy_threat_category: policy_threat_category.map(str::to_string),
            policy_name: policy_name.to_string(),
            constraints,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraint {
    #[serde(deserialize_with = "null_as_default")]
    pub constraint_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,
}

impl Constraint {
    pub fn new(constraint_name: &str, conditions: Vec<Condition>) -> Self {
        Self {
            constraint_name: constraint_name.to_string(),
            conditions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Condition {
    #[serde(deserialize_with = "null_as_default")]
    pub condition_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_reason: String,
}

impl Condition {
    pub fn new(condition_summary: &str, condition_reason: &str) -> Self {
        Self {
            condition_summary: condition_summary.to_string(),
            condition_reason: condition_reason.to_string(),
        }
    }
}

/// Treats an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts integers, floats (truncated) and numeric strings; anything else is 0
fn lenient_threat_level<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let level = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        _ => 0,
    };
    Ok(level.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}
