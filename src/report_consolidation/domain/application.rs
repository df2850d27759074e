use super::raw_report::null_as_default;
use serde::Deserialize;

/// Marker preceding the report ID inside a report-data URL
const REPORTS_SEGMENT: &str = "/reports/";

/// Application registered on the IQ Server
///
/// `public_id` is the stable key used for report lookups and tallies;
/// `id` is the internal identifier used by the reports endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub public_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Application {
    pub fn new(id: String, public_id: String, name: String) -> Self {
        Self {
            id,
            public_id,
            name,
        }
    }
}

/// Pointer to the latest evaluation report of one application
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportReference {
    #[serde(default)]
    pub report_id: Option<String>,
    #[serde(default)]
    pub scan_id: Option<String>,
    #[serde(default)]
    pub report_data_url: Option<String>,
}

impl ReportReference {
    /// Resolves the canonical report ID for the policy endpoint
    ///
    /// Resolution order:
    /// 1. The path segment after `/reports/` in `reportDataUrl`
    /// 2. `scanId`
    /// 3. `reportId`
    ///
    /// Empty values are treated as absent.
    pub fn resolve_report_id(&self) -> Option<String> {
        self.report_data_url
            .as_deref()
            .and_then(report_id_from_url)
            .or_else(|| non_empty(self.scan_id.as_deref()))
            .or_else(|| non_empty(self.report_id.as_deref()))
    }
}

fn report_id_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.split_once(REPORTS_SEGMENT)?;
    let segment = tail.split('/').next()?;
    non_empty(Some(segment))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
