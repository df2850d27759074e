use iq_report::prelude::*;
use std::collections::HashMap;

/// Mock IqServerRepository for testing
///
/// Applications are returned in insertion order. References and documents
/// are keyed by internal application ID and `(publicId, reportId)`.
#[derive(Default)]
pub struct MockIqServerRepository {
    pub applications: Vec<Application>,
    pub references: HashMap<String, ReportReference>,
    pub documents: HashMap<(String, String), RawReportDocument>,
    pub failing_applications: Vec<String>,
    pub should_fail_listing: bool,
    pub listing_requests: std::sync::Arc<std::sync::Mutex<Vec<Option<String>>>>,
}

impl MockIqServerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an application whose latest report is `document`
    pub fn with_report(
        mut self,
        id: &str,
        public_id: &str,
        report_id: &str,
        document: RawReportDocument,
    ) -> Self {
        self = self.with_application(id, public_id);
        self.references.insert(
            id.to_string(),
            ReportReference {
                report_data_url: Some(format!(
                    "api/v2/applications/{}/reports/{}",
                    public_id, report_id
                )),
                ..Default::default()
            },
        );
        self.documents
            .insert((public_id.to_string(), report_id.to_string()), document);
        self
    }

    /// Adds an application that has never been scanned
    pub fn with_application(mut self, id: &str, public_id: &str) -> Self {
        self.applications.push(Application::new(
            id.to_string(),
            public_id.to_string(),
            format!("{} app", public_id),
        ));
        self
    }

    /// Adds an application whose report lookup fails with a transport error
    pub fn with_failing_application(mut self, id: &str, public_id: &str) -> Self {
        self = self.with_application(id, public_id);
        self.failing_applications.push(id.to_string());
        self
    }

    pub fn with_listing_failure() -> Self {
        Self {
            should_fail_listing: true,
            ..Self::default()
        }
    }
}

impl IqServerRepository for MockIqServerRepository {
    fn list_applications(&self, organization_id: Option<&str>) -> Result<Vec<Application>> {
        if self.should_fail_listing {
            anyhow::bail!("Mock IQ Server listing failure");
        }
        self.listing_requests
            .lock()
            .unwrap()
            .push(organization_id.map(str::to_string));
        Ok(self.applications.clone())
    }

    fn get_latest_report_reference(&self, application_id: &str) -> Result<Option<ReportReference>> {
        if self.failing_applications.iter().any(|id| id == application_id) {
            anyhow::bail!("Mock IQ Server returned HTTP 503");
        }
        Ok(self.references.get(application_id).cloned())
    }

    fn get_policy_violations(
        &self,
        public_id: &str,
        report_id: &str,
    ) -> Result<Option<RawReportDocument>> {
        Ok(self
            .documents
            .get(&(public_id.to_string(), report_id.to_string()))
            .cloned())
    }
}
