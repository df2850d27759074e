use crate::report_consolidation::domain::{Application, RawReportDocument, ReportReference};
use crate::shared::Result;

/// IqServerRepository port for reading applications and reports
///
/// This port abstracts the IQ Server REST API. All calls block until the
/// server answers or the request fails.
pub trait IqServerRepository {
    /// Lists applications, optionally restricted to one organization
    ///
    /// # Errors
    /// Returns an error if the server cannot be reached, rejects the
    /// credentials, or answers with an unexpected payload
    fn list_applications(&self, organization_id: Option<&str>) -> Result<Vec<Application>>;

    /// Fetches the most recent report reference of an application
    ///
    /// # Arguments
    /// * `application_id` - Internal application ID (not the public ID)
    ///
    /// # Returns
    /// `None` when the application has never been evaluated
    fn get_latest_report_reference(&self, application_id: &str)
        -> Result<Option<ReportReference>>;

    /// Fetches the policy-violation report for one application and report
    ///
    /// # Returns
    /// `None` when the server returned an empty payload
    fn get_policy_violations(
        &self,
        public_id: &str,
        report_id: &str,
    ) -> Result<Option<RawReportDocument>>;
}
