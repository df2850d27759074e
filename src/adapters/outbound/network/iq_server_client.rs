use crate::ports::outbound::IqServerRepository;
use crate::report_consolidation::domain::raw_report::null_as_default;
use crate::report_consolidation::domain::{Application, RawReportDocument, ReportReference};
use crate::shared::error::IqServerError;
use crate::shared::security::validate_path_segment;
use crate::shared::Result;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize)]
struct ApplicationList {
    #[serde(default, deserialize_with = "null_as_default")]
    applications: Vec<Application>,
}

/// IqServerClient adapter for the IQ Server REST API (v2)
///
/// This adapter implements the IqServerRepository port with a blocking
/// reqwest client authenticated with HTTP basic auth.
///
/// # Security
/// - Request timeout is always set
/// - Identifiers placed into URL paths are validated and percent-encoded
/// - Credentials are never logged
pub struct IqServerClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl IqServerClient {
    /// Creates a new client for the server at `base_url`
    pub fn new(base_url: &str, username: &str, password: &str, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("iq-report/{}", version);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET request and returns the body of a successful response
    fn get(&self, endpoint: &str) -> std::result::Result<String, IqServerError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let started = Instant::now();
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| IqServerError::Transport {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        if !status.is_success() {
            return Err(Self::status_error(endpoint, status));
        }

        response.text().map_err(|e| IqServerError::Transport {
            endpoint: endpoint.to_string(),
            details: e.to_string(),
        })
    }

    fn status_error(endpoint: &str, status: StatusCode) -> IqServerError {
        let endpoint = endpoint.to_string();
        match status {
            StatusCode::UNAUTHORIZED => IqServerError::Unauthorized { endpoint },
            StatusCode::FORBIDDEN => IqServerError::Forbidden { endpoint },
            StatusCode::NOT_FOUND => IqServerError::NotFound { endpoint },
            other => IqServerError::HttpStatus {
                endpoint,
                status: other.as_u16(),
            },
        }
    }

    fn applications_endpoint(organization_id: Option<&str>) -> Result<String> {
        match organization_id {
            Some(org) => {
                validate_path_segment(org, "organizationId")?;
                Ok(format!(
                    "/api/v2/applications/organization/{}",
                    urlencoding::encode(org)
                ))
            }
            None => Ok("/api/v2/applications".to_string()),
        }
    }

    fn report_reference_endpoint(application_id: &str) -> Result<String> {
        validate_path_segment(application_id, "applicationId")?;
        Ok(format!(
            "/api/v2/reports/applications/{}",
            urlencoding::encode(application_id)
        ))
    }

    fn policy_endpoint(public_id: &str, report_id: &str) -> Result<String> {
        validate_path_segment(public_id, "publicId")?;
        validate_path_segment(report_id, "reportId")?;
        Ok(format!(
            "/api/v2/applications/{}/reports/{}/policy?includeViolationTimes=true",
            urlencoding::encode(public_id),
            urlencoding::encode(report_id)
        ))
    }

    fn invalid_response(endpoint: &str, e: impl std::fmt::Display) -> IqServerError {
        IqServerError::InvalidResponse {
            endpoint: endpoint.to_string(),
            details: e.to_string(),
        }
    }

    /// Parses the application listing; a missing or `null` `applications` key is an empty list
    fn parse_applications(endpoint: &str, body: &str) -> Result<Vec<Application>> {
        let list: ApplicationList =
            serde_json::from_str(body).map_err(|e| Self::invalid_response(endpoint, e))?;
        Ok(list.applications)
    }

    /// Parses the report list; the first entry is the latest report
    ///
    /// An empty body, `null` and `[]` all mean the application has no reports.
    fn parse_latest_reference(endpoint: &str, body: &str) -> Result<Option<ReportReference>> {
        if body.trim().is_empty() {
            return Ok(None);
        }
        let reports: Option<Vec<ReportReference>> =
            serde_json::from_str(body).map_err(|e| Self::invalid_response(endpoint, e))?;
        Ok(reports.into_iter().flatten().next())
    }

    /// Parses a policy report; empty bodies, `null` and `{}` count as absent
    fn parse_policy_document(endpoint: &str, body: &str) -> Result<Option<RawReportDocument>> {
        if body.trim().is_empty() {
            return Ok(None);
        }
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| Self::invalid_response(endpoint, e))?;
        match &value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => return Ok(None),
            _ => {}
        }
        let document: RawReportDocument =
            serde_json::from_value(value).map_err(|e| Self::invalid_response(endpoint, e))?;
        Ok(Some(document))
    }
}

impl IqServerRepository for IqServerClient {
    fn list_applications(&self, organization_id: Option<&str>) -> Result<Vec<Application>> {
        let endpoint = Self::applications_endpoint(organization_id)?;
        let body = self.get(&endpoint)?;
        Self::parse_applications(&endpoint, &body)
    }

    fn get_latest_report_reference(&self, application_id: &str) -> Result<Option<ReportReference>> {
        let endpoint = Self::report_reference_endpoint(application_id)?;
        let body = self.get(&endpoint)?;
        Self::parse_latest_reference(&endpoint, &body)
    }

    fn get_policy_violations(
        &self,
        public_id: &str,
        report_id: &str,
    ) -> Result<Option<RawReportDocument>> {
        let endpoint = Self::policy_endpoint(public_id, report_id)?;
        let body = self.get(&endpoint)?;
        Self::parse_policy_document(&endpoint, &body)
    }
}
