/// ConsolidationRequest - Request DTO for the consolidation use case
#[derive(Debug, Clone, Default)]
pub struct ConsolidationRequest {
    /// Restrict the run to applications of one organization
    pub organization_id: Option<String>,
}

impl ConsolidationRequest {
    pub fn new(organization_id: Option<String>) -> Self {
        Self { organization_id }
    }
}
