use crate::report_consolidation::domain::{
    ConsolidatedRow, RawReportDocument, SeverityTally, PLACEHOLDER_TIME,
};
use crate::report_consolidation::policies::SeverityClassifier;
use crate::report_consolidation::services::ViolationExtractor;
use std::collections::HashMap;

/// ReportAggregator service - two-pass consolidation of report documents
///
/// Pass 1 runs on [`ingest`](Self::ingest): every violation of the document
/// is counted into its application's tally. Pass 2 runs on
/// [`build_rows`](Self::build_rows): one row per violation, each carrying the
/// complete tally of its application.
///
/// Tallies are keyed by the application public ID, so two documents for the
/// same public ID share one tally.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    tallies: HashMap<String, SeverityTally>,
    documents: Vec<RawReportDocument>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies the document's violations and keeps it for row construction
    pub fn ingest(&mut self, document: RawReportDocument) {
        let tally = self
            .tallies
            .entry(document.application.public_id().to_string())
            .or_default();

        for component in &document.components {
            for violation in &component.violations {
                tally.record(violation.policy_threat_level);
            }
        }

        self.documents.push(document);
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Current tally for `public_id` (zero if never ingested)
    pub fn tally_for(&self, public_id: &str) -> SeverityTally {
        self.tallies.get(public_id).copied().unwrap_or_default()
    }

    /// Builds the consolidated rows in ingest order
    ///
    /// Sequence numbers start at 1. Components without violations produce no
    /// rows. Calling this repeatedly yields identical output.
    pub fn build_rows(&self) -> Vec<ConsolidatedRow> {
        let mut rows = Vec::new();

        for document in &self.documents {
            let public_id = document.application.public_id();
            let organization_id = document.application.organization_id();
            let tally = self.tally_for(public_id);

            for component in &document.components {
                for violation in &component.violations {
                    let extracted = ViolationExtractor::extract(&violation.constraints);
                    let classification = SeverityClassifier::classify(
                        violation.policy_threat_level,
                        violation.policy_threat_category.as_deref(),
                    );

                    rows.push(ConsolidatedRow {
                        sequence: rows.len() + 1,
                        application: public_id.to_string(),
                        organization: organization_id.to_string(),
                        time: PLACEHOLDER_TIME.to_string(),
                        critical: tally.critical(),
                        severe: tally.severe(),
                        moderate: tally.moderate(),
                        policy: violation.policy_name.clone(),
                        component: component.display_name.clone(),
                        threat: violation.policy_threat_level,
                        policy_action: classification.label,
                        cve: extracted.cve_list(),
                        constraint_name: extracted.constraint_name,
                        condition: extracted.condition,
                    });
                }
            }
        }

        rows
    }
}
