use std::fmt;

/// Severity bucket derived from a policy threat level
///
/// Thresholds are inclusive lower bounds:
/// - Critical: 7 and above
/// - Severe: 4 to 6
/// - Moderate: 1 to 3
/// - Low: below 1 (never tallied)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeverityBucket {
    Low,
    Moderate,
    Severe,
    Critical,
}

impl SeverityBucket {
    pub fn from_threat_level(threat_level: i32) -> Self {
        match threat_level {
            t if t >= 7 => SeverityBucket::Critical,
            t if t >= 4 => SeverityBucket::Severe,
            t if t >= 1 => SeverityBucket::Moderate,
            _ => SeverityBucket::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityBucket::Critical => "Critical",
            SeverityBucket::Severe => "Severe",
            SeverityBucket::Moderate => "Moderate",
            SeverityBucket::Low => "Low",
        }
    }
}

impl fmt::Display for SeverityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-application violation totals by bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityTally {
    critical: u32,
    severe: u32,
    moderate: u32,
}

impl SeverityTally {
    pub fn new(critical: u32, severe: u32, moderate: u32) -> Self {
        Self {
            critical,
            severe,
            moderate,
        }
    }

    /// Counts one violation at `threat_level`; levels below 1 are ignored
    pub fn record(&mut self, threat_level: i32) {
        match SeverityBucket::from_threat_level(threat_level) {
            SeverityBucket::Critical => self.critical += 1,
            SeverityBucket::Severe => self.severe += 1,
            SeverityBucket::Moderate => self.moderate += 1,
            SeverityBucket::Low => {}
        }
    }

    pub fn critical(&self) -> u32 {
        self.critical
    }

    pub fn severe(&self) -> u32 {
        self.severe
    }

    pub fn moderate(&self) -> u32 {
        self.moderate
    }
}
