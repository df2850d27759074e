/// Report consolidation domain
///
/// Pure business logic that turns raw per-application policy reports into
/// a flat table: models, the severity policy and the extraction and
/// aggregation services. Nothing in here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
