mod severity_classifier;

pub use severity_classifier::{Classification, SeverityClassifier};
