use serde::{Deserialize, Serialize};

/// Output of running a template through the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedTemplate {
    /// Final text with every placeholder substituted.
    pub content: String,
    /// Distinct placeholder paths in order of first appearance.
    pub variables: Vec<String>,
    /// Subset of `variables` that rendered as an empty string.
    pub unresolved: Vec<String>,
}
