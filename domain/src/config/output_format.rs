//! Output format value object

use serde::{Deserialize, Serialize};

/// How results are printed in one-shot mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Whole transcript plus the run report
    Full,
    /// Only the newest exchange (default)
    #[default]
    Latest,
    /// Session as JSON
    Json,
}
