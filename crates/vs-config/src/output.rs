//! Report output settings.

use serde::{Deserialize, Serialize};
use vs_core::ReportVariant;

fn default_file_name() -> String {
    String::from("counts.csv")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// CSV file name used when `-o` is not given.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Report variant used when `--variant` is not given.
    #[serde(default)]
    pub variant: ReportVariant,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            variant: ReportVariant::default(),
        }
    }
}
