use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::charts::ChartStyle;

/// Reporter configuration loaded from YAML. Today this is only the chart
/// style; anything not named in the file keeps its default.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub style: ChartStyle,
}

impl ReportConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading style config {}", path_ref.display()))?;
        let config: ReportConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing style config {}", path_ref.display()))?;
        Ok(config)
    }
}
