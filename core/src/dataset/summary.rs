use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::prelude::{DatasetError, DatasetResult};

/// Columns every summary file must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "radius",
    "numDrones",
    "totalTests",
    "accuracyMean",
    "positionErrorMean",
    "positionErrorStdDev",
    "processingTimeMean",
    "processingTimeStdDev",
    "gunshotAccuracy",
    "ambientAccuracy",
];

/// One aggregated row of the campaign summary: all tests run at a single
/// detection radius.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub radius: f64,
    pub num_drones: u32,
    pub total_tests: u32,
    pub accuracy_mean: f64,
    pub position_error_mean: f64,
    pub position_error_std_dev: f64,
    pub processing_time_mean: f64,
    pub processing_time_std_dev: f64,
    pub gunshot_accuracy: f64,
    pub ambient_accuracy: f64,
}

/// Summary rows held in ascending radius order.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    rows: Vec<SummaryRecord>,
}

impl SummaryTable {
    /// Load and validate a summary CSV. Comment lines starting with `#`
    /// are skipped and surrounding whitespace is trimmed.
    pub fn load(path: &Path) -> DatasetResult<Self> {
        let file = File::open(path).map_err(|e| DatasetError::read(path, e))?;
        let mut reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| DatasetError::parse(path, e))?
            .clone();
        Self::validate_columns(&headers)?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: SummaryRecord = row.map_err(|e| DatasetError::parse(path, e))?;
            records.push(record);
        }
        if records.is_empty() {
            return Err(DatasetError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::from_records(records))
    }

    /// Build a table from in-memory records, sorting by radius. The sort is
    /// stable so duplicate radii keep their input order.
    pub fn from_records(mut records: Vec<SummaryRecord>) -> Self {
        records.sort_by(|a, b| a.radius.total_cmp(&b.radius));
        Self { rows: records }
    }

    fn validate_columns(headers: &StringRecord) -> DatasetResult<()> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !headers.iter().any(|h| h == **name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatasetError::MissingColumns { missing })
        }
    }

    pub fn rows(&self) -> &[SummaryRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extract one metric per row, preserving radius order.
    pub fn metric<F>(&self, select: F) -> Vec<f64>
    where
        F: Fn(&SummaryRecord) -> f64,
    {
        self.rows.iter().map(select).collect()
    }

    pub fn radii(&self) -> Vec<f64> {
        self.metric(|r| r.radius)
    }

    pub fn total_tests(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.total_tests)).sum()
    }
}
