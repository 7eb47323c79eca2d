use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::prelude::{DatasetError, DatasetResult};
use crate::telemetry::{LogManager, MetricsRecorder};

pub const DETAIL_FILE_PREFIX: &str = "detailed_radius_";
pub const DETAIL_FILE_SUFFIX: &str = "km.csv";

/// Ground-truth class of an emitted test sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    Gunshot,
    Ambient,
}

/// One individual test outcome from a per-radius detail file. Columns not
/// needed for classification analysis are ignored on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    #[serde(default)]
    pub radius: Option<f64>,
    pub sound_type: SoundType,
    pub detected_as_gunshot: bool,
    pub success: bool,
}

/// Detail rows pooled across every readable per-radius file, restricted to
/// tests that completed successfully.
#[derive(Debug, Default)]
pub struct DetailSet {
    records: Vec<DetailRecord>,
    rows_discarded: usize,
}

impl DetailSet {
    pub fn records(&self) -> &[DetailRecord] {
        &self.records
    }

    pub fn rows_discarded(&self) -> usize {
        self.rows_discarded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Discovers `detailed_radius_<r>km.csv` files next to the summary and
/// merges their rows. A file that cannot be read or parsed is skipped as a
/// whole and logged; it never aborts the run.
pub struct DetailAggregator {
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl DetailAggregator {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn collect(&self, dir: &Path) -> DetailSet {
        let files = self.discover_detail_files(dir);
        if files.is_empty() {
            self.logger.record_warning(&format!(
                "no detail files found in {}",
                dir.display()
            ));
            return DetailSet::default();
        }

        let mut set = DetailSet::default();
        for path in files {
            match read_detail_file(&path) {
                Ok(rows) => {
                    self.metrics.record_file_read();
                    for row in rows {
                        if row.success {
                            set.records.push(row);
                        } else {
                            set.rows_discarded += 1;
                        }
                    }
                }
                Err(err) => {
                    self.metrics.record_file_skipped();
                    let reason = err
                        .source()
                        .map(|cause| cause.to_string())
                        .unwrap_or_else(|| err.to_string());
                    self.logger
                        .record_warning(&format!("skipping {}: {}", path.display(), reason));
                }
            }
        }
        set
    }

    fn discover_detail_files(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                self.logger
                    .record_warning(&format!("reading {}: {}", dir.display(), err));
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| {
                        name.starts_with(DETAIL_FILE_PREFIX) && name.ends_with(DETAIL_FILE_SUFFIX)
                    })
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    }

    /// Counts of detail files read and skipped so far.
    pub fn file_counts(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }
}

impl Default for DetailAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn read_detail_file(path: &Path) -> DatasetResult<Vec<DetailRecord>> {
    let file = File::open(path).map_err(|e| DatasetError::read(path, e))?;
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let record: DetailRecord = row.map_err(|e| DatasetError::parse(path, e))?;
        rows.push(record);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_HEADER: &str = "testId,radius,numDrones,soundType,realLat,realLon,calcLat,calcLon,detectedAsGunshot,confidence,positionError,processingTime,success";

    fn write_file(dir: &Path, name: &str, lines: &[&str]) {
        let mut file = File::create(dir.join(name)).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn collect_merges_and_filters_successful_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "detailed_radius_1km.csv",
            &[
                FULL_HEADER,
                "t1,1,6,gunshot,0.1,0.2,0.1,0.2,true,0.9,4.2,812,true",
                "t2,1,6,ambient,0.1,0.2,0.1,0.2,false,0.8,3.1,640,true",
                "t3,1,6,gunshot,0.1,0.2,0.0,0.0,false,0.0,0.0,0,false",
            ],
        );
        write_file(
            dir.path(),
            "detailed_radius_2km.csv",
            &[
                FULL_HEADER,
                "t4,2,12,ambient,0.1,0.2,0.1,0.2,true,0.7,5.5,901,true",
            ],
        );
        write_file(dir.path(), "load_test_summary.csv", &["radius", "1.0"]);

        let aggregator = DetailAggregator::new();
        let set = aggregator.collect(dir.path());
        assert_eq!(set.len(), 3);
        assert_eq!(set.rows_discarded(), 1);
        assert_eq!(aggregator.file_counts(), (2, 0));
    }

    #[test]
    fn unreadable_file_is_skipped_whole() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "detailed_radius_1km.csv",
            &[
                FULL_HEADER,
                "t1,1,6,gunshot,0.1,0.2,0.1,0.2,true,0.9,4.2,812,true",
            ],
        );
        write_file(
            dir.path(),
            "detailed_radius_2km.csv",
            &[
                FULL_HEADER,
                "t2,2,12,gunshot,0.1,0.2,0.1,0.2,not-a-bool,0.9,4.2,812,true",
            ],
        );

        let aggregator = DetailAggregator::new();
        let set = aggregator.collect(dir.path());
        assert_eq!(set.len(), 1);
        assert_eq!(aggregator.file_counts(), (1, 1));
    }

    #[test]
    fn file_without_sound_type_column_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "detailed_radius_1km.csv",
            &["testId,detectedAsGunshot,success", "t1,true,true"],
        );

        let aggregator = DetailAggregator::new();
        let set = aggregator.collect(dir.path());
        assert!(set.is_empty());
        assert_eq!(aggregator.file_counts(), (0, 1));
    }

    #[test]
    fn radius_column_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "detailed_radius_1km.csv",
            &[
                "soundType,detectedAsGunshot,success",
                "gunshot,true,true",
            ],
        );

        let set = DetailAggregator::new().collect(dir.path());
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].radius, None);
    }

    #[test]
    fn missing_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = DetailAggregator::new().collect(&dir.path().join("absent"));
        assert!(set.is_empty());
        assert_eq!(set.rows_discarded(), 0);
    }
}
