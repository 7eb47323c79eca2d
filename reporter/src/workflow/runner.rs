use std::path::{Path, PathBuf};

use agdcore::analysis::ConfusionMatrix;
use agdcore::dataset::{DetailAggregator, SummaryTable};
use anyhow::Context;
use log::{info, warn};

use crate::charts;
use crate::workflow::config::ReportConfig;

pub const ACCURACY_CHART: &str = "accuracy_by_radius.png";
pub const POSITION_ERROR_CHART: &str = "position_error_by_radius.png";
pub const PROCESSING_TIME_CHART: &str = "processing_time_by_radius.png";
pub const DASHBOARD_CHART: &str = "dashboard_metrics.png";
pub const CONFUSION_CHART: &str = "confusion_matrix.png";

pub struct ReportOutcome {
    pub table: SummaryTable,
    pub matrix: Option<ConfusionMatrix>,
    pub artifacts: Vec<PathBuf>,
}

pub struct Runner {
    config: ReportConfig,
}

impl Runner {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Load the summary, pool any detail files found next to it, and write
    /// every chart into the summary's directory.
    pub fn execute(&self, summary_path: &Path) -> anyhow::Result<ReportOutcome> {
        let table = SummaryTable::load(summary_path)
            .with_context(|| format!("loading summary {}", summary_path.display()))?;
        let out_dir = match summary_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        info!(
            "loaded {} radii ({} tests) from {}",
            table.len(),
            table.total_tests(),
            summary_path.display()
        );

        let aggregator = DetailAggregator::new();
        let details = aggregator.collect(&out_dir);
        let (files_read, files_skipped) = aggregator.file_counts();
        info!(
            "detail files: {} read, {} skipped; {} successful rows, {} discarded",
            files_read,
            files_skipped,
            details.len(),
            details.rows_discarded()
        );

        let matrix = if details.is_empty() {
            warn!("no successful detail rows; skipping the classification chart");
            None
        } else {
            Some(ConfusionMatrix::from_outcomes(details.records()))
        };

        let style = &self.config.style;
        let mut artifacts = Vec::new();

        let path = out_dir.join(ACCURACY_CHART);
        charts::render_accuracy_chart(&table, style, &path)
            .with_context(|| format!("rendering {}", path.display()))?;
        artifacts.push(path);

        let path = out_dir.join(POSITION_ERROR_CHART);
        charts::render_position_error_chart(&table, style, &path)
            .with_context(|| format!("rendering {}", path.display()))?;
        artifacts.push(path);

        let path = out_dir.join(PROCESSING_TIME_CHART);
        charts::render_processing_time_chart(&table, style, &path)
            .with_context(|| format!("rendering {}", path.display()))?;
        artifacts.push(path);

        let path = out_dir.join(DASHBOARD_CHART);
        charts::render_dashboard(&table, style, &path)
            .with_context(|| format!("rendering {}", path.display()))?;
        artifacts.push(path);

        if let Some(matrix) = &matrix {
            let path = out_dir.join(CONFUSION_CHART);
            charts::render_confusion_chart(matrix, style, &path)
                .with_context(|| format!("rendering {}", path.display()))?;
            artifacts.push(path);
        }

        Ok(ReportOutcome {
            table,
            matrix,
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    const SUMMARY_HEADER: &str = "radius,numDrones,totalTests,accuracyMean,positionErrorMean,positionErrorStdDev,processingTimeMean,processingTimeStdDev,gunshotAccuracy,ambientAccuracy";
    const DETAIL_HEADER: &str = "testId,radius,numDrones,soundType,realLat,realLon,calcLat,calcLon,detectedAsGunshot,confidence,positionError,processingTime,success";

    fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn write_summary(dir: &Path) -> PathBuf {
        write_file(
            dir,
            "load_test_summary.csv",
            &[
                SUMMARY_HEADER,
                "1.0,6,50,95.0,5.0,1.0,800.0,90.0,96.0,94.0",
                "2.0,12,50,90.0,10.0,2.0,900.0,100.0,92.0,88.0",
                "3.0,18,50,85.0,15.0,3.0,1000.0,110.0,87.0,83.0",
            ],
        )
    }

    fn small_style() -> ReportConfig {
        let mut config = ReportConfig::default();
        config.style.width = 480;
        config.style.height = 360;
        config.style.dashboard_width = 520;
        config.style.dashboard_height = 660;
        config
    }

    #[test]
    fn execute_writes_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_summary(dir.path());
        write_file(
            dir.path(),
            "detailed_radius_1km.csv",
            &[
                DETAIL_HEADER,
                "t1,1,6,gunshot,0.1,0.2,0.1,0.2,true,0.9,4.2,812,true",
                "t2,1,6,gunshot,0.1,0.2,0.1,0.2,false,0.4,9.9,780,true",
                "t3,1,6,ambient,0.1,0.2,0.1,0.2,false,0.8,3.1,640,true",
            ],
        );
        write_file(
            dir.path(),
            "detailed_radius_2km.csv",
            &[
                DETAIL_HEADER,
                "t4,2,12,gunshot,0.1,0.2,0.1,0.2,true,0.9,5.0,850,true",
                "t5,2,12,ambient,0.1,0.2,0.0,0.0,false,0.0,0.0,0,false",
            ],
        );

        let runner = Runner::new(small_style());
        let outcome = runner.execute(&summary).unwrap();

        assert_eq!(outcome.artifacts.len(), 5);
        for artifact in &outcome.artifacts {
            assert!(artifact.is_file(), "missing {}", artifact.display());
            assert!(std::fs::metadata(artifact).unwrap().len() > 0);
        }
        let matrix = outcome.matrix.unwrap();
        assert_eq!(matrix.true_positives, 2);
        assert_eq!(matrix.false_negatives, 1);
        assert_eq!(matrix.true_negatives, 1);
        assert_eq!(matrix.false_positives, 0);
        // Five detail rows on disk, one of them failed.
        assert_eq!(matrix.total(), 4);
    }

    #[test]
    fn execute_is_idempotent_over_reruns() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_summary(dir.path());
        write_file(
            dir.path(),
            "detailed_radius_1km.csv",
            &[
                DETAIL_HEADER,
                "t1,1,6,gunshot,0.1,0.2,0.1,0.2,true,0.9,4.2,812,true",
                "t2,1,6,ambient,0.1,0.2,0.1,0.2,false,0.8,3.1,640,true",
            ],
        );
        let runner = Runner::new(small_style());
        let first = runner.execute(&summary).unwrap();
        let second = runner.execute(&summary).unwrap();
        assert_eq!(first.matrix, second.matrix);
        assert_eq!(second.artifacts.len(), 5);
    }

    #[test]
    fn execute_without_detail_files_skips_confusion_chart() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_summary(dir.path());
        let runner = Runner::new(small_style());
        let outcome = runner.execute(&summary).unwrap();

        assert!(outcome.matrix.is_none());
        assert_eq!(outcome.artifacts.len(), 4);
        assert!(!dir.path().join(CONFUSION_CHART).exists());
        assert!(dir.path().join(DASHBOARD_CHART).exists());
    }

    #[test]
    fn execute_fails_on_missing_summary() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Runner::new(ReportConfig::default());
        assert!(runner.execute(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn execute_writes_nothing_when_a_column_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let header = SUMMARY_HEADER.replace(",ambientAccuracy", "");
        let summary = write_file(
            dir.path(),
            "load_test_summary.csv",
            &[&header, "1.0,6,50,95.0,5.0,1.0,800.0,90.0,96.0"],
        );

        let runner = Runner::new(small_style());
        assert!(runner.execute(&summary).is_err());

        let pngs = std::fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "png"))
            .count();
        assert_eq!(pngs, 0);
    }
}
