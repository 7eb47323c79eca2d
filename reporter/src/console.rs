use std::io::{self, Write};

use agdcore::analysis::ConfusionMatrix;
use agdcore::dataset::SummaryTable;
use agdcore::math::StatsHelper;

const RULE: &str = "============================================================";

/// Write the statistical summary block. The table is already in ascending
/// radius order, so first and last rows are the extremes.
pub fn write_summary<W: Write>(
    out: &mut W,
    table: &SummaryTable,
    matrix: Option<&ConfusionMatrix>,
) -> io::Result<()> {
    let rows = table.rows();

    writeln!(out, "{}", RULE)?;
    writeln!(out, "Load test statistical summary")?;
    writeln!(out, "{}", RULE)?;

    writeln!(out)?;
    writeln!(out, "Radii tested: {}", rows.len())?;
    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        writeln!(
            out,
            "  Smallest: {:.1} km ({} drones)",
            first.radius, first.num_drones
        )?;
        writeln!(
            out,
            "  Largest:  {:.1} km ({} drones)",
            last.radius, last.num_drones
        )?;
    }

    let overall = table.metric(|r| r.accuracy_mean);
    let gunshot = table.metric(|r| r.gunshot_accuracy);
    let ambient = table.metric(|r| r.ambient_accuracy);
    writeln!(out)?;
    writeln!(out, "Accuracy:")?;
    writeln!(
        out,
        "  Overall: {:.2}% (+/- {:.2}%)",
        StatsHelper::mean(&overall),
        StatsHelper::std_dev(&overall)
    )?;
    writeln!(
        out,
        "  Gunshot: {:.2}% (+/- {:.2}%)",
        StatsHelper::mean(&gunshot),
        StatsHelper::std_dev(&gunshot)
    )?;
    writeln!(
        out,
        "  Ambient: {:.2}% (+/- {:.2}%)",
        StatsHelper::mean(&ambient),
        StatsHelper::std_dev(&ambient)
    )?;

    let errors = table.metric(|r| r.position_error_mean);
    writeln!(out)?;
    writeln!(out, "Position error:")?;
    writeln!(out, "  Mean: {:.2} m", StatsHelper::mean(&errors))?;
    writeln!(out, "  Min:  {:.2} m", StatsHelper::min(&errors))?;
    writeln!(out, "  Max:  {:.2} m", StatsHelper::max(&errors))?;

    let times = table.metric(|r| r.processing_time_mean / 1000.0);
    writeln!(out)?;
    writeln!(out, "Processing time:")?;
    writeln!(out, "  Mean: {:.2} s", StatsHelper::mean(&times))?;
    writeln!(out, "  Min:  {:.2} s", StatsHelper::min(&times))?;
    writeln!(out, "  Max:  {:.2} s", StatsHelper::max(&times))?;

    writeln!(out)?;
    writeln!(out, "Total tests: {}", table.total_tests())?;

    if let Some(matrix) = matrix {
        writeln!(out)?;
        writeln!(out, "Classification (pooled successful tests):")?;
        writeln!(
            out,
            "  TP {}  FN {}  FP {}  TN {}",
            matrix.true_positives,
            matrix.false_negatives,
            matrix.false_positives,
            matrix.true_negatives
        )?;
        writeln!(out, "  Accuracy:  {:.2}%", matrix.accuracy())?;
        writeln!(out, "  Precision: {:.2}%", matrix.precision())?;
        writeln!(out, "  Recall:    {:.2}%", matrix.recall())?;
        writeln!(out, "  F1 score:  {:.2}%", matrix.f1())?;
        writeln!(out, "  Samples:   {}", matrix.total())?;
    }

    writeln!(out, "{}", RULE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agdcore::dataset::SummaryRecord;

    fn record(radius: f64, num_drones: u32) -> SummaryRecord {
        SummaryRecord {
            radius,
            num_drones,
            total_tests: 50,
            accuracy_mean: 90.0,
            position_error_mean: 10.0,
            position_error_std_dev: 2.0,
            processing_time_mean: 1500.0,
            processing_time_std_dev: 100.0,
            gunshot_accuracy: 92.0,
            ambient_accuracy: 88.0,
        }
    }

    #[test]
    fn summary_reports_extremes_and_unit_conversions() {
        let table = SummaryTable::from_records(vec![record(3.0, 18), record(1.0, 6)]);
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &table, None).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Radii tested: 2"));
        assert!(text.contains("Smallest: 1.0 km (6 drones)"));
        assert!(text.contains("Largest:  3.0 km (18 drones)"));
        assert!(text.contains("Mean: 1.50 s"));
        assert!(text.contains("Total tests: 100"));
        assert!(!text.contains("Classification"));
    }

    #[test]
    fn summary_includes_classification_block_when_present() {
        let table = SummaryTable::from_records(vec![record(1.0, 6)]);
        let matrix = ConfusionMatrix {
            true_positives: 5,
            false_negatives: 2,
            false_positives: 1,
            true_negatives: 4,
        };
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &table, Some(&matrix)).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("TP 5  FN 2  FP 1  TN 4"));
        assert!(text.contains("Accuracy:  75.00%"));
        assert!(text.contains("Precision: 83.33%"));
        assert!(text.contains("Recall:    71.43%"));
        assert!(text.contains("F1 score:  76.92%"));
        assert!(text.contains("Samples:   12"));
    }
}
