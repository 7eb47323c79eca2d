use std::path::Path;

use agdcore::analysis::ConfusionMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::charts::style::ChartStyle;

const GREY: RGBColor = RGBColor(0x66, 0x66, 0x66);

fn anchored(size: i32, pos: Pos) -> TextStyle<'static> {
    TextStyle::from(("sans-serif", size).into_font()).pos(pos)
}

/// Render the pooled 2x2 classification grid: actual class by row,
/// predicted class by column, cell intensity scaled by its share of the
/// total. Drawn directly in pixel coordinates on a square canvas.
pub fn render_confusion_chart(
    matrix: &ConfusionMatrix,
    style: &ChartStyle,
    path: &Path,
) -> anyhow::Result<()> {
    let side = style.height.max(320);
    let root = BitMapBackend::new(path, (side, side)).into_drawing_area();
    root.fill(&WHITE)?;

    let side = side as i32;
    let left = side * 22 / 100;
    let top = side * 18 / 100;
    let right = side - side * 6 / 100;
    let bottom = side - side * 14 / 100;
    let cell_w = (right - left) / 2;
    let cell_h = (bottom - top) / 2;
    let center = Pos::new(HPos::Center, VPos::Center);

    root.draw(&Text::new(
        "Classification outcomes (pooled successful tests)".to_string(),
        (side / 2, side * 5 / 100),
        anchored(20, center),
    ))?;

    for (label, col) in [("Predicted: gunshot", 0), ("Predicted: ambient", 1)] {
        root.draw(&Text::new(
            label.to_string(),
            (left + cell_w / 2 + col * cell_w, top - 12),
            anchored(15, Pos::new(HPos::Center, VPos::Bottom)),
        ))?;
    }
    for (label, row) in [("Actual: gunshot", 0), ("Actual: ambient", 1)] {
        root.draw(&Text::new(
            label.to_string(),
            (left - 12, top + cell_h / 2 + row * cell_h),
            anchored(15, Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    let total = matrix.total();
    let cells = [
        (matrix.true_positives, "True positives", 0, 0, style.ambient()),
        (matrix.false_negatives, "False negatives", 1, 0, style.gunshot()),
        (matrix.false_positives, "False positives", 0, 1, style.gunshot()),
        (matrix.true_negatives, "True negatives", 1, 1, style.ambient()),
    ];
    for (value, name, col, row, color) in cells {
        let x0 = left + col * cell_w;
        let y0 = top + row * cell_h;
        let share = if total > 0 {
            value as f64 / total as f64
        } else {
            0.0
        };
        root.draw(&Rectangle::new(
            [(x0, y0), (x0 + cell_w, y0 + cell_h)],
            color.mix(0.2 + 0.7 * share).filled(),
        ))?;
        root.draw(&Rectangle::new(
            [(x0, y0), (x0 + cell_w, y0 + cell_h)],
            BLACK.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            format!("{}", value),
            (x0 + cell_w / 2, y0 + cell_h / 2 - 12),
            anchored(34, center),
        ))?;
        root.draw(&Text::new(
            name.to_string(),
            (x0 + cell_w / 2, y0 + cell_h / 2 + 16),
            anchored(15, center).color(&GREY),
        ))?;
    }

    root.draw(&Text::new(
        format!(
            "Accuracy {:.2}%   Precision {:.2}%   Recall {:.2}%   F1 {:.2}%   (n = {})",
            matrix.accuracy(),
            matrix.precision(),
            matrix.recall(),
            matrix.f1(),
            total,
        ),
        (side / 2, bottom + (side - bottom) / 2),
        anchored(15, center),
    ))?;

    root.present()?;
    Ok(())
}
