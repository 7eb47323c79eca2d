use std::path::Path;

use agdcore::analysis::{TrendCurve, TrendSpacing};
use agdcore::dataset::SummaryTable;
use plotters::coord::Shift;
use plotters::element::ErrorBar;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::charts::style::ChartStyle;

const X_DESC: &str = "Operating radius (km) and drone count";
const GREY: RGBColor = RGBColor(0x66, 0x66, 0x66);

/// One single-metric bar panel: values per radius, optional error bars,
/// optional quadratic trend overlay.
struct MetricPanel<'a> {
    caption: &'a str,
    y_desc: &'a str,
    unit: &'a str,
    values: Vec<f64>,
    std_devs: Option<Vec<f64>>,
    color: RGBColor,
    y_max: Option<f64>,
    trend: Option<TrendCurve>,
    annotate: bool,
    precision: usize,
}

/// Grouped overall/gunshot/ambient accuracy bars with the target line.
pub fn render_accuracy_chart(
    table: &SummaryTable,
    style: &ChartStyle,
    path: &Path,
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_accuracy_panel(
        &root,
        table,
        style,
        "Acoustic detection performance by operating radius",
        true,
    )?;
    root.present()?;
    Ok(())
}

/// Triangulation error bars with +/- one standard deviation whiskers.
pub fn render_position_error_chart(
    table: &SummaryTable,
    style: &ChartStyle,
    path: &Path,
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let panel = position_error_panel(
        table,
        style,
        "Triangulation precision by operating radius",
        true,
    );
    draw_metric_panel(&root, table, style, &panel)?;
    root.present()?;
    Ok(())
}

/// Processing time converted from milliseconds to seconds.
pub fn render_processing_time_chart(
    table: &SummaryTable,
    style: &ChartStyle,
    path: &Path,
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let panel = processing_time_panel(
        table,
        style,
        "Processing time by operating radius",
        true,
    );
    draw_metric_panel(&root, table, style, &panel)?;
    root.present()?;
    Ok(())
}

/// All three metric panels stacked on one canvas, without bar labels.
pub fn render_dashboard(
    table: &SummaryTable,
    style: &ChartStyle,
    path: &Path,
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (style.dashboard_width, style.dashboard_height))
        .into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled("Load test metrics overview", ("sans-serif", 28))?;
    let panels = titled.split_evenly((3, 1));

    draw_accuracy_panel(
        &panels[0],
        table,
        style,
        "(a) Accuracy by operating radius",
        false,
    )?;
    let error_panel = position_error_panel(
        table,
        style,
        "(b) Position error by operating radius",
        false,
    );
    draw_metric_panel(&panels[1], table, style, &error_panel)?;
    let time_panel = processing_time_panel(
        table,
        style,
        "(c) Processing time by operating radius",
        false,
    );
    draw_metric_panel(&panels[2], table, style, &time_panel)?;

    root.present()?;
    Ok(())
}

fn position_error_panel<'a>(
    table: &SummaryTable,
    style: &ChartStyle,
    caption: &'a str,
    annotate: bool,
) -> MetricPanel<'a> {
    let values = table.metric(|r| r.position_error_mean);
    MetricPanel {
        caption,
        y_desc: "Position error (m)",
        unit: "m",
        trend: TrendCurve::fit_spaced(&values, &table.radii(), style.trend_spacing),
        values,
        std_devs: Some(table.metric(|r| r.position_error_std_dev)),
        color: style.overall(),
        y_max: None,
        annotate,
        precision: 1,
    }
}

fn processing_time_panel<'a>(
    table: &SummaryTable,
    style: &ChartStyle,
    caption: &'a str,
    annotate: bool,
) -> MetricPanel<'a> {
    let values = table.metric(|r| r.processing_time_mean / 1000.0);
    MetricPanel {
        caption,
        y_desc: "Processing time (s)",
        unit: "s",
        trend: TrendCurve::fit_spaced(&values, &table.radii(), style.trend_spacing),
        values,
        std_devs: Some(table.metric(|r| r.processing_time_std_dev / 1000.0)),
        color: style.ambient(),
        y_max: None,
        annotate,
        precision: 2,
    }
}

fn draw_accuracy_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    table: &SummaryTable,
    style: &ChartStyle,
    caption: &str,
    annotate: bool,
) -> anyhow::Result<()> {
    let count = table.len();
    let labels = axis_labels(table);
    let x_max = count as f64 - 0.4;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(58)
        .build_cartesian_2d(-0.6..x_max, 0.0..105.0)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.12))
        .light_line_style(TRANSPARENT)
        .x_labels(count.max(2))
        .x_label_formatter(&|x| index_label(*x, &labels))
        .x_desc(X_DESC)
        .y_desc("Accuracy (%)")
        .label_style(("sans-serif", 13))
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let groups = [
        ("Overall accuracy", style.overall(), table.metric(|r| r.accuracy_mean), -1i32),
        ("Gunshot accuracy", style.gunshot(), table.metric(|r| r.gunshot_accuracy), 0),
        ("Ambient accuracy", style.ambient(), table.metric(|r| r.ambient_accuracy), 1),
    ];
    let width = 0.26;

    for (name, color, values, slot) in groups.iter() {
        let color = *color;
        let offset = f64::from(*slot) * width;
        chart
            .draw_series(values.iter().enumerate().map(|(i, &v)| {
                let x = i as f64 + offset;
                Rectangle::new(
                    [(x - width / 2.0, 0.0), (x + width / 2.0, v)],
                    color.mix(0.85).filled(),
                )
            }))?
            .label(*name)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.mix(0.85).filled())
            });
        chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
            let x = i as f64 + offset;
            Rectangle::new(
                [(x - width / 2.0, 0.0), (x + width / 2.0, v)],
                BLACK.stroke_width(1),
            )
        }))?;

        if annotate && count <= style.annotate_limit {
            chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
                Text::new(
                    format!("{:.1}", v),
                    (i as f64 + offset, v + 1.2),
                    TextStyle::from(("sans-serif", 12).into_font())
                        .pos(Pos::new(HPos::Center, VPos::Bottom)),
                )
            }))?;
        }
    }

    let target = style.accuracy_target;
    chart.draw_series(DashedLineSeries::new(
        vec![(-0.6, target), (x_max, target)],
        3,
        4,
        GREY.mix(0.8).stroke_width(2),
    ))?;
    chart.draw_series(std::iter::once(Text::new(
        format!("Target: {:.0}%", target),
        (x_max - 0.1, target + 1.5),
        ("sans-serif", 13)
            .into_font()
            .color(&GREY)
            .pos(Pos::new(HPos::Right, VPos::Bottom)),
    )))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(WHITE.mix(0.7))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 13))
        .draw()?;
    Ok(())
}

fn draw_metric_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    table: &SummaryTable,
    style: &ChartStyle,
    panel: &MetricPanel<'_>,
) -> anyhow::Result<()> {
    let count = panel.values.len();
    let labels = axis_labels(table);
    let x_max = count as f64 - 0.4;

    let y_max = panel.y_max.unwrap_or_else(|| {
        let top = panel
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| v + panel.std_devs.as_ref().map_or(0.0, |s| s[i]))
            .fold(0.0_f64, f64::max);
        if top > 0.0 {
            top * 1.15
        } else {
            1.0
        }
    });

    let mut chart = ChartBuilder::on(area)
        .caption(panel.caption, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(58)
        .build_cartesian_2d(-0.6..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.12))
        .light_line_style(TRANSPARENT)
        .x_labels(count.max(2))
        .x_label_formatter(&|x| index_label(*x, &labels))
        .x_desc(X_DESC)
        .y_desc(panel.y_desc)
        .label_style(("sans-serif", 13))
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let bar_width = 0.38;
    chart.draw_series(panel.values.iter().enumerate().map(|(i, &v)| {
        let x = i as f64;
        Rectangle::new(
            [(x - bar_width, 0.0), (x + bar_width, v)],
            panel.color.mix(0.85).filled(),
        )
    }))?;
    chart.draw_series(panel.values.iter().enumerate().map(|(i, &v)| {
        let x = i as f64;
        Rectangle::new(
            [(x - bar_width, 0.0), (x + bar_width, v)],
            darken(panel.color).stroke_width(1),
        )
    }))?;

    if let Some(stds) = &panel.std_devs {
        let whisker = darken(panel.color);
        chart.draw_series(panel.values.iter().zip(stds).enumerate().map(
            |(i, (&v, &s))| {
                ErrorBar::new_vertical(i as f64, v - s, v, v + s, whisker.stroke_width(2), 12)
            },
        ))?;
        chart.draw_series(std::iter::once(Text::new(
            "Error bars: +/- 1 standard deviation".to_string(),
            (x_max - 0.1, y_max * 0.03),
            ("sans-serif", 12)
                .into_font()
                .color(&GREY)
                .pos(Pos::new(HPos::Right, VPos::Bottom)),
        )))?;
    }

    if let Some(curve) = &panel.trend {
        let accent = style.accent();
        let points = trend_overlay(curve, table, style);
        if !points.is_empty() {
            chart
                .draw_series(DashedLineSeries::new(
                    points,
                    8,
                    5,
                    accent.mix(0.8).stroke_width(2),
                ))?
                .label("Quadratic trend")
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 22, y)], accent.stroke_width(2))
                });
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.7))
                .border_style(BLACK.mix(0.3))
                .label_font(("sans-serif", 13))
                .draw()?;
        }
    }

    if panel.annotate && count <= style.annotate_limit {
        let delta = y_max * 0.015;
        match &panel.std_devs {
            Some(stds) => {
                chart.draw_series(panel.values.iter().zip(stds).enumerate().map(
                    |(i, (&v, &s))| {
                        Text::new(
                            format!("{:.prec$}{}", v, panel.unit, prec = panel.precision),
                            (i as f64, v + s + delta),
                            TextStyle::from(("sans-serif", 13).into_font())
                                .pos(Pos::new(HPos::Center, VPos::Bottom)),
                        )
                    },
                ))?;
                chart.draw_series(panel.values.iter().zip(stds).enumerate().map(
                    |(i, (&v, &s))| {
                        Text::new(
                            format!("+/-{:.prec$}", s, prec = panel.precision),
                            (i as f64, v + s - delta),
                            ("sans-serif", 12)
                                .into_font()
                                .color(&GREY)
                                .pos(Pos::new(HPos::Center, VPos::Top)),
                        )
                    },
                ))?;
            }
            None => {
                chart.draw_series(panel.values.iter().enumerate().map(|(i, &v)| {
                    Text::new(
                        format!("{:.prec$}{}", v, panel.unit, prec = panel.precision),
                        (i as f64, v + delta),
                        TextStyle::from(("sans-serif", 13).into_font())
                            .pos(Pos::new(HPos::Center, VPos::Bottom)),
                    )
                }))?;
            }
        }
    }

    Ok(())
}

/// Map the fitted curve into chart coordinates. Index spacing samples the
/// curve directly; radius spacing walks the bar positions and evaluates the
/// curve at the interpolated physical radius.
fn trend_overlay(curve: &TrendCurve, table: &SummaryTable, style: &ChartStyle) -> Vec<(f64, f64)> {
    let count = table.len();
    if count < 2 || style.trend_samples == 0 {
        return Vec::new();
    }
    match style.trend_spacing {
        TrendSpacing::Index => curve.sample(0.0, (count - 1) as f64, style.trend_samples),
        TrendSpacing::Radius => {
            let radii = table.radii();
            let samples = style.trend_samples.max(2);
            let span = (count - 1) as f64;
            (0..samples)
                .map(|i| {
                    let t = span * i as f64 / (samples - 1) as f64;
                    let lower = (t.floor() as usize).min(count - 2);
                    let frac = t - lower as f64;
                    let radius = radii[lower] + (radii[lower + 1] - radii[lower]) * frac;
                    (t, curve.evaluate(radius))
                })
                .collect()
        }
    }
}

fn axis_labels(table: &SummaryTable) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|r| format!("{:.1} km / {} drones", r.radius, r.num_drones))
        .collect()
}

/// Bars sit at integer positions; any tick plotters places elsewhere gets
/// an empty label.
fn index_label(x: f64, labels: &[String]) -> String {
    let idx = x.round();
    if (x - idx).abs() > 0.01 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn darken(color: RGBColor) -> RGBColor {
    RGBColor(color.0 / 2, color.1 / 2, color.2 / 2)
}
