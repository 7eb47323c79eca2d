use agdcore::analysis::TrendSpacing;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Visual parameters shared by every chart. All fields have defaults, so a
/// style file only needs to name what it overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub dashboard_width: u32,
    pub dashboard_height: u32,
    pub overall_color: [u8; 3],
    pub gunshot_color: [u8; 3],
    pub ambient_color: [u8; 3],
    pub accent_color: [u8; 3],
    pub accuracy_target: f64,
    /// Bar value labels are drawn only when the table has at most this
    /// many rows.
    pub annotate_limit: usize,
    pub trend_samples: usize,
    pub trend_spacing: TrendSpacing,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            dashboard_width: 1600,
            dashboard_height: 1300,
            overall_color: [0x2c, 0x5f, 0x8d],
            gunshot_color: [0xc4, 0x45, 0x36],
            ambient_color: [0x3a, 0x7d, 0x44],
            accent_color: [0xc4, 0x45, 0x36],
            accuracy_target: 90.0,
            annotate_limit: 8,
            trend_samples: 100,
            trend_spacing: TrendSpacing::default(),
        }
    }
}

impl ChartStyle {
    pub fn overall(&self) -> RGBColor {
        rgb(self.overall_color)
    }

    pub fn gunshot(&self) -> RGBColor {
        rgb(self.gunshot_color)
    }

    pub fn ambient(&self) -> RGBColor {
        rgb(self.ambient_color)
    }

    pub fn accent(&self) -> RGBColor {
        rgb(self.accent_color)
    }
}

fn rgb(channels: [u8; 3]) -> RGBColor {
    RGBColor(channels[0], channels[1], channels[2])
}
