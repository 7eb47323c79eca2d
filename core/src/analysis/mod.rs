pub mod confusion;
pub mod trend;

pub use confusion::ConfusionMatrix;
pub use trend::{TrendCurve, TrendSpacing, MIN_TREND_POINTS};
