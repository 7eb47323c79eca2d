pub mod confusion;
pub mod radius;
pub mod style;

pub use confusion::render_confusion_chart;
pub use radius::{
    render_accuracy_chart, render_dashboard, render_position_error_chart,
    render_processing_time_chart,
};
pub use style::ChartStyle;
