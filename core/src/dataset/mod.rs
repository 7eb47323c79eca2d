pub mod detail;
pub mod summary;

pub use detail::{DetailAggregator, DetailRecord, DetailSet, SoundType};
pub use summary::{SummaryRecord, SummaryTable, REQUIRED_COLUMNS};
