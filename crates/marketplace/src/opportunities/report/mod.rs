mod summary;
pub mod views;

pub use summary::{aggregate, score_statistics, ReportCardSummary, ScoreStatistics};
pub use views::ReportCard;
