pub mod stats;
pub mod grid;
pub mod streaks;
pub mod fallback;
pub mod aggregator;

pub use aggregator::ContributionAggregator;
pub use fallback::generate_fallback;
pub use grid::{build_contribution_grid, build_grid_from_counts, daily_commit_counts, window_start};
pub use stats::build_repository_stats;
pub use streaks::calculate_streaks;
