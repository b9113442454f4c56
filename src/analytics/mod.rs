//! Derived dashboard views: aggregate statistics and the merged
//! recent-activity feed. All pure reductions over fetched collections.

pub mod activity;
pub mod dates;
pub mod statistics;

pub use activity::{merge_activity, ActivityEvent, ActivityKind};
pub use statistics::{build_statistics, AgeBucket, StatisticsSummary, AGE_GROUPS};
