pub mod domain;
pub mod error;
pub mod ports;
pub mod progress;
pub mod range;

pub use domain::{
    parse_date, ExerciseFilter, Metric, MetricValue, User, UserCredentials, WeeklyProgress,
    WorkoutRecord, DATE_FORMAT,
};
pub use error::{ProgressError, ProgressResult};
pub use ports::{ExerciseCatalogService, PortError, PortResult, UserRepository, WorkoutStore};
pub use progress::{aggregate_weekly, aggregate_weekly_by_name, week_start};
pub use range::filter_by_date_range;
