pub mod config;
pub mod donor_history;
pub mod engine;
pub mod errors;
pub mod ingest;
pub mod io_utils;
pub mod model;
pub mod quantile;
pub mod report;
pub mod sink;
pub mod stats;
pub mod validator;

pub use config::Percentile;
pub use donor_history::{DonorHistory, Observation};
pub use engine::{AnalyticsEngine, Outcome};
pub use errors::{ConfigError, RecordError};
pub use model::{DonationRecord, DonorKey, DonorReference, GroupKey, RepeatDonorSummary};
pub use quantile::{GroupAggregator, GroupSnapshot};
pub use sink::{LineSink, OutputSink};
