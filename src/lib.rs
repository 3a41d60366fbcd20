pub mod config;
pub mod edit_distance;
pub mod error;
pub mod logging;
pub mod sink;
pub mod stats;
pub mod summary;

// Convenience re-exports
pub use config::LoggerConfig;
pub use edit_distance::{wer_summary, EditRecord, WerSummary};
pub use error::{ErrorKind, LogError, Result};
pub use logging::init_logging;
pub use sink::{LoggerSet, MemoryWriter, ScalarWriter, SeriesSink, TextSink, TrainLogger};
pub use stats::{EpochStats, Phase, PhaseStats, Sample, StatValue};
pub use summary::{summarize_average, summarize_error_rate, SummaryFns, SummaryKind};
