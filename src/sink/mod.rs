pub mod logger;
pub mod scalar_writer;
pub mod series_sink;
pub mod text_sink;

pub use logger::{LoggerSet, TrainLogger, DEFAULT_VERBOSE};
pub use scalar_writer::{CsvScalarWriter, MemoryWriter, ScalarWriter, SeriesPoint};
pub use series_sink::{SeriesSink, StepCounters};
pub use text_sink::TextSink;
