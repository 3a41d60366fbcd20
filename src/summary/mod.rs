pub mod functions;
pub mod registry;

pub use functions::{summarize_average, summarize_error_rate};
pub use registry::{SummaryFn, SummaryFns, SummaryKind};
