pub mod alignment;
pub mod summary;

pub use alignment::EditRecord;
pub use summary::{wer_summary, WerSummary};
