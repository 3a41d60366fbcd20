pub mod bundle;
pub mod phase;
pub mod value;

pub use bundle::{EpochStats, PhaseStats, StatsBundle};
pub use phase::Phase;
pub use value::{Sample, StatValue};
