use crate::error::Result;
use crate::stats::{EpochStats, Phase, PhaseStats};

/// `verbose` value used by `TrainLogger::log_epoch`.
pub const DEFAULT_VERBOSE: bool = false;

/// A destination for per-epoch training statistics.
///
/// Called once per epoch with the epoch-level metadata and, for each of the
/// train/valid/test phases, either the raw samples collected during that
/// phase or `None` to skip it. `verbose` asks for an extra console echo; each
/// implementation decides what that means (or ignores it).
pub trait TrainLogger: Send {
    fn log_stats(
        &mut self,
        epoch_stats: &EpochStats,
        train_stats: Option<&PhaseStats>,
        valid_stats: Option<&PhaseStats>,
        test_stats: Option<&PhaseStats>,
        verbose: bool,
    ) -> Result<()>;

    /// `log_stats` with `DEFAULT_VERBOSE`.
    fn log_epoch(
        &mut self,
        epoch_stats: &EpochStats,
        train_stats: Option<&PhaseStats>,
        valid_stats: Option<&PhaseStats>,
        test_stats: Option<&PhaseStats>,
    ) -> Result<()> {
        self.log_stats(epoch_stats, train_stats, valid_stats, test_stats, DEFAULT_VERBOSE)
    }
}

/// Pairs each phase with its bundle, in train/valid/test order.
pub(crate) fn phase_bundles<'a>(
    train_stats: Option<&'a PhaseStats>,
    valid_stats: Option<&'a PhaseStats>,
    test_stats: Option<&'a PhaseStats>,
) -> [(Phase, Option<&'a PhaseStats>); 3] {
    [
        (Phase::Train, train_stats),
        (Phase::Valid, valid_stats),
        (Phase::Test, test_stats),
    ]
}

/// Forwards every call to a list of loggers, in the order they were added.
///
/// Stops at the first logger that fails; later loggers do not see that call.
#[derive(Default)]
pub struct LoggerSet {
    loggers: Vec<Box<dyn TrainLogger>>,
}

impl LoggerSet {
    pub fn new() -> Self {
        LoggerSet { loggers: Vec::new() }
    }

    pub fn push(&mut self, logger: Box<dyn TrainLogger>) {
        self.loggers.push(logger);
    }

    pub fn with(mut self, logger: impl TrainLogger + 'static) -> Self {
        self.push(Box::new(logger));
        self
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl TrainLogger for LoggerSet {
    fn log_stats(
        &mut self,
        epoch_stats: &EpochStats,
        train_stats: Option<&PhaseStats>,
        valid_stats: Option<&PhaseStats>,
        test_stats: Option<&PhaseStats>,
        verbose: bool,
    ) -> Result<()> {
        for logger in &mut self.loggers {
            logger.log_stats(epoch_stats, train_stats, valid_stats, test_stats, verbose)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;
    use std::sync::{Arc, Mutex};

    /// Records the `verbose` flag of every call it receives.
    struct Probe {
        calls: Arc<Mutex<Vec<bool>>>,
        fail: bool,
    }

    impl TrainLogger for Probe {
        fn log_stats(
            &mut self,
            _epoch_stats: &EpochStats,
            _train_stats: Option<&PhaseStats>,
            _valid_stats: Option<&PhaseStats>,
            _test_stats: Option<&PhaseStats>,
            verbose: bool,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(verbose);
            if self.fail {
                return Err(LogError::EmptySamples);
            }
            Ok(())
        }
    }

    #[test]
    fn log_epoch_uses_default_verbose() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut probe = Probe { calls: Arc::clone(&calls), fail: false };
        probe.log_epoch(&EpochStats::new(), None, None, None).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![DEFAULT_VERBOSE]);
    }

    #[test]
    fn set_forwards_to_all_until_failure() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        let third = Arc::new(Mutex::new(Vec::new()));
        let mut set = LoggerSet::new()
            .with(Probe { calls: Arc::clone(&first), fail: false })
            .with(Probe { calls: Arc::clone(&second), fail: true })
            .with(Probe { calls: Arc::clone(&third), fail: false });

        let err = set.log_stats(&EpochStats::new(), None, None, None, true).unwrap_err();
        assert!(matches!(err, LogError::EmptySamples));
        assert_eq!(first.lock().unwrap().len(), 1);
        assert_eq!(second.lock().unwrap().len(), 1);
        assert!(third.lock().unwrap().is_empty());
    }
}
