use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{LogError, Result};
use crate::sink::logger::{phase_bundles, TrainLogger};
use crate::sink::scalar_writer::{CsvScalarWriter, ScalarWriter};
use crate::stats::{EpochStats, Phase, PhaseStats};

/// Step bookkeeping for a `SeriesSink`.
///
/// One global epoch counter plus one counter per (phase, statistic). Counters
/// only ever go up and live as long as the sink that owns them.
#[derive(Debug, Default, Clone)]
pub struct StepCounters {
    epoch: u64,
    phases: HashMap<Phase, HashMap<String, u64>>,
}

impl StepCounters {
    pub fn new() -> Self {
        StepCounters::default()
    }

    /// Number of `log_stats` calls seen so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Last step used for `stat` in `phase`, if it was ever logged.
    pub fn step(&self, phase: Phase, stat: &str) -> Option<u64> {
        self.phases.get(&phase)?.get(stat).copied()
    }

    fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Counter slot for `stat` in `phase`, created at zero on first use.
    fn slot(&mut self, phase: Phase, stat: &str) -> &mut u64 {
        self.phases.entry(phase).or_default().entry(stat.to_string()).or_insert(0)
    }
}

/// Forwards stats to a time-series backend as individual points.
///
/// Epoch stats land on a series named after the key, at the epoch step.
/// Phase stats are not summarized: every raw sample becomes its own point on
/// `"{stat}/{phase}"`, continuing that series' step count from earlier calls.
pub struct SeriesSink<W = CsvScalarWriter> {
    writer: W,
    steps: StepCounters,
}

impl SeriesSink<CsvScalarWriter> {
    /// Opens the default CSV backend in `log_dir`.
    pub fn open(log_dir: impl Into<PathBuf>) -> Result<Self> {
        let writer = CsvScalarWriter::open(log_dir)?;
        tracing::debug!(log_dir = %writer.log_dir().display(), "series sink ready");
        Ok(SeriesSink::new(writer))
    }
}

impl<W: ScalarWriter> SeriesSink<W> {
    pub fn new(writer: W) -> Self {
        SeriesSink { writer, steps: StepCounters::new() }
    }

    pub fn steps(&self) -> &StepCounters {
        &self.steps
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}

impl<W: ScalarWriter> TrainLogger for SeriesSink<W> {
    /// `verbose` is ignored.
    fn log_stats(
        &mut self,
        epoch_stats: &EpochStats,
        train_stats: Option<&PhaseStats>,
        valid_stats: Option<&PhaseStats>,
        test_stats: Option<&PhaseStats>,
        _verbose: bool,
    ) -> Result<()> {
        let epoch = self.steps.next_epoch();
        for (name, value) in epoch_stats.iter() {
            let value = value.as_scalar()
                .ok_or_else(|| LogError::NonScalar(format!("epoch stat `{name}`")))?;
            self.writer.add_scalar(name, value, epoch)?;
        }

        let mut points = 0usize;
        for (phase, stats) in phase_bundles(train_stats, valid_stats, test_stats) {
            let Some(stats) = stats else { continue };

            for (stat, samples) in stats.iter() {
                let series = format!("{stat}/{phase}");
                let step = self.steps.slot(phase, stat);
                for sample in samples {
                    let value = sample.scalar()?;
                    *step += 1;
                    self.writer.add_scalar(&series, value, *step)?;
                    points += 1;
                }
            }
        }

        tracing::debug!(epoch, points, "series points forwarded");
        Ok(())
    }
}
