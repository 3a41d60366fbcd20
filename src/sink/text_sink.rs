use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LogError, Result};
use crate::sink::logger::{phase_bundles, TrainLogger};
use crate::stats::{EpochStats, PhaseStats, StatValue, StatsBundle};
use crate::summary::SummaryFns;

/// Appends one human-readable line per epoch to a text file.
///
/// Line format: `key: value` pairs joined with ` - `, epoch stats first, then
/// the summarized train, valid and test stats (each phase block prefixed by
/// ` - `). Floats are printed with two decimals.
///
/// ```text
/// epoch: 3 - lr: 0.01 - loss: 0.52 - loss: 0.61 - wer: 12.50
/// ```
pub struct TextSink {
    path: PathBuf,
    summary_fns: SummaryFns,
}

impl TextSink {
    /// `summary_fns` must cover every statistic name any phase bundle will
    /// carry over the sink's lifetime.
    pub fn new(path: impl Into<PathBuf>, summary_fns: SummaryFns) -> Self {
        let path = path.into();
        tracing::debug!(path = %path.display(), stats = summary_fns.len(), "text sink ready");
        TextSink { path, summary_fns }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds the line `log_stats` would write, without touching the file.
    pub fn format_line(
        &self,
        epoch_stats: &EpochStats,
        train_stats: Option<&PhaseStats>,
        valid_stats: Option<&PhaseStats>,
        test_stats: Option<&PhaseStats>,
    ) -> Result<String> {
        let mut line = render(epoch_stats);

        for (phase, stats) in phase_bundles(train_stats, valid_stats, test_stats) {
            let Some(stats) = stats else { continue };

            let mut summary = EpochStats::new();
            for (stat, samples) in stats.iter() {
                let summarize = self.summary_fns.get(stat).ok_or_else(|| {
                    LogError::UnknownStatistic { stat: stat.to_string(), phase }
                })?;
                summary.insert(stat, StatValue::Float(summarize(samples.as_slice())?));
            }

            line.push_str(" - ");
            line.push_str(&render(&summary));
        }

        Ok(line)
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }
}

impl TrainLogger for TextSink {
    fn log_stats(
        &mut self,
        epoch_stats: &EpochStats,
        train_stats: Option<&PhaseStats>,
        valid_stats: Option<&PhaseStats>,
        test_stats: Option<&PhaseStats>,
        verbose: bool,
    ) -> Result<()> {
        let line = self.format_line(epoch_stats, train_stats, valid_stats, test_stats)?;
        self.append_line(&line)?;
        if verbose {
            tracing::info!("{line}");
        }
        Ok(())
    }
}

/// `key: value` pairs joined with ` - `.
fn render<V: Display>(stats: &StatsBundle<V>) -> String {
    stats.iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(" - ")
}
