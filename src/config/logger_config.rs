use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sink::{LoggerSet, SeriesSink, TextSink};
use crate::summary::{SummaryFns, SummaryKind};

/// Text sink settings.
///
/// Fields:
/// - `path`      — log file; created on first write, always appended to
/// - `summaries` — statistic name -> built-in summary used for phase stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSinkConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub summaries: BTreeMap<String, SummaryKind>,
}

/// Series sink settings: directory for the CSV backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSinkConfig {
    pub log_dir: PathBuf,
}

/// Which sinks to build, plus the `verbose` flag callers pass to `log_stats`.
///
/// ```json
/// {
///   "text":   { "path": "runs/exp1/train_log.txt",
///               "summaries": { "loss": "average", "wer": "error_rate" } },
///   "series": { "log_dir": "runs/exp1/series" },
///   "verbose": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub text: Option<TextSinkConfig>,
    #[serde(default)]
    pub series: Option<SeriesSinkConfig>,
    #[serde(default)]
    pub verbose: bool,
}

impl LoggerConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<LoggerConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Builds every configured sink, text sink first.
    ///
    /// Fails if the series backend cannot be initialized.
    pub fn build(&self) -> Result<LoggerSet> {
        let mut set = LoggerSet::new();
        if let Some(text) = &self.text {
            let fns: SummaryFns = text.summaries.iter()
                .map(|(stat, kind)| (stat.as_str(), *kind))
                .collect();
            set.push(Box::new(TextSink::new(&text.path, fns)));
        }
        if let Some(series) = &self.series {
            set.push(Box::new(SeriesSink::open(&series.log_dir)?));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let config: LoggerConfig = serde_json::from_str(
            r#"{ "text": { "path": "log.txt", "summaries": { "loss": "average" } } }"#,
        )
        .unwrap();
        let text = config.text.as_ref().unwrap();
        assert_eq!(text.path, PathBuf::from("log.txt"));
        assert_eq!(text.summaries.get("loss"), Some(&SummaryKind::Average));
        assert!(config.series.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            text: Some(TextSinkConfig {
                path: dir.path().join("log.txt"),
                summaries: BTreeMap::from([("wer".to_string(), SummaryKind::ErrorRate)]),
            }),
            series: Some(SeriesSinkConfig { log_dir: dir.path().join("series") }),
            verbose: true,
        };
        let path = dir.path().join("logger.json");
        config.save_json(&path).unwrap();
        assert_eq!(LoggerConfig::load_json(&path).unwrap(), config);
    }

    #[test]
    fn build_creates_each_sink() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            text: Some(TextSinkConfig {
                path: dir.path().join("log.txt"),
                summaries: BTreeMap::new(),
            }),
            series: Some(SeriesSinkConfig { log_dir: dir.path().join("series") }),
            verbose: false,
        };
        assert_eq!(config.build().unwrap().len(), 2);
        assert!(dir.path().join("series").is_dir());
        assert!(LoggerConfig::default().build().unwrap().is_empty());
    }

    #[test]
    fn malformed_config_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "text": { "summaries": {} } }"#).unwrap();
        let err = LoggerConfig::load_json(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }
}
