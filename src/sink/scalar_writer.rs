use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LogError, Result};

/// Storage behind a `SeriesSink`: accepts `(series, value, step)` points.
pub trait ScalarWriter: Send {
    fn add_scalar(&mut self, series: &str, value: f64, step: u64) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One point on a named time series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub series: String,
    pub value: f64,
    pub step: u64,
}

// ---------------------------------------------------------------------------
// CSV backend
// ---------------------------------------------------------------------------

/// Writes each series to its own CSV file inside a log directory.
///
/// Each `/`-separated segment of the series name becomes one directory level
/// and the last segment gets a `.csv` suffix (`loss/train` ->
/// `loss/train.csv`, `loss_train` -> `loss_train.csv`), so distinct series
/// never share a file. Each file starts with a `step,value` header followed
/// by one row per point.
#[derive(Debug)]
pub struct CsvScalarWriter {
    log_dir: PathBuf,
}

impl CsvScalarWriter {
    /// Creates `log_dir` (and parents) if needed.
    pub fn open(log_dir: impl Into<PathBuf>) -> Result<Self> {
        let log_dir = log_dir.into();
        std::fs::create_dir_all(&log_dir).map_err(|source| LogError::BackendInit {
            dir: log_dir.clone(),
            source,
        })?;
        Ok(CsvScalarWriter { log_dir })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of the file holding `series`.
    ///
    /// Empty, `.` and `..` segments are rejected so every series stays inside
    /// the log directory.
    pub fn series_path(&self, series: &str) -> Result<PathBuf> {
        let mut path = self.log_dir.clone();
        for segment in series.split('/') {
            if matches!(segment, "" | "." | "..") {
                return Err(LogError::Backend {
                    series: series.to_string(),
                    message: format!("invalid series name segment `{segment}`"),
                });
            }
            path.push(segment);
        }
        let mut file = path.into_os_string();
        file.push(".csv");
        Ok(PathBuf::from(file))
    }

    fn append_row(&self, path: &Path, value: f64, step: u64) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let needs_header = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        if needs_header {
            writeln!(file, "step,value")?;
        }
        writeln!(file, "{step},{value}")
    }
}

impl ScalarWriter for CsvScalarWriter {
    fn add_scalar(&mut self, series: &str, value: f64, step: u64) -> Result<()> {
        let path = self.series_path(series)?;
        self.append_row(&path, value, step).map_err(|e| LogError::Backend {
            series: series.to_string(),
            message: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Keeps every point in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemoryWriter {
    points: Vec<SeriesPoint>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        MemoryWriter { points: Vec::new() }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// `(step, value)` pairs of one series, in arrival order.
    pub fn series(&self, name: &str) -> Vec<(u64, f64)> {
        self.points.iter()
            .filter(|p| p.series == name)
            .map(|p| (p.step, p.value))
            .collect()
    }
}

impl ScalarWriter for MemoryWriter {
    fn add_scalar(&mut self, series: &str, value: f64, step: u64) -> Result<()> {
        self.points.push(SeriesPoint { series: series.to_string(), value, step });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_writes_header_once_per_series() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvScalarWriter::open(dir.path().join("run")).unwrap();
        writer.add_scalar("loss/train", 0.5, 1).unwrap();
        writer.add_scalar("loss/train", 0.25, 2).unwrap();
        writer.add_scalar("lr", 0.1, 1).unwrap();

        let loss = std::fs::read_to_string(writer.series_path("loss/train").unwrap()).unwrap();
        assert_eq!(loss, "step,value\n1,0.5\n2,0.25\n");
        assert!(writer.log_dir().join("loss").join("train.csv").exists());
        let lr = std::fs::read_to_string(writer.log_dir().join("lr.csv")).unwrap();
        assert_eq!(lr, "step,value\n1,0.1\n");
    }

    #[test]
    fn csv_keeps_similar_names_apart() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvScalarWriter::open(dir.path()).unwrap();
        writer.add_scalar("loss_train", 9.0, 1).unwrap();
        writer.add_scalar("loss/train", 0.5, 1).unwrap();
        writer.add_scalar("loss/train", 0.4, 2).unwrap();
        writer.add_scalar("loss", 1.5, 1).unwrap();

        let read = |series: &str| {
            std::fs::read_to_string(writer.series_path(series).unwrap()).unwrap()
        };
        assert_eq!(read("loss_train"), "step,value\n1,9\n");
        assert_eq!(read("loss/train"), "step,value\n1,0.5\n2,0.4\n");
        assert_eq!(read("loss"), "step,value\n1,1.5\n");
    }

    #[test]
    fn csv_rejects_escaping_series_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvScalarWriter::open(dir.path().join("run")).unwrap();
        for series in ["../loss", "loss//train", "loss/", "./lr"] {
            let err = writer.add_scalar(series, 1.0, 1).unwrap_err();
            assert!(matches!(err, LogError::Backend { .. }), "{series}");
        }
        assert!(!dir.path().join("loss.csv").exists());
    }

    #[test]
    fn csv_open_fails_under_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let err = CsvScalarWriter::open(blocker.join("run")).unwrap_err();
        assert!(matches!(err, LogError::BackendInit { .. }));
    }

    #[test]
    fn memory_filters_by_series() {
        let mut writer = MemoryWriter::new();
        writer.add_scalar("a", 1.0, 1).unwrap();
        writer.add_scalar("b", 2.0, 1).unwrap();
        writer.add_scalar("a", 3.0, 2).unwrap();
        assert_eq!(writer.series("a"), vec![(1, 1.0), (2, 3.0)]);
        assert_eq!(writer.points().len(), 3);
    }
}
