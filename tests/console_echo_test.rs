use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ferrite_log::{
    summarize_average, EpochStats, MemoryWriter, PhaseStats, SeriesSink, SummaryFns, TextSink,
    TrainLogger,
};
use tracing::Level;

/// Shared buffer the test subscriber formats events into.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
    }
}

/// Runs `f` with an INFO-level subscriber installed and returns the console lines.
fn console_lines(f: impl FnOnce()) -> Vec<String> {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.lines()
}

fn text_sink(dir: &tempfile::TempDir) -> TextSink {
    TextSink::new(dir.path().join("log.txt"), SummaryFns::new().with("loss", summarize_average))
}

#[test]
fn verbose_text_sink_echoes_the_file_line_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = text_sink(&dir);
    let epoch = EpochStats::new().with("epoch", 1);
    let train = PhaseStats::new().with_values("loss", [1.0, 3.0]);

    let lines = console_lines(|| {
        sink.log_stats(&epoch, Some(&train), None, None, true).unwrap();
    });

    let written = std::fs::read_to_string(dir.path().join("log.txt")).unwrap();
    assert_eq!(written, "epoch: 1 - loss: 2.00\n");
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].contains("INFO"), "{lines:?}");
    assert!(lines[0].ends_with("epoch: 1 - loss: 2.00"), "{lines:?}");
}

#[test]
fn quiet_text_sink_stays_silent() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = text_sink(&dir);
    let epoch = EpochStats::new().with("epoch", 1);

    let lines = console_lines(|| {
        sink.log_stats(&epoch, None, None, None, false).unwrap();
        sink.log_epoch(&epoch, None, None, None).unwrap();
    });

    assert!(lines.is_empty(), "{lines:?}");
    let written = std::fs::read_to_string(dir.path().join("log.txt")).unwrap();
    assert_eq!(written.lines().count(), 2);
}

#[test]
fn series_sink_never_echoes() {
    let mut sink = SeriesSink::new(MemoryWriter::new());
    let epoch = EpochStats::new().with("epoch", 1);
    let valid = PhaseStats::new().with_values("loss", [0.5, 0.25]);

    let lines = console_lines(|| {
        sink.log_stats(&epoch, None, Some(&valid), None, true).unwrap();
    });

    assert!(lines.is_empty(), "{lines:?}");
    assert_eq!(sink.writer().points().len(), 3);
}
