use std::path::PathBuf;

use ferrite_log::config::{SeriesSinkConfig, TextSinkConfig};
use ferrite_log::{
    init_logging, EditRecord, EpochStats, LoggerConfig, PhaseStats, SummaryKind, TrainLogger,
};
use rand::Rng;

const REFERENCE: [&str; 6] = ["the", "cat", "sat", "on", "the", "mat"];
const VOCAB: [&str; 4] = ["a", "dog", "stood", "rug"];

fn main() -> ferrite_log::Result<()> {
    init_logging();

    let out_dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| "runs/demo".into());
    std::fs::create_dir_all(&out_dir)?;

    let config = LoggerConfig {
        text: Some(TextSinkConfig {
            path: out_dir.join("train_log.txt"),
            summaries: [
                ("loss".to_string(), SummaryKind::Average),
                ("wer".to_string(), SummaryKind::ErrorRate),
            ]
            .into_iter()
            .collect(),
        }),
        series: Some(SeriesSinkConfig { log_dir: out_dir.join("series") }),
        verbose: true,
    };
    config.save_json(out_dir.join("logger.json"))?;
    let mut loggers = config.build()?;

    let mut rng = rand::thread_rng();
    let mut lr = 0.1;
    for epoch in 1..=5 {
        // Loss drifts down with some per-batch noise.
        let base = 2.0 / epoch as f64;
        let mut train = PhaseStats::new();
        for _ in 0..8 {
            train.push("loss", base + rng.gen_range(-0.1..0.1));
        }

        // Each utterance gets a few random word errors, fewer as training goes on.
        let utterances: Vec<EditRecord> = (0..4).map(|i| {
            let hypothesis: Vec<&str> = REFERENCE.iter()
                .map(|&word| {
                    if rng.gen_bool(0.5 / epoch as f64) {
                        VOCAB[rng.gen_range(0..VOCAB.len())]
                    } else {
                        word
                    }
                })
                .collect();
            EditRecord::align(format!("utt{i}"), &REFERENCE, hypothesis.as_slice())
        })
        .collect();
        let valid = PhaseStats::new()
            .with_values("loss", (0..2).map(|_| base + 0.05 + rng.gen_range(0.0..0.1)))
            .with_records("wer", utterances);

        let epoch_stats = EpochStats::new().with("epoch", epoch).with("lr", lr);
        loggers.log_stats(&epoch_stats, Some(&train), Some(&valid), None, config.verbose)?;
        lr *= 0.5;
    }

    println!("logs written to {}", out_dir.display());
    Ok(())
}
