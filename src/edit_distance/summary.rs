use serde::{Deserialize, Serialize};

use crate::edit_distance::alignment::EditRecord;
use crate::error::{LogError, Result};

/// Corpus-level totals over a batch of `EditRecord`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WerSummary {
    /// Word error rate in percent: 100 * edits / reference tokens.
    pub wer: f64,
    /// Sentence error rate in percent: share of utterances with any edit.
    pub ser: f64,
    pub num_edits: usize,
    pub num_scored_tokens: usize,
    pub num_erroneous_sents: usize,
    pub num_scored_sents: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub substitutions: usize,
}

/// Aggregates per-utterance records into one error-rate summary.
///
/// Fails with `NoScoredTokens` when the records hold no reference tokens.
pub fn wer_summary<'a>(records: impl IntoIterator<Item = &'a EditRecord>) -> Result<WerSummary> {
    let mut summary = WerSummary {
        wer: 0.0,
        ser: 0.0,
        num_edits: 0,
        num_scored_tokens: 0,
        num_erroneous_sents: 0,
        num_scored_sents: 0,
        insertions: 0,
        deletions: 0,
        substitutions: 0,
    };

    for record in records {
        summary.num_scored_sents += 1;
        summary.num_scored_tokens += record.num_ref_tokens;
        summary.num_edits += record.num_edits();
        summary.insertions += record.insertions;
        summary.deletions += record.deletions;
        summary.substitutions += record.substitutions;
        if record.num_edits() > 0 {
            summary.num_erroneous_sents += 1;
        }
    }

    if summary.num_scored_tokens == 0 {
        return Err(LogError::NoScoredTokens);
    }
    summary.wer = 100.0 * summary.num_edits as f64 / summary.num_scored_tokens as f64;
    summary.ser = 100.0 * summary.num_erroneous_sents as f64 / summary.num_scored_sents as f64;
    Ok(summary)
}
