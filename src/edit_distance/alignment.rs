use serde::{Deserialize, Serialize};

/// Edit operations needed to turn one reference sequence into a hypothesis.
///
/// One record is produced per utterance; error-rate statistics collect a list
/// of these instead of plain numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    /// Utterance identifier.
    pub key: String,
    pub num_ref_tokens: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub substitutions: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Ops {
    insertions: usize,
    deletions: usize,
    substitutions: usize,
}

impl Ops {
    fn total(&self) -> usize {
        self.insertions + self.deletions + self.substitutions
    }
}

impl EditRecord {
    /// Aligns `hypothesis` against `reference` with a minimum-edit
    /// (Levenshtein) alignment and records the operation counts.
    ///
    /// Ties prefer a match/substitution, then a deletion, then an insertion.
    pub fn align<T: PartialEq>(
        key: impl Into<String>,
        reference: &[T],
        hypothesis: &[T],
    ) -> EditRecord {
        let (r, h) = (reference.len(), hypothesis.len());

        // table[i][j]: cheapest ops turning reference[..i] into hypothesis[..j]
        let mut table = vec![vec![Ops::default(); h + 1]; r + 1];
        for (i, row) in table.iter_mut().enumerate().skip(1) {
            row[0].deletions = i;
        }
        for j in 1..=h {
            table[0][j].insertions = j;
        }

        for i in 1..=r {
            for j in 1..=h {
                let mut best = table[i - 1][j - 1];
                if reference[i - 1] != hypothesis[j - 1] {
                    best.substitutions += 1;
                }

                let mut deletion = table[i - 1][j];
                deletion.deletions += 1;
                if deletion.total() < best.total() {
                    best = deletion;
                }

                let mut insertion = table[i][j - 1];
                insertion.insertions += 1;
                if insertion.total() < best.total() {
                    best = insertion;
                }

                table[i][j] = best;
            }
        }

        let ops = table[r][h];
        EditRecord {
            key: key.into(),
            num_ref_tokens: r,
            insertions: ops.insertions,
            deletions: ops.deletions,
            substitutions: ops.substitutions,
        }
    }

    pub fn num_edits(&self) -> usize {
        self.insertions + self.deletions + self.substitutions
    }

    /// Per-utterance error rate in percent; `None` for an empty reference.
    pub fn wer(&self) -> Option<f64> {
        if self.num_ref_tokens == 0 {
            return None;
        }
        Some(100.0 * self.num_edits() as f64 / self.num_ref_tokens as f64)
    }
}
