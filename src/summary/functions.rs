use crate::edit_distance::{wer_summary, EditRecord};
use crate::error::{LogError, Result};
use crate::stats::value::Sample;

/// Arithmetic mean of all samples.
///
/// Empty input is a caller error (`EmptySamples`); edit records have no
/// numeric value and fail with `NonScalar`.
pub fn summarize_average(samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Err(LogError::EmptySamples);
    }
    let total = samples.iter().map(Sample::scalar).sum::<Result<f64>>()?;
    Ok(total / samples.len() as f64)
}

/// Aggregate word error rate (percent) over a list of per-utterance edit records.
pub fn summarize_error_rate(samples: &[Sample]) -> Result<f64> {
    let records = samples.iter()
        .map(|sample| match sample {
            Sample::Edit(record) => Ok(record),
            Sample::Value(x)     => Err(LogError::ExpectedEditRecord(*x)),
        })
        .collect::<Result<Vec<&EditRecord>>>()?;
    Ok(wer_summary(records)?.wer)
}
