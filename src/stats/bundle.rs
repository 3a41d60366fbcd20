use serde::{Deserialize, Serialize};

use crate::edit_distance::EditRecord;
use crate::stats::value::{Sample, StatValue};

/// Ordered mapping from statistic name to value.
///
/// Iteration follows insertion order, which is the order the text sink
/// renders keys in. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsBundle<V> {
    entries: Vec<(String, V)>,
}

/// Epoch-level metadata: one scalar per key.
pub type EpochStats = StatsBundle<StatValue>;

/// One phase's raw samples: an ordered sample list per statistic.
pub type PhaseStats = StatsBundle<Vec<Sample>>;

impl<V> StatsBundle<V> {
    pub fn new() -> Self {
        StatsBundle { entries: Vec::new() }
    }

    /// Inserts or replaces `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder form of `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<V>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StatsBundle<Vec<Sample>> {
    /// Adds a statistic made of plain numeric samples.
    pub fn with_values(
        self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        let samples: Vec<Sample> = values.into_iter().map(Sample::Value).collect();
        self.with(key, samples)
    }

    /// Adds a statistic made of per-utterance edit records.
    pub fn with_records(
        self,
        key: impl Into<String>,
        records: impl IntoIterator<Item = EditRecord>,
    ) -> Self {
        let samples: Vec<Sample> = records.into_iter().map(Sample::Edit).collect();
        self.with(key, samples)
    }

    /// Appends one sample to `key`, creating the statistic if needed.
    pub fn push(&mut self, key: &str, sample: impl Into<Sample>) {
        let sample = sample.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, samples)) => samples.push(sample),
            None => self.entries.push((key.to_string(), vec![sample])),
        }
    }
}

impl<V> Default for StatsBundle<V> {
    fn default() -> Self {
        StatsBundle::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for StatsBundle<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bundle = StatsBundle::new();
        for (k, v) in iter {
            bundle.insert(k, v);
        }
        bundle
    }
}
