use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats::value::Sample;
use crate::summary::functions::{summarize_average, summarize_error_rate};

/// Reduces one statistic's raw samples to a single reportable scalar.
pub type SummaryFn = Box<dyn Fn(&[Sample]) -> Result<f64> + Send + Sync>;

/// Built-in summary functions, selectable by name in a logger config.
///
/// - `Average`   — arithmetic mean of numeric samples
/// - `ErrorRate` — pooled word error rate over edit records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Average,
    ErrorRate,
}

impl SummaryKind {
    pub fn summarize(self, samples: &[Sample]) -> Result<f64> {
        match self {
            SummaryKind::Average   => summarize_average(samples),
            SummaryKind::ErrorRate => summarize_error_rate(samples),
        }
    }
}

/// Mapping from statistic name to the function that summarizes it.
///
/// A text sink looks up every phase statistic here; a name with no entry is a
/// configuration error at log time.
#[derive(Default)]
pub struct SummaryFns {
    fns: HashMap<String, SummaryFn>,
}

impl SummaryFns {
    pub fn new() -> Self {
        SummaryFns { fns: HashMap::new() }
    }

    /// Registers `f` for `stat`, replacing any previous entry.
    pub fn insert<F>(&mut self, stat: impl Into<String>, f: F)
    where
        F: Fn(&[Sample]) -> Result<f64> + Send + Sync + 'static,
    {
        self.fns.insert(stat.into(), Box::new(f));
    }

    pub fn with<F>(mut self, stat: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Sample]) -> Result<f64> + Send + Sync + 'static,
    {
        self.insert(stat, f);
        self
    }

    pub fn get(&self, stat: &str) -> Option<&SummaryFn> {
        self.fns.get(stat)
    }

    pub fn contains(&self, stat: &str) -> bool {
        self.fns.contains_key(stat)
    }

    pub fn len(&self) -> usize {
        self.fns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fns.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SummaryKind)> for SummaryFns {
    fn from_iter<I: IntoIterator<Item = (K, SummaryKind)>>(iter: I) -> Self {
        let mut fns = SummaryFns::new();
        for (stat, kind) in iter {
            fns.insert(stat, move |samples: &[Sample]| kind.summarize(samples));
        }
        fns
    }
}

impl fmt::Debug for SummaryFns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.fns.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SummaryFns").field("stats", &names).finish()
    }
}
