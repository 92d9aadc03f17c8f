//! Accuracy and coverage accounting.

use serde::{Deserialize, Serialize};

/// Percentage rounded to one decimal, `0.0` when the denominator is zero.
pub fn percent(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0;
    }
    (num as f64 / den as f64 * 1000.0).round() / 10.0
}

/// Counts accumulated for one question group during a single evaluation
/// pass. Owned and mutated only by the evaluator, then handed immutably to
/// the reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStats {
    pub label: String,
    /// Question lines available in the file, before vocabulary filtering.
    pub available: usize,
    /// Questions whose words were all in the model's vocabulary.
    pub attempted: usize,
    /// Top-1 hits.
    pub correct: usize,
    /// Top-N hits; a top-1 hit always counts here too.
    pub correct_topn: usize,
}

impl GroupStats {
    pub fn new(label: impl Into<String>) -> Self {
        GroupStats {
            label: label.into(),
            available: 0,
            attempted: 0,
            correct: 0,
            correct_topn: 0,
        }
    }

    /// Top-1 accuracy over attempted questions.
    pub fn accuracy(&self) -> f64 {
        percent(self.correct, self.attempted)
    }

    /// Top-N accuracy over attempted questions.
    pub fn topn_accuracy(&self) -> f64 {
        percent(self.correct_topn, self.attempted)
    }

    /// Fraction of available questions that survived the vocabulary filter.
    pub fn coverage(&self) -> f64 {
        percent(self.attempted, self.available)
    }

    /// Fold another group's counts into this one.
    pub fn absorb(&mut self, other: &GroupStats) {
        self.available += other.available;
        self.attempted += other.attempted;
        self.correct += other.correct;
        self.correct_topn += other.correct_topn;
    }
}

/// Per-group counts plus the running total for one test-set file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSetStats {
    pub groups: Vec<GroupStats>,
    pub total: GroupStats,
}

impl TestSetStats {
    /// Aggregate group counts into a `total` entry.
    pub fn from_groups(groups: Vec<GroupStats>) -> Self {
        let mut total = GroupStats::new("total");
        for group in &groups {
            total.absorb(group);
        }
        TestSetStats { groups, total }
    }
}
