//! Result formatting, the appendable result log, and JSON report
//! persistence.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::statistics::{GroupStats, TestSetStats};

/// Format one result line.
///
/// Zero-denominator groups render as `0.0%`; counts stay integers.
pub fn format_stats_line(stats: &GroupStats, topn: usize) -> String {
    format!(
        "{}: correct={:.1}% ({}/{}), top{}={:.1}% ({}/{}), coverage={:.1}% ({}/{})",
        stats.label,
        stats.accuracy(),
        stats.correct,
        stats.attempted,
        topn,
        stats.topn_accuracy(),
        stats.correct_topn,
        stats.attempted,
        stats.coverage(),
        stats.attempted,
        stats.available,
    )
}

/// Emits evaluation results to the log and appends them, timestamped, to
/// the result file sitting next to the model artifact.
pub struct Reporter {
    log_path: PathBuf,
    topn: usize,
}

impl Reporter {
    /// Result file suffix appended to the model path.
    pub const RESULT_SUFFIX: &'static str = ".result";

    pub fn for_model(model_path: &Path, topn: usize) -> Self {
        let mut os = model_path.as_os_str().to_os_string();
        os.push(Self::RESULT_SUFFIX);
        Reporter {
            log_path: PathBuf::from(os),
            topn,
        }
    }

    /// Where result lines are appended.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a section heading.
    pub fn heading(&self, text: &str) -> Result<(), EvalError> {
        tracing::info!("{text}");
        self.append_line(text)
    }

    /// Log one line per group plus the aggregate `total` line.
    pub fn report(&self, stats: &TestSetStats) -> Result<(), EvalError> {
        for group in &stats.groups {
            let line = format_stats_line(group, self.topn);
            tracing::info!("{line}");
            self.append_line(&line)?;
        }
        let line = format_stats_line(&stats.total, self.topn);
        tracing::info!("{line}");
        self.append_line(&line)
    }

    fn append_line(&self, line: &str) -> Result<(), EvalError> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| EvalError::io(&self.log_path, e))?;
        writeln!(
            file,
            "{} : {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            line
        )
        .map_err(|e| EvalError::io(&self.log_path, e))
    }
}

/// Machine-readable evaluation report covering all test sets of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Name of the evaluated model.
    pub model: String,
    /// When the evaluation ran.
    pub created_at: DateTime<Utc>,
    /// Top-N threshold used for ranking hits.
    pub topn: usize,
    /// One entry per evaluated test set, in evaluation order.
    pub test_sets: Vec<TestSetReport>,
}

/// Stats of one evaluated test-set file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSetReport {
    pub name: String,
    pub stats: TestSetStats,
}

impl EvaluationReport {
    pub fn new(model: impl Into<String>, topn: usize) -> Self {
        EvaluationReport {
            model: model.into(),
            created_at: Utc::now(),
            topn,
            test_sets: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, stats: TestSetStats) {
        self.test_sets.push(TestSetReport {
            name: name.into(),
            stats,
        });
    }

    /// Save the report as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
