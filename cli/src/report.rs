//! # Run Report
//!
//! Collects case outcomes and writes them as JSON.

use crate::error::CliResult;
use chrono::{DateTime, Local};
use petstore_core::Settings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Report title.
pub const REPORT_TITLE: &str = "Petstore API Test Report";

/// Result of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every expectation held.
    Passed,
    /// An expectation failed or an error was raised.
    Failed,
}

/// One executed case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Suite the case belongs to.
    pub suite: String,
    /// Case name.
    pub name: String,
    /// What the case checks.
    pub description: String,
    /// Outcome.
    pub outcome: Outcome,
    /// Wall time in milliseconds.
    pub duration_ms: u64,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Case counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// All cases.
    pub total: usize,
    /// Passed cases.
    pub passed: usize,
    /// Failed cases.
    pub failed: usize,
}

/// A whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report title.
    pub title: String,
    /// Environment name.
    pub environment: String,
    /// Base URL under test.
    pub base_url: String,
    /// Run start.
    pub started_at: DateTime<Local>,
    /// Run end, set by [`Report::finish`].
    pub finished_at: Option<DateTime<Local>>,
    /// Case counts.
    pub totals: Totals,
    /// Cases in execution order.
    pub cases: Vec<CaseReport>,
}

impl Report {
    /// Starts an empty report for `settings`.
    pub fn start(settings: &Settings) -> Self {
        Report {
            title: REPORT_TITLE.to_string(),
            environment: settings.env_name.clone(),
            base_url: settings.base_url.clone(),
            started_at: Local::now(),
            finished_at: None,
            totals: Totals::default(),
            cases: Vec::new(),
        }
    }

    /// Records a case outcome.
    pub fn record(
        &mut self,
        suite: &str,
        name: &str,
        description: &str,
        duration: Duration,
        failure: Option<String>,
    ) {
        let outcome = if failure.is_some() {
            self.totals.failed += 1;
            Outcome::Failed
        } else {
            self.totals.passed += 1;
            Outcome::Passed
        };
        self.totals.total += 1;
        self.cases.push(CaseReport {
            suite: suite.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            outcome,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            message: failure,
        });
    }

    /// Stamps the end time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    /// True when no case failed.
    pub fn is_success(&self) -> bool {
        self.totals.failed == 0
    }

    /// Writes `<dir>/report_<timestamp>.json` and returns its path.
    pub fn write(&self, dir: &Path) -> CliResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "report_{}.json",
            self.started_at.format("%Y%m%d_%H%M%S")
        ));
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_write() {
        let mut report = Report::start(&Settings::default());
        report.record("pet", "get_existing_pet", "Get a pet", Duration::from_millis(12), None);
        report.record(
            "store",
            "get_inventory",
            "Inventory",
            Duration::from_millis(3),
            Some("expected 200, got 500".into()),
        );
        report.finish();

        assert_eq!(report.totals, Totals { total: 2, passed: 1, failed: 1 });
        assert!(!report.is_success());

        let dir = tempfile::tempdir().unwrap();
        let path = report.write(dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("report_") && name.ends_with(".json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["title"], REPORT_TITLE);
        assert_eq!(written["environment"], "dev");
        assert_eq!(written["cases"][1]["outcome"], "failed");
        assert_eq!(written["cases"][0].get("message"), None);
    }
}
