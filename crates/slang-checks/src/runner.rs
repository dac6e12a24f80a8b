//! Running configured checks over trees and sources.

use crate::check::{InitContext, SlangCheck};
use crate::checks::all_checks;
use crate::config::ChecksConfig;
use crate::context::CheckScanContext;
use crate::errors::{CheckError, CheckResult};
use crate::issue::{FileReport, Issue};
use crate::metrics::AnalysisMetrics;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use slang_api::{AstConverter, Tree};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Outcome of analysing several sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// One report per successfully converted source, in input order
    pub reports: Vec<FileReport>,

    /// Sources that could not be converted (file name, error message)
    pub failed_files: Vec<(String, String)>,
}

impl AnalysisReport {
    pub fn total_issues(&self) -> usize {
        self.reports.iter().map(|report| report.issues.len()).sum()
    }
}

/// Runs the enabled checks and records analysis metrics
pub struct CheckRunner {
    config: ChecksConfig,
    checks: Vec<Box<dyn SlangCheck>>,
    metrics: Mutex<AnalysisMetrics>,
}

impl CheckRunner {
    pub fn new() -> Self {
        Self::with_config(ChecksConfig::default())
    }

    /// Runner over every check enabled in `config`
    pub fn with_config(config: ChecksConfig) -> Self {
        let checks = all_checks(&config);
        Self::with_checks(config, checks)
    }

    /// Runner over the given checks; those disabled in `config` are dropped
    pub fn with_checks(config: ChecksConfig, checks: Vec<Box<dyn SlangCheck>>) -> Self {
        let checks: Vec<Box<dyn SlangCheck>> = checks
            .into_iter()
            .filter(|check| config.is_enabled(check.key()))
            .collect();
        debug!("check runner configured with {} check(s)", checks.len());
        Self {
            config,
            checks,
            metrics: Mutex::new(AnalysisMetrics::default()),
        }
    }

    pub fn config(&self) -> &ChecksConfig {
        &self.config
    }

    /// Keys of the checks this runner executes
    pub fn rule_keys(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.key()).collect()
    }

    /// Run every check over one tree in a single scan
    pub fn analyze(&self, tree: &Tree, file_name: Option<&str>) -> Vec<Issue> {
        let start = Instant::now();
        let issues = self.scan(tree, file_name);
        self.update_metrics(true, issues.len(), start.elapsed());
        issues
    }

    /// Convert `content` with `converter`, then run every check over it
    pub fn analyze_source(
        &self,
        converter: &dyn AstConverter,
        file_name: &str,
        content: &str,
    ) -> CheckResult<FileReport> {
        let start = Instant::now();
        let tree = match converter.parse_with_file(content, file_name) {
            Ok(tree) => tree,
            Err(error) => {
                warn!("skipping {}: {}", file_name, error);
                self.update_metrics(false, 0, start.elapsed());
                return Err(CheckError::from(error));
            }
        };
        let issues = self.scan(&tree, Some(file_name));
        self.update_metrics(true, issues.len(), start.elapsed());
        Ok(FileReport {
            file_name: file_name.to_string(),
            issues,
        })
    }

    /// Analyse many `(file name, content)` sources.
    ///
    /// Sources are independent; with `parallel` enabled they are spread
    /// over a rayon pool. A source that fails to convert is listed in
    /// `failed_files` and does not stop the others.
    pub fn analyze_all(
        &self,
        converter: &dyn AstConverter,
        sources: &[(String, String)],
    ) -> CheckResult<AnalysisReport> {
        let results: Vec<(String, CheckResult<FileReport>)> = if self.config.parallel {
            self.analyze_parallel(converter, sources)?
        } else {
            sources
                .iter()
                .map(|(name, content)| {
                    (name.clone(), self.analyze_source(converter, name, content))
                })
                .collect()
        };

        let mut reports = Vec::new();
        let mut failed_files = Vec::new();
        for (name, result) in results {
            match result {
                Ok(report) => reports.push(report),
                Err(error) => failed_files.push((name, error.to_string())),
            }
        }

        let report = AnalysisReport {
            reports,
            failed_files,
        };
        info!(
            "analysed {} source(s): {} issue(s), {} failure(s)",
            sources.len(),
            report.total_issues(),
            report.failed_files.len()
        );
        Ok(report)
    }

    fn analyze_parallel(
        &self,
        converter: &dyn AstConverter,
        sources: &[(String, String)],
    ) -> CheckResult<Vec<(String, CheckResult<FileReport>)>> {
        use rayon::prelude::*;

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(num_threads) = self.config.parallel_workers {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder
            .build()
            .map_err(|e| CheckError::ThreadPool(e.to_string()))?;

        Ok(pool.install(|| {
            sources
                .par_iter()
                .map(|(name, content)| {
                    (name.clone(), self.analyze_source(converter, name, content))
                })
                .collect()
        }))
    }

    fn scan(&self, tree: &Tree, file_name: Option<&str>) -> Vec<Issue> {
        let mut init = InitContext::new();
        for check in &self.checks {
            init.add_check(check.as_ref());
        }
        let visitor = init.into_visitor();
        let mut ctx = CheckScanContext::new(file_name);
        visitor.scan(&mut ctx, tree);
        let issues = ctx.into_issues();
        debug!(
            "{} issue(s) in {}",
            issues.len(),
            file_name.unwrap_or("<unnamed>")
        );
        issues
    }

    fn lock_metrics(&self) -> MutexGuard<'_, AnalysisMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_metrics(&self, success: bool, issues: usize, duration: Duration) {
        let mut metrics = self.lock_metrics();
        if success {
            metrics.files_analyzed += 1;
        } else {
            metrics.files_failed += 1;
        }
        metrics.total_issues += issues;
        metrics.total_duration += duration;
    }

    pub fn metrics(&self) -> AnalysisMetrics {
        self.lock_metrics().clone()
    }

    pub fn reset_metrics(&mut self) {
        *self.lock_metrics() = AnalysisMetrics::default();
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slang_parser::SlangConverter;

    fn sources(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(name, content)| (name.to_string(), content.to_string()))
            .collect()
    }

    #[test]
    fn test_disabled_rules_not_run() {
        let config = ChecksConfig::default().with_disabled_rule("S1764");
        let runner = CheckRunner::with_config(config);
        assert!(!runner.rule_keys().contains(&"S1764"));
        assert_eq!(runner.rule_keys().len(), 6);

        let report = runner
            .analyze_source(&SlangConverter::new(), "a.slang", "x = a == a;")
            .unwrap();
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_one_runner_scans_independent_trees() {
        let runner = CheckRunner::new();
        let converter = SlangConverter::new();
        let first = converter.parse("x = a == a;").unwrap();
        let second = converter.parse("y = 017;").unwrap();

        let first_issues = runner.analyze(&first, Some("first.slang"));
        let second_issues = runner.analyze(&second, Some("second.slang"));
        let again = runner.analyze(&first, Some("first.slang"));

        assert_eq!(first_issues.len(), 1);
        assert_eq!(first_issues[0].rule_key, "S1764");
        assert_eq!(second_issues.len(), 1);
        assert_eq!(second_issues[0].rule_key, "S1314");
        assert_eq!(again, first_issues);
    }

    #[test]
    fn test_analyze_source_failure_counts_in_metrics() {
        let runner = CheckRunner::new();
        let converter = SlangConverter::new();
        assert!(runner.analyze_source(&converter, "bad.slang", "x = ").is_err());
        runner
            .analyze_source(&converter, "good.slang", "a == a;")
            .unwrap();

        let metrics = runner.metrics();
        assert_eq!(metrics.files_failed, 1);
        assert_eq!(metrics.files_analyzed, 1);
        assert_eq!(metrics.total_issues, 1);
    }

    #[test]
    fn test_analyze_all_sequential_and_parallel_agree() {
        let inputs = sources(&[
            ("a.slang", "x = a == a;"),
            ("b.slang", "y = "),
            ("c.slang", "if (a) { x; } else { x; };"),
        ]);
        let converter = SlangConverter::new();

        let sequential = CheckRunner::with_config(ChecksConfig::default().with_parallel(false))
            .analyze_all(&converter, &inputs)
            .unwrap();
        let parallel = CheckRunner::with_config(ChecksConfig::default().with_parallel_workers(2))
            .analyze_all(&converter, &inputs)
            .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.reports.len(), 2);
        assert_eq!(sequential.failed_files.len(), 1);
        assert_eq!(sequential.failed_files[0].0, "b.slang");
        assert_eq!(sequential.total_issues(), 2);
    }

    #[test]
    fn test_reset_metrics() {
        let mut runner = CheckRunner::default();
        let tree = SlangConverter::new().parse_source("a != a;").unwrap();
        assert_eq!(runner.analyze(&tree, None).len(), 1);
        assert_eq!(runner.metrics().files_analyzed, 1);
        runner.reset_metrics();
        assert_eq!(runner.metrics(), AnalysisMetrics::default());
    }
}
