//! Match run metrics and performance monitoring
//!
//! Lightweight instrumentation for debugging match quality: per-run summary
//! counters and a drop-logging timer. Used selectively during profiling.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use crate::model::MatchResult;

/// Summary of one match computation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchMetrics {
    /// Candidates supplied by the caller
    pub candidates_considered: usize,
    /// Candidates removed by the score threshold
    pub below_threshold: usize,
    /// Matches returned after ranking and bounding
    pub returned: usize,
    /// Mean aggregate score of returned matches
    pub avg_score: f64,
    /// Reason text -> how many returned matches carry it
    pub reason_distribution: HashMap<String, usize>,
}

impl MatchMetrics {
    /// Summarize a finished run
    pub fn summarize(pool_size: usize, survivors: usize, results: &[MatchResult]) -> Self {
        let mut reason_distribution: HashMap<String, usize> = HashMap::new();
        let mut score_sum = 0u32;

        for result in results {
            score_sum += result.score() as u32;
            *reason_distribution.entry(result.reason.clone()).or_insert(0) += 1;
        }

        let avg_score = if results.is_empty() {
            0.0
        } else {
            score_sum as f64 / results.len() as f64
        };

        Self {
            candidates_considered: pool_size,
            below_threshold: pool_size.saturating_sub(survivors),
            returned: results.len(),
            avg_score,
            reason_distribution,
        }
    }

    /// Flag suspicious runs worth a closer look
    pub fn detect_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.candidates_considered > 0 && self.returned == 0 {
            issues.push("No candidates survived filtering".to_string());
        }

        if self.returned > 0 && self.avg_score < 50.0 {
            issues.push(format!("Low avg score: {:.1}", self.avg_score));
        }

        let fallback_count = self
            .reason_distribution
            .get("Reading the same book")
            .copied()
            .unwrap_or(0);
        if self.returned > 0 && fallback_count * 2 > self.returned {
            issues.push(format!(
                "High fallback-reason ratio: {}/{}",
                fallback_count, self.returned
            ));
        }

        issues
    }
}

/// Performance timer for tracking operation duration
pub struct PerformanceTimer {
    start: Instant,
    label: String,
}

impl PerformanceTimer {
    pub fn new(label: &str) -> Self {
        Self {
            start: Instant::now(),
            label: label.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn log_if_slow(&self, threshold_ms: u64) {
        let elapsed = self.elapsed_ms();
        if elapsed > threshold_ms {
            tracing::warn!(
                "Slow operation: {} took {}ms (threshold: {}ms)",
                self.label,
                elapsed,
                threshold_ms
            );
        }
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();
        tracing::debug!("{} completed in {}ms", self.label, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::scored_with;
    use chrono::Utc;

    fn result(name: &str, score: u8, reason: &str) -> MatchResult {
        MatchResult {
            scored: scored_with(name, score, Utc::now()),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_summarize_counts_and_average() {
        let results = vec![
            result("a", 80, "Active reader"),
            result("b", 60, "Reading the same book"),
        ];
        let metrics = MatchMetrics::summarize(10, 2, &results);

        assert_eq!(metrics.candidates_considered, 10);
        assert_eq!(metrics.below_threshold, 8);
        assert_eq!(metrics.returned, 2);
        assert!((metrics.avg_score - 70.0).abs() < 1e-9);
        assert_eq!(metrics.reason_distribution.get("Active reader"), Some(&1));
    }

    #[test]
    fn test_detect_issues_empty_survivors() {
        let metrics = MatchMetrics::summarize(5, 0, &[]);
        let issues = metrics.detect_issues();
        assert!(issues.iter().any(|i| i.contains("No candidates survived")));
    }

    #[test]
    fn test_detect_issues_fallback_heavy() {
        let results = vec![
            result("a", 90, "Reading the same book"),
            result("b", 88, "Reading the same book"),
            result("c", 85, "Active reader"),
        ];
        let metrics = MatchMetrics::summarize(3, 3, &results);
        let issues = metrics.detect_issues();
        assert!(issues.iter().any(|i| i.contains("fallback-reason")));
    }
}
