//! Match engine pipeline
//!
//! Wires the four stages together: score every candidate, filter by
//! threshold, rank deterministically, and attach a reason. The engine holds
//! configuration only and is safe to share across concurrent requests; each
//! call is a pure computation over its inputs.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::model::{Candidate, MatchResult, Reader, ReadingRecord, ScoredCandidate};

use super::filter::filter_by_threshold;
use super::metrics::{MatchMetrics, PerformanceTimer};
use super::rank::rank;
use super::reason::generate_reason;
use super::score::ScoreCalculator;

/// The match-scoring and ranking engine
#[derive(Clone)]
pub struct MatchEngine {
    calculator: Arc<ScoreCalculator>,
    threshold: u8,
    limit: usize,
    chunk_size: usize,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl MatchEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_calculator(config, ScoreCalculator::new(&config.weights))
    }

    /// Engine with a caller-supplied calculator (e.g. a custom temporal
    /// signal)
    pub fn with_calculator(config: &EngineConfig, calculator: ScoreCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
            threshold: config.score_threshold,
            limit: config.max_results,
            chunk_size: config.chunk_size.max(1),
        }
    }

    /// Compute the ranked top-N matches for one subject.
    ///
    /// Scores candidates sequentially; fine for typical pool sizes. Returns
    /// an empty list for an empty pool — "no candidates" is not an error.
    pub fn find_matches(
        &self,
        subject: &Reader,
        subject_record: &ReadingRecord,
        candidates: &[Candidate],
        now: DateTime<Utc>,
    ) -> Result<Vec<MatchResult>> {
        let _timer = PerformanceTimer::new("find_matches");

        let mut scored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            scored.push(self.calculator.score(subject, subject_record, candidate, now)?);
        }

        Ok(self.finish(subject, candidates.len(), scored, now))
    }

    /// Parallel variant for large candidate pools.
    ///
    /// Scoring runs on the rayon pool via `spawn_blocking` so it never blocks
    /// the async runtime, in chunks of `chunk_size` candidates. Cancellation
    /// is checked between chunks; a cancelled run returns [`Error::Cancelled`]
    /// and exposes no partial results.
    pub async fn find_matches_parallel(
        &self,
        subject: Reader,
        subject_record: ReadingRecord,
        candidates: Vec<Candidate>,
        now: DateTime<Utc>,
        cancel: CancellationToken,
    ) -> Result<Vec<MatchResult>> {
        let engine = self.clone();

        tokio::task::spawn_blocking(move || {
            let _timer = PerformanceTimer::new("find_matches_parallel");
            let pool_size = candidates.len();

            let mut scored: Vec<ScoredCandidate> = Vec::with_capacity(pool_size);
            for chunk in candidates.chunks(engine.chunk_size) {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }

                let chunk_scored = chunk
                    .par_iter()
                    .map(|candidate| {
                        engine
                            .calculator
                            .score(&subject, &subject_record, candidate, now)
                    })
                    .collect::<Result<Vec<_>>>()?;
                scored.extend(chunk_scored);
            }

            Ok(engine.finish(&subject, pool_size, scored, now))
        })
        .await
        .map_err(|e| Error::ScoringTask {
            message: e.to_string().into(),
        })?
    }

    /// Shared tail of both paths: filter, rank, annotate, log
    fn finish(
        &self,
        subject: &Reader,
        pool_size: usize,
        scored: Vec<ScoredCandidate>,
        now: DateTime<Utc>,
    ) -> Vec<MatchResult> {
        let survivors = filter_by_threshold(scored, self.threshold);
        let survivor_count = survivors.len();
        let ranked = rank(survivors, self.limit);

        let results: Vec<MatchResult> = ranked
            .into_iter()
            .map(|scored| {
                let reason = generate_reason(subject, &scored.candidate, now);
                MatchResult { scored, reason }
            })
            .collect();

        let metrics = MatchMetrics::summarize(pool_size, survivor_count, &results);
        debug!(
            subject = %subject.id,
            considered = metrics.candidates_considered,
            below_threshold = metrics.below_threshold,
            returned = metrics.returned,
            avg_score = metrics.avg_score,
            "match computation finished"
        );

        results
    }
}
