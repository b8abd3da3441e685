//! Score calculation
//!
//! Computes the aggregate compatibility score for one (subject, candidate)
//! pair: validates the shared-book invariant, runs every configured factor,
//! sums the contributions, and clamps to [0, 100]. Pure over its inputs;
//! `now` is an explicit parameter so identical inputs always produce
//! identical scores.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::config::ScoringWeights;
use crate::error::{Error, Result};
use crate::model::{Candidate, Reader, ReadingRecord, ScoreBreakdown, ScoredCandidate};

use super::factors::{
    ActivityRecency, FactorContext, FactorKind, FixedCompatibility, GenreOverlap,
    ProgressProximity, ScoringFactor, TemporalCompatibility, TemporalSignal,
};

/// Computes per-candidate compatibility scores with an auditable per-factor
/// breakdown. Holds configuration only; no state accumulates across calls.
pub struct ScoreCalculator {
    factors: Vec<Box<dyn ScoringFactor>>,
}

impl ScoreCalculator {
    /// Calculator with the production factor set and the placeholder
    /// temporal signal
    pub fn new(weights: &ScoringWeights) -> Self {
        Self::with_temporal_signal(weights, Box::new(FixedCompatibility(weights.temporal_default)))
    }

    /// Calculator with a caller-supplied temporal signal (e.g. a real
    /// timezone model, or a test double)
    pub fn with_temporal_signal(weights: &ScoringWeights, signal: Box<dyn TemporalSignal>) -> Self {
        let factors: Vec<Box<dyn ScoringFactor>> = vec![
            Box::new(ProgressProximity {
                cap: weights.progress_cap,
            }),
            Box::new(GenreOverlap {
                cap: weights.genre_cap,
            }),
            Box::new(ActivityRecency {
                cap: weights.recency_cap,
            }),
            Box::new(TemporalCompatibility {
                cap: weights.temporal_cap,
                signal,
            }),
        ];
        Self { factors }
    }

    /// Score one candidate against the subject.
    ///
    /// Fails with a validation error if the candidate's record is for a
    /// different book than the subject's, or if either record has no
    /// `current_page`.
    pub fn score(
        &self,
        subject: &Reader,
        subject_record: &ReadingRecord,
        candidate: &Candidate,
        now: DateTime<Utc>,
    ) -> Result<ScoredCandidate> {
        validate_pair(subject_record, candidate)?;

        let subject_page = subject_record
            .current_page
            .ok_or_else(|| Error::missing_current_page(subject_record.reader_id))?;
        let candidate_page = candidate
            .record
            .current_page
            .ok_or_else(|| Error::missing_current_page(candidate.record.reader_id))?;

        let ctx = FactorContext {
            subject,
            subject_page,
            candidate: &candidate.reader,
            candidate_page,
            now,
        };

        let mut total = 0.0f64;
        let mut breakdown = ScoreBreakdown {
            progress: 0,
            genre: 0,
            recency: 0,
            temporal: 0,
        };

        for factor in &self.factors {
            let points = factor.contribution(&ctx);
            total += points;

            // Sub-scores are rounded for the breakdown; the aggregate is
            // rounded once, from the raw sum.
            let rounded = points.round() as u8;
            match factor.kind() {
                FactorKind::Progress => breakdown.progress = rounded,
                FactorKind::Genre => breakdown.genre = rounded,
                FactorKind::Recency => breakdown.recency = rounded,
                FactorKind::Temporal => breakdown.temporal = rounded,
            }
        }

        let score = total.round().clamp(0.0, 100.0) as u8;

        trace!(
            candidate = %candidate.reader.id,
            score,
            progress = breakdown.progress,
            genre = breakdown.genre,
            recency = breakdown.recency,
            temporal = breakdown.temporal,
            "scored candidate"
        );

        Ok(ScoredCandidate {
            candidate: candidate.clone(),
            score,
            breakdown,
        })
    }
}

/// Enforce the caller invariant that subject and candidate share one book
fn validate_pair(subject_record: &ReadingRecord, candidate: &Candidate) -> Result<()> {
    if candidate.record.book_id != subject_record.book_id {
        return Err(Error::book_mismatch(
            subject_record.book_id.clone(),
            candidate.record.book_id.clone(),
        ));
    }
    if candidate.book.id != candidate.record.book_id {
        return Err(Error::invalid_request(
            "candidate book does not match its reading record",
        ));
    }
    Ok(())
}
