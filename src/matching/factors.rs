//! Scoring factors
//!
//! The four compatibility signals behind one uniform "contributes up to
//! `cap()` points" contract. Each factor is pure over its context and
//! unit-testable in isolation; adding a fifth factor means adding one
//! implementation here without touching callers.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::genres::normalize_genre;
use crate::model::Reader;

/// Everything a factor may look at when scoring one (subject, candidate) pair
#[derive(Debug, Clone, Copy)]
pub struct FactorContext<'a> {
    pub subject: &'a Reader,
    pub subject_page: u32,
    pub candidate: &'a Reader,
    pub candidate_page: u32,
    pub now: DateTime<Utc>,
}

/// Which factor produced a contribution; keys the score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    Progress,
    Genre,
    Recency,
    Temporal,
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactorKind::Progress => write!(f, "progress"),
            FactorKind::Genre => write!(f, "genre"),
            FactorKind::Recency => write!(f, "recency"),
            FactorKind::Temporal => write!(f, "temporal"),
        }
    }
}

/// One weighted compatibility signal contributing up to `cap()` points
pub trait ScoringFactor: Send + Sync {
    fn kind(&self) -> FactorKind;

    /// Maximum points this factor can contribute
    fn cap(&self) -> f64;

    /// Points contributed for this pair, already bounded to [0, cap]
    fn contribution(&self, ctx: &FactorContext<'_>) -> f64;
}

// ============================================================================
// Factor implementations
// ============================================================================

/// Reading-progress proximity. Readers within ~50 pages of each other score
/// near the cap; the penalty grows linearly with page distance and floors at
/// zero.
pub struct ProgressProximity {
    pub cap: f64,
}

impl ScoringFactor for ProgressProximity {
    fn kind(&self) -> FactorKind {
        FactorKind::Progress
    }

    fn cap(&self) -> f64 {
        self.cap
    }

    fn contribution(&self, ctx: &FactorContext<'_>) -> f64 {
        let diff = ctx.subject_page.abs_diff(ctx.candidate_page) as f64;
        (self.cap - diff / 5.0).max(0.0)
    }
}

/// Genre overlap: case-insensitive Jaccard similarity of the two readers'
/// favorite-genre sets, scaled to the cap.
pub struct GenreOverlap {
    pub cap: f64,
}

impl ScoringFactor for GenreOverlap {
    fn kind(&self) -> FactorKind {
        FactorKind::Genre
    }

    fn cap(&self) -> f64 {
        self.cap
    }

    fn contribution(&self, ctx: &FactorContext<'_>) -> f64 {
        genre_similarity(&ctx.subject.favorite_genres, &ctx.candidate.favorite_genres) * self.cap
    }
}

/// Activity recency: candidates active within the last 24 hours score near
/// the cap, one point lost per hour of inactivity, floored at zero.
pub struct ActivityRecency {
    pub cap: f64,
}

impl ScoringFactor for ActivityRecency {
    fn kind(&self) -> FactorKind {
        FactorKind::Recency
    }

    fn cap(&self) -> f64 {
        self.cap
    }

    fn contribution(&self, ctx: &FactorContext<'_>) -> f64 {
        (self.cap - hours_inactive(ctx.candidate.last_active, ctx.now)).max(0.0)
    }
}

// ============================================================================
// Temporal compatibility (swappable strategy)
// ============================================================================

/// Source of the temporal compatibility signal.
///
/// Real timezone/availability data is not wired up yet; production runs on
/// [`FixedCompatibility`]. Swapping in a real signal is a matter of passing a
/// different implementation to the calculator; the rest of the pipeline is
/// untouched.
pub trait TemporalSignal: Send + Sync {
    /// Raw compatibility points for this pair (clamped to the factor cap by
    /// the caller)
    fn compatibility_points(&self, subject: &Reader, candidate: &Reader) -> f64;
}

/// Placeholder signal: a fixed medium-compatibility contribution
pub struct FixedCompatibility(pub f64);

impl TemporalSignal for FixedCompatibility {
    fn compatibility_points(&self, _subject: &Reader, _candidate: &Reader) -> f64 {
        self.0
    }
}

/// Temporal compatibility factor wrapping whichever [`TemporalSignal`] is
/// configured.
pub struct TemporalCompatibility {
    pub cap: f64,
    pub signal: Box<dyn TemporalSignal>,
}

impl ScoringFactor for TemporalCompatibility {
    fn kind(&self) -> FactorKind {
        FactorKind::Temporal
    }

    fn cap(&self) -> f64 {
        self.cap
    }

    fn contribution(&self, ctx: &FactorContext<'_>) -> f64 {
        self.signal
            .compatibility_points(ctx.subject, ctx.candidate)
            .clamp(0.0, self.cap)
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Case-insensitive Jaccard similarity of two genre lists (0.0 to 1.0).
/// Either side empty forces 0.
pub fn genre_similarity(genres1: &[String], genres2: &[String]) -> f64 {
    if genres1.is_empty() || genres2.is_empty() {
        return 0.0;
    }

    let set1: HashSet<String> = genres1.iter().map(|g| normalize_genre(g)).collect();
    let set2: HashSet<String> = genres2.iter().map(|g| normalize_genre(g)).collect();

    let intersection = set1.intersection(&set2).count();
    let union = set1.union(&set2).count();

    intersection as f64 / union as f64
}

/// Shared genres in the subject's own preference order, with the subject's
/// original casing. Drives the "Both love {genre}" reason text.
pub fn shared_genres(subject: &Reader, candidate: &Reader) -> Vec<String> {
    let candidate_set: HashSet<String> = candidate
        .favorite_genres
        .iter()
        .map(|g| normalize_genre(g))
        .collect();

    subject
        .favorite_genres
        .iter()
        .filter(|g| candidate_set.contains(&normalize_genre(g)))
        .cloned()
        .collect()
}

/// Fractional hours since the reader was last active. A timestamp in the
/// future counts as zero hours inactive.
pub fn hours_inactive(last_active: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed_ms = (now - last_active).num_milliseconds();
    (elapsed_ms as f64 / 3_600_000.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn reader(genres: &[&str], last_active: DateTime<Utc>) -> Reader {
        Reader {
            id: Uuid::new_v4(),
            username: "test".to_string(),
            avatar_id: "owl".to_string(),
            bio: None,
            favorite_genres: genres.iter().map(|g| g.to_string()).collect(),
            last_active,
        }
    }

    fn ctx<'a>(
        subject: &'a Reader,
        subject_page: u32,
        candidate: &'a Reader,
        candidate_page: u32,
        now: DateTime<Utc>,
    ) -> FactorContext<'a> {
        FactorContext {
            subject,
            subject_page,
            candidate,
            candidate_page,
            now,
        }
    }

    #[test]
    fn test_progress_same_page_hits_cap() {
        let now = Utc::now();
        let a = reader(&[], now);
        let b = reader(&[], now);
        let factor = ProgressProximity { cap: 30.0 };
        assert_eq!(factor.contribution(&ctx(&a, 100, &b, 100, now)), 30.0);
    }

    #[test]
    fn test_progress_penalty_is_linear_and_floors_at_zero() {
        let now = Utc::now();
        let a = reader(&[], now);
        let b = reader(&[], now);
        let factor = ProgressProximity { cap: 30.0 };
        // 10 pages apart: 30 - 10/5 = 28
        assert_eq!(factor.contribution(&ctx(&a, 100, &b, 110, now)), 28.0);
        // 300 pages apart would go negative; floors at zero
        assert_eq!(factor.contribution(&ctx(&a, 100, &b, 400, now)), 0.0);
    }

    #[test]
    fn test_genre_similarity_identical_sets() {
        let a = vec!["Fantasy".to_string(), "Mystery".to_string()];
        let b = vec!["fantasy".to_string(), "MYSTERY".to_string()];
        assert_eq!(genre_similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_genre_similarity_partial_overlap() {
        let a = vec!["Fantasy".to_string(), "Mystery".to_string()];
        let b = vec!["Fantasy".to_string(), "Horror".to_string()];
        // intersection 1, union 3
        assert!((genre_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_genre_similarity_empty_side_is_zero() {
        let a: Vec<String> = vec![];
        let b = vec!["Fantasy".to_string()];
        assert_eq!(genre_similarity(&a, &b), 0.0);
        assert_eq!(genre_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_shared_genres_keeps_subject_order_and_casing() {
        let now = Utc::now();
        let subject = reader(&["Poetry", "Fantasy", "Horror"], now);
        let candidate = reader(&["horror", "fantasy"], now);
        assert_eq!(shared_genres(&subject, &candidate), vec!["Fantasy", "Horror"]);
    }

    #[test]
    fn test_recency_fresh_activity_hits_cap() {
        let now = Utc::now();
        let a = reader(&[], now);
        let b = reader(&[], now);
        let factor = ActivityRecency { cap: 25.0 };
        assert_eq!(factor.contribution(&ctx(&a, 0, &b, 0, now)), 25.0);
    }

    #[test]
    fn test_recency_fractional_hours() {
        let now = Utc::now();
        let a = reader(&[], now);
        let b = reader(&[], now - Duration::minutes(90));
        let factor = ActivityRecency { cap: 25.0 };
        let points = factor.contribution(&ctx(&a, 0, &b, 0, now));
        assert!((points - 23.5).abs() < 1e-6);
    }

    #[test]
    fn test_recency_long_inactive_is_zero() {
        let now = Utc::now();
        let a = reader(&[], now);
        let b = reader(&[], now - Duration::hours(30));
        let factor = ActivityRecency { cap: 25.0 };
        assert_eq!(factor.contribution(&ctx(&a, 0, &b, 0, now)), 0.0);
    }

    #[test]
    fn test_temporal_placeholder_contributes_default() {
        let now = Utc::now();
        let a = reader(&[], now);
        let b = reader(&[], now);
        let factor = TemporalCompatibility {
            cap: 20.0,
            signal: Box::new(FixedCompatibility(15.0)),
        };
        assert_eq!(factor.contribution(&ctx(&a, 0, &b, 0, now)), 15.0);
    }

    #[test]
    fn test_temporal_signal_clamped_to_cap() {
        let now = Utc::now();
        let a = reader(&[], now);
        let b = reader(&[], now);
        let factor = TemporalCompatibility {
            cap: 20.0,
            signal: Box::new(FixedCompatibility(35.0)),
        };
        assert_eq!(factor.contribution(&ctx(&a, 0, &b, 0, now)), 20.0);
    }
}
