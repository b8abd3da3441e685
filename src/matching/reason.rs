//! Match reason synthesis
//!
//! Derives the short, human-readable explanation attached to each surfaced
//! match. Signals are checked in a fixed priority order; every qualifying
//! signal joins the final string, and a fallback guarantees the result is
//! never empty.

use chrono::{DateTime, Utc};

use crate::model::{Candidate, Reader, ReadingRecord, ReadingStatus};

use super::factors::{genre_similarity, hours_inactive, shared_genres};

/// Separator between composed reason fragments
const REASON_SEPARATOR: &str = " • ";

/// Candidates inactive at least this many hours are not called active
const ACTIVE_READER_HOURS: f64 = 24.0;

/// Records untouched for more than this many days no longer gate pool entry
const ACTIVE_RECORD_DAYS: f64 = 7.0;

/// Build the display reason for one surfaced match.
///
/// Priority order:
/// 1. Strong genre overlap (Jaccard > 0.5) with a literal shared genre:
///    `"Both love {genre}"`, using the first shared genre in the subject's
///    own preference order.
/// 2. Candidate active in the last 24 hours: `"Active reader"`.
/// 3. Fallback when nothing else applies: `"Reading the same book"`.
pub fn generate_reason(subject: &Reader, candidate: &Candidate, now: DateTime<Utc>) -> String {
    let mut reasons: Vec<String> = Vec::new();

    let overlap = genre_similarity(&subject.favorite_genres, &candidate.reader.favorite_genres);
    if overlap > 0.5 {
        let shared = shared_genres(subject, &candidate.reader);
        if let Some(genre) = shared.first() {
            reasons.push(format!("Both love {}", genre));
        }
    }

    if hours_inactive(candidate.reader.last_active, now) < ACTIVE_READER_HOURS {
        reasons.push("Active reader".to_string());
    }

    if reasons.is_empty() {
        reasons.push("Reading the same book".to_string());
    }

    reasons.join(REASON_SEPARATOR)
}

/// Whether a reading record is a meaningful input to matching: the reader is
/// currently reading and has touched the record in the last 7 days.
/// Collaborators use this to decide which records enter the candidate pool.
pub fn is_active_reader(record: &ReadingRecord, now: DateTime<Utc>) -> bool {
    if record.status != ReadingStatus::CurrentlyReading {
        return false;
    }

    let days_since_update = (now - record.updated_at).num_milliseconds() as f64 / 86_400_000.0;
    days_since_update <= ACTIVE_RECORD_DAYS
}
