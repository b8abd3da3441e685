//! Domain model for the Likemindr match engine
//!
//! Plain in-memory value types supplied by the calling layer: readers,
//! reading records, books, and the candidate/result types that flow through
//! the scoring pipeline. The engine never mutates or persists these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a reader. Orderable so it can serve as a final ranking
/// tiebreaker.
pub type ReaderId = Uuid;

/// A reader profile. Immutable for the duration of a scoring call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reader {
    pub id: ReaderId,
    pub username: String,
    pub avatar_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Favorite genres in the reader's own preference order. Matching is
    /// case-insensitive; the stored order drives reason text.
    pub favorite_genres: Vec<String>,
    pub last_active: DateTime<Utc>,
}

/// Reading status for a (reader, book) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    CurrentlyReading,
    WantToRead,
    Finished,
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingStatus::CurrentlyReading => write!(f, "currently_reading"),
            ReadingStatus::WantToRead => write!(f, "want_to_read"),
            ReadingStatus::Finished => write!(f, "finished"),
        }
    }
}

/// One reader's progress through one book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub reader_id: ReaderId,
    /// Catalog id of the book this record tracks
    pub book_id: String,
    pub status: ReadingStatus,
    /// Absent until the reader first logs progress; scoring requires it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A book from the catalog. Referenced, never mutated, by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Catalog identity (e.g. a Google Books volume id)
    pub id: String,
    pub title: String,
    pub author: String,
    pub genres: Vec<String>,
}

/// A potential match: another reader sharing the subject's current book.
///
/// Caller invariant: `record.book_id` equals the subject record's `book_id`.
/// The engine validates this and rejects mismatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub reader: Reader,
    pub record: ReadingRecord,
    pub book: Book,
}

/// Rounded per-factor sub-scores, retained for auditability and testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Reading-progress proximity (cap 30)
    pub progress: u8,
    /// Genre overlap (cap 25)
    pub genre: u8,
    /// Activity recency (cap 25)
    pub recency: u8,
    /// Temporal compatibility (cap 20, placeholder signal)
    pub temporal: u8,
}

/// A candidate together with its aggregate score and breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Aggregate compatibility score, clamped to [0, 100]
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// The externally visible output unit: a scored candidate plus a
/// human-readable reason. Constructed per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub scored: ScoredCandidate,
    pub reason: String,
}

impl MatchResult {
    pub fn score(&self) -> u8 {
        self.scored.score
    }

    pub fn reader_id(&self) -> ReaderId {
        self.scored.candidate.reader.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_status_serde_snake_case() {
        let json = serde_json::to_string(&ReadingStatus::CurrentlyReading).unwrap();
        assert_eq!(json, "\"currently_reading\"");
        let back: ReadingStatus = serde_json::from_str("\"want_to_read\"").unwrap();
        assert_eq!(back, ReadingStatus::WantToRead);
    }

    #[test]
    fn test_reading_record_page_optional() {
        let json = r#"{
            "reader_id": "550e8400-e29b-41d4-a716-446655440000",
            "book_id": "vol-1",
            "status": "want_to_read",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }"#;
        let record: ReadingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.current_page, None);
    }
}
