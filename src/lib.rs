//! Likemindr match engine library crate
//!
//! Re-exports the scoring pipeline and domain model for the calling layer
//! and integration tests.

pub mod config;
pub mod error;
pub mod genres;
pub mod matching;
pub mod model;

// Re-export commonly used types
pub use config::{EngineConfig, ScoringWeights};
pub use error::{Error, Result};
pub use matching::{is_active_reader, MatchEngine, ScoreCalculator};
pub use model::{Candidate, MatchResult, Reader, ReadingRecord, ScoredCandidate};
