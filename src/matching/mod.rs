//! Matching Module
//!
//! Pairs readers who are reading the same book into ranked candidate lists.
//!
//! ## Architecture
//!
//! 1. **Factors** - The four weighted compatibility signals, each behind one
//!    "contributes up to N points" trait
//! 2. **Score** - Per-candidate validation, factor breakdown, and the
//!    clamped 0-100 aggregate
//! 3. **Filter** - Threshold pruning of weak candidates
//! 4. **Rank** - Deterministic ordering (score, recency, reader id) bounded
//!    to top-N
//! 5. **Reason** - Human-readable justification for each surfaced match
//! 6. **Engine** - The pipeline wiring, with a sequential path and a
//!    chunked, cancellable parallel path
//!
//! ## Scoring Overview
//!
//! Four additive factors, summed then clamped to [0, 100]:
//! - Reading-progress proximity (max 30): within ~50 pages scores near cap
//! - Genre overlap (max 25): case-insensitive Jaccard of favorite genres
//! - Activity recency (max 25): one point lost per hour inactive
//! - Temporal compatibility (max 20): fixed 15-point placeholder pending
//!   real timezone data
//!
//! The engine holds no state across calls; every operation is a pure
//! function of its inputs and safe to invoke concurrently.

pub mod engine;
pub mod factors;
pub mod filter;
pub mod metrics;
pub mod rank;
pub mod reason;
pub mod score;

pub use engine::MatchEngine;
pub use factors::{FixedCompatibility, ScoringFactor, TemporalSignal};
pub use filter::filter_by_threshold;
pub use rank::rank;
pub use reason::{generate_reason, is_active_reader};
pub use score::ScoreCalculator;
