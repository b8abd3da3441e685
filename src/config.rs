//! Configuration management for the Likemindr match engine
//!
//! Provides strongly-typed configuration with validation, environment variable
//! parsing, and sensible defaults. The defaults reproduce the production
//! scoring behavior; overrides exist for tuning experiments.
//!
//! # Example
//! ```no_run
//! use likemindr::config::EngineConfig;
//! let config = EngineConfig::from_env().expect("failed to load config");
//! println!("threshold: {}", config.score_threshold);
//! ```

use crate::error::{Error, Result};
use tracing::info;

/// Default minimum aggregate score a candidate needs to survive filtering
pub const DEFAULT_SCORE_THRESHOLD: u8 = 40;

/// Default bound on the ranked result list
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default candidate chunk size for the parallel scoring path
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum aggregate score to survive filtering (0-100)
    pub score_threshold: u8,
    /// Maximum number of matches returned per request
    pub max_results: usize,
    /// Candidates scored per chunk on the parallel path; cancellation is
    /// checked between chunks
    pub chunk_size: usize,
    /// Per-factor point caps
    pub weights: ScoringWeights,
}

/// Point caps for the four scoring factors (can be tuned)
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    /// Reading-progress proximity cap
    pub progress_cap: f64,
    /// Genre overlap cap
    pub genre_cap: f64,
    /// Activity recency cap
    pub recency_cap: f64,
    /// Temporal compatibility cap
    pub temporal_cap: f64,
    /// Fixed contribution of the temporal placeholder signal
    pub temporal_default: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            progress_cap: 30.0,  // readers within ~50 pages score near the cap
            genre_cap: 25.0,     // Jaccard similarity of favorite genres
            recency_cap: 25.0,   // active in the last 24h scores near the cap
            temporal_cap: 20.0,  // reserved for real timezone data
            temporal_default: 15.0, // medium compatibility until then
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            weights: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore if not found)
        dotenvy::dotenv().ok();

        let config = Self {
            score_threshold: get_env_or("MATCH_SCORE_THRESHOLD", "40")
                .parse()
                .unwrap_or(DEFAULT_SCORE_THRESHOLD),
            max_results: get_env_or("MATCH_MAX_RESULTS", "10")
                .parse()
                .unwrap_or(DEFAULT_MAX_RESULTS),
            chunk_size: get_env_or("MATCH_CHUNK_SIZE", "256")
                .parse()
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            weights: ScoringWeights::from_env(),
        };

        config.validate()?;
        config.log_summary();

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.score_threshold > 100 {
            return Err(Error::InvalidConfig {
                key: "MATCH_SCORE_THRESHOLD",
                message: "threshold must be within [0, 100]".into(),
            });
        }

        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig {
                key: "MATCH_CHUNK_SIZE",
                message: "chunk size must be positive".into(),
            });
        }

        let w = &self.weights;
        for (key, value) in [
            ("MATCH_WEIGHT_PROGRESS", w.progress_cap),
            ("MATCH_WEIGHT_GENRE", w.genre_cap),
            ("MATCH_WEIGHT_RECENCY", w.recency_cap),
            ("MATCH_WEIGHT_TEMPORAL", w.temporal_cap),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::InvalidConfig {
                    key,
                    message: format!("factor cap {} out of range [0, 100]", value).into(),
                });
            }
        }

        if w.temporal_default > w.temporal_cap {
            return Err(Error::InvalidConfig {
                key: "MATCH_TEMPORAL_DEFAULT",
                message: "temporal default cannot exceed the temporal cap".into(),
            });
        }

        Ok(())
    }

    /// Log configuration summary
    fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  Match engine:");
        info!("    Score threshold: {}", self.score_threshold);
        info!("    Max results: {}", self.max_results);
        info!("    Chunk size: {}", self.chunk_size);
        info!(
            "    Factor caps: progress={} genre={} recency={} temporal={} (default={})",
            self.weights.progress_cap,
            self.weights.genre_cap,
            self.weights.recency_cap,
            self.weights.temporal_cap,
            self.weights.temporal_default,
        );
    }
}

impl ScoringWeights {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            progress_cap: get_env_or("MATCH_WEIGHT_PROGRESS", "30")
                .parse()
                .unwrap_or(defaults.progress_cap),
            genre_cap: get_env_or("MATCH_WEIGHT_GENRE", "25")
                .parse()
                .unwrap_or(defaults.genre_cap),
            recency_cap: get_env_or("MATCH_WEIGHT_RECENCY", "25")
                .parse()
                .unwrap_or(defaults.recency_cap),
            temporal_cap: get_env_or("MATCH_WEIGHT_TEMPORAL", "20")
                .parse()
                .unwrap_or(defaults.temporal_cap),
            temporal_default: get_env_or("MATCH_TEMPORAL_DEFAULT", "15")
                .parse()
                .unwrap_or(defaults.temporal_default),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get environment variable with default
fn get_env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.score_threshold, 40);
        assert_eq!(config.max_results, 10);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = EngineConfig {
            score_threshold: 101,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig {
                key: "MATCH_SCORE_THRESHOLD",
                ..
            })
        ));
    }

    #[test]
    fn test_temporal_default_bounded_by_cap() {
        let mut config = EngineConfig::default();
        config.weights.temporal_default = 25.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = EngineConfig {
            chunk_size: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
