//! Likemindr Match Engine CLI
//!
//! Thin calling layer for offline experimentation: reads one match request
//! (subject + candidate pool) as JSON from a file argument or stdin, runs
//! the scoring pipeline, and prints the ranked matches as JSON. The engine
//! itself does no storage or network I/O; supplying the pool is this
//! harness's job.

use chrono::Utc;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use likemindr::config::EngineConfig;
use likemindr::error::{Error, Result};
use likemindr::matching::MatchEngine;
use likemindr::model::{Candidate, Reader, ReadingRecord};

/// One match request as supplied by the calling layer
#[derive(Debug, Deserialize)]
struct MatchRequest {
    subject: Reader,
    subject_record: ReadingRecord,
    candidates: Vec<Candidate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Likemindr Match Engine v{}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::from_env()?;
    let engine = MatchEngine::new(&config);

    let request = read_request()?;
    debug!(
        subject = %request.subject.id,
        pool = request.candidates.len(),
        "request loaded"
    );

    // Cancel the run if the process is interrupted mid-computation
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let results = engine
        .find_matches_parallel(
            request.subject,
            request.subject_record,
            request.candidates,
            Utc::now(),
            cancel,
        )
        .await?;

    info!("{} matches surfaced", results.len());
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}

/// Initialize structured logging with tracing
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("likemindr_engine=debug,likemindr=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .init();
}

/// Read the match request from the first argument (a path) or stdin
fn read_request() -> Result<MatchRequest> {
    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).map_err(|e| {
            Error::invalid_request(format!("cannot read request file '{}': {}", path, e))
        })?,
        None => {
            let mut buf = String::new();
            use std::io::Read;
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| Error::invalid_request(format!("cannot read stdin: {}", e)))?;
            buf
        }
    };

    Ok(serde_json::from_str(&raw)?)
}
