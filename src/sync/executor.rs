//! Engine subprocess execution.
//!
//! The engine decodes audio for the full length of the reference media, so a
//! run can take minutes and is not bounded by a timeout. Every failure at
//! this boundary, from spawn errors to non-zero exits, surfaces as the single
//! `Error::AlignmentFailed` kind; callers never see the underlying cause as a
//! typed error.

use crate::error::{Error, Result};
use crate::sync::invocation::EngineInvocation;
use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;
use tracing::{debug, error};

/// Values the engine reported for a completed run.
#[derive(Debug, Clone, Default)]
pub struct EngineResult {
    /// Constant shift applied to the cues, in seconds.
    pub offset_seconds: Option<f64>,
    /// Multiplicative timestamp correction for framerate mismatches.
    pub framerate_scale_factor: Option<f64>,
    /// Combined stdout/stderr of the run, kept for debug mode.
    pub log: String,
}

fn offset_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)offset seconds:\s*(-?\d+(?:\.\d+)?)").unwrap())
}

fn framerate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)framerate scale factor:\s*(-?\d+(?:\.\d+)?)").unwrap())
}

/// Run the engine for the given invocation.
///
/// A stale output file from a previous attempt is deleted before the run;
/// the engine is not trusted to overwrite it.
pub fn execute(engine: &Path, invocation: &EngineInvocation) -> Result<EngineResult> {
    if invocation.srtout.is_file() {
        std::fs::remove_file(&invocation.srtout)?;
        debug!(
            "Deleted previous synchronization attempt output: {}",
            invocation.srtout.display()
        );
    }

    debug!(
        "Running {} for {}",
        engine.display(),
        invocation.srtin.display()
    );

    let output = Command::new(engine)
        .args(invocation.to_args())
        .output()
        .map_err(|e| {
            error!(
                "Failed to launch alignment engine for {}: {}",
                invocation.srtin.display(),
                e
            );
            Error::alignment_failed(&invocation.srtin, format!("failed to launch engine: {}", e))
        })?;

    let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
    log.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        error!(
            "Alignment engine failed for {}: {}",
            invocation.srtin.display(),
            output.status
        );
        return Err(Error::alignment_failed(
            &invocation.srtin,
            format!("engine exited with {}", output.status),
        ));
    }

    Ok(parse_engine_log(log))
}

/// Scrape the offset and framerate scale factor out of the engine log.
/// The engine reports them as log lines rather than structured output.
fn parse_engine_log(log: String) -> EngineResult {
    let offset_seconds = offset_re()
        .captures(&log)
        .and_then(|c| c[1].parse::<f64>().ok());
    let framerate_scale_factor = framerate_re()
        .captures(&log)
        .and_then(|c| c[1].parse::<f64>().ok());

    EngineResult {
        offset_seconds,
        framerate_scale_factor,
        log,
    }
}
