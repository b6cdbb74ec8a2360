//! Result materialization: swap the corrected subtitle in and build the
//! outcome record.

use crate::error::Result;
use crate::languages;
use crate::path_mappings::PathMappings;
use crate::sync::executor::EngineResult;
use crate::sync::invocation::EngineInvocation;
use crate::sync::{SyncReport, SyncRequest};
use std::path::Path;
use tracing::{debug, error};

/// Terminal states of materialization.
#[derive(Debug)]
pub enum Materialized {
    /// The engine's output now lives at the original subtitle path.
    Swapped(SyncReport),
    /// The engine completed but left no artifact. Nothing was touched.
    OutputMissing,
}

/// Replace the original subtitle with the engine's output and build the
/// report. When the expected artifact is absent this logs and returns
/// `OutputMissing` instead of failing, so the caller decides how to treat it.
pub fn materialize(
    invocation: &EngineInvocation,
    engine: &EngineResult,
    request: &SyncRequest,
    mappings: &PathMappings,
) -> Result<Materialized> {
    if !invocation.srtout.is_file() {
        error!("Unable to sync subtitles: {}", invocation.srtin.display());
        return Ok(Materialized::OutputMissing);
    }

    replace_file(&invocation.srtout, &invocation.srtin)?;
    debug!(
        "Replaced {} with synchronized output",
        invocation.srtin.display()
    );

    let offset_seconds = engine.offset_seconds.unwrap_or(0.0);
    let framerate_scale_factor = engine.framerate_scale_factor.unwrap_or(0.0);

    let message = format!(
        "{} subtitles synchronization ended with an offset of {} seconds and a framerate scale factor of {:.2}.",
        languages::display_name_or_code(&request.language),
        offset_seconds,
        framerate_scale_factor
    );

    Ok(Materialized::Swapped(SyncReport {
        message,
        offset_seconds,
        framerate_scale_factor,
        video_path: mappings.reverse(&request.video_path),
        language: request.language.clone(),
        subtitle_path: request.subtitle_path.clone(),
        // A correction pass, not a new acquisition: acquisition fields are
        // deliberately unset.
        provider: None,
        score: None,
        subtitle_id: None,
        forced: None,
        hearing_impaired: None,
    }))
}

/// Rename `from` over `to`. On Unix this is a single atomic replace; the
/// original file never goes missing even if the process dies mid-swap.
#[cfg(unix)]
fn replace_file(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::rename(from, to)
}

/// Windows refuses to rename over an existing file, so fall back to
/// remove-then-rename there.
#[cfg(not(unix))]
fn replace_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if to.is_file() {
        std::fs::remove_file(to)?;
    }
    std::fs::rename(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubsyncConfig;
    use crate::sync::backend::VadBackend;
    use crate::sync::MediaId;
    use std::path::PathBuf;

    fn request(dir: &Path) -> SyncRequest {
        SyncRequest {
            video_path: dir.join("movie.mkv"),
            subtitle_path: dir.join("movie.srt"),
            language: "en".to_string(),
            media: MediaId::Movie { movie_id: 1 },
        }
    }

    fn invocation(request: &SyncRequest) -> EngineInvocation {
        EngineInvocation::build(
            &request.video_path,
            &request.subtitle_path,
            &SubsyncConfig::default(),
            VadBackend::SubsThenAuditok,
            Path::new("/usr/bin"),
            Path::new("/tmp/log"),
        )
    }

    #[test]
    fn swap_moves_output_over_input() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path());
        let invocation = invocation(&request);

        std::fs::write(&request.subtitle_path, "stale cues").unwrap();
        std::fs::write(&invocation.srtout, "synced cues").unwrap();

        let engine = EngineResult {
            offset_seconds: Some(1.23),
            framerate_scale_factor: Some(1.001),
            log: String::new(),
        };

        let materialized =
            materialize(&invocation, &engine, &request, &PathMappings::default()).unwrap();

        let report = match materialized {
            Materialized::Swapped(report) => report,
            Materialized::OutputMissing => panic!("expected a swap"),
        };

        assert!(!invocation.srtout.exists());
        assert_eq!(
            std::fs::read_to_string(&request.subtitle_path).unwrap(),
            "synced cues"
        );
        assert!(report.message.contains("English"));
        assert!(report.message.contains("1.23"));
        assert!(report.message.contains("1.00"));
        assert!(report.provider.is_none());
        assert!(report.score.is_none());
        assert!(report.forced.is_none());
        assert!(report.hearing_impaired.is_none());
    }

    #[test]
    fn unreported_values_default_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path());
        let invocation = invocation(&request);

        std::fs::write(&request.subtitle_path, "stale cues").unwrap();
        std::fs::write(&invocation.srtout, "synced cues").unwrap();

        let materialized = materialize(
            &invocation,
            &EngineResult::default(),
            &request,
            &PathMappings::default(),
        )
        .unwrap();

        let report = match materialized {
            Materialized::Swapped(report) => report,
            Materialized::OutputMissing => panic!("expected a swap"),
        };

        assert_eq!(report.offset_seconds, 0.0);
        assert_eq!(report.framerate_scale_factor, 0.0);
        assert!(report.message.contains("0 seconds"));
        assert!(report.message.contains("0.00"));
    }

    #[test]
    fn missing_output_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path());
        let invocation = invocation(&request);

        std::fs::write(&request.subtitle_path, "original cues").unwrap();

        let materialized = materialize(
            &invocation,
            &EngineResult::default(),
            &request,
            &PathMappings::default(),
        )
        .unwrap();

        assert!(matches!(materialized, Materialized::OutputMissing));
        assert_eq!(
            std::fs::read_to_string(&request.subtitle_path).unwrap(),
            "original cues"
        );
    }

    #[test]
    fn report_carries_reverse_mapped_video_path() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path());
        let invocation = invocation(&request);

        std::fs::write(&request.subtitle_path, "stale").unwrap();
        std::fs::write(&invocation.srtout, "synced").unwrap();

        let mappings = PathMappings::new(vec![crate::config::PathMapping {
            local: dir.path().to_path_buf(),
            remote: PathBuf::from("/data/media"),
        }]);

        let materialized =
            materialize(&invocation, &EngineResult::default(), &request, &mappings).unwrap();

        let report = match materialized {
            Materialized::Swapped(report) => report,
            Materialized::OutputMissing => panic!("expected a swap"),
        };
        assert_eq!(report.video_path, PathBuf::from("/data/media/movie.mkv"));
        // The subtitle path stays as requested.
        assert_eq!(report.subtitle_path, request.subtitle_path);
    }
}
