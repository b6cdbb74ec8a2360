//! Subtitle synchronization orchestrator.
//!
//! Drives one sync job end to end: resolve the external binaries, pick the
//! detection backend, marshal the engine invocation, run the engine, swap the
//! corrected subtitle over the original, and hand the outcome to the history
//! recorder. One call blocks the calling thread for the whole engine run.

pub mod backend;
mod executor;
mod invocation;
mod materialize;

pub use backend::VadBackend;
pub use executor::EngineResult;
pub use invocation::{derived_output_path, EngineInvocation};

use crate::config::{Config, SubsyncConfig, ToolsConfig};
use crate::error::{Error, Result};
use crate::events::{AppEvent, EventBus};
use crate::path_mappings::PathMappings;
use crate::tools;
use materialize::Materialized;
use std::path::PathBuf;
use tracing::{debug, info};

/// Fixed history action code meaning "subtitles were synchronized".
pub const ACTION_SYNCED: i64 = 5;

/// What the media item is, and how its history is keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaId {
    Episode { series_id: i64, episode_id: i64 },
    Movie { movie_id: i64 },
}

/// One synchronization job.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Reference video the subtitle is aligned against.
    pub video_path: PathBuf,
    /// Subtitle to correct, replaced in place on success.
    pub subtitle_path: PathBuf,
    /// Alpha-2 language code of the subtitle.
    pub language: String,
    /// Media identity for the history sink.
    pub media: MediaId,
}

/// Outcome of a successful swap, persisted to history.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Human-readable summary embedding language, offset, and framerate
    /// scale factor.
    pub message: String,
    pub offset_seconds: f64,
    pub framerate_scale_factor: f64,
    /// Reference path as the media manager sees it (reverse-mapped).
    pub video_path: PathBuf,
    pub language: String,
    /// Final subtitle path (the request's subtitle path).
    pub subtitle_path: PathBuf,
    // Acquisition fields, always unset for a correction pass.
    pub provider: Option<String>,
    pub score: Option<i64>,
    pub subtitle_id: Option<String>,
    pub forced: Option<bool>,
    pub hearing_impaired: Option<bool>,
}

/// Where a sync call ended up. Alignment failures are the only hard error;
/// everything else is a tagged disposition so callers cannot confuse
/// "skipped" with "failed".
#[derive(Debug)]
pub enum SyncDisposition {
    /// The subtitle was replaced and history recorded.
    Synced(SyncReport),
    /// A required binary is missing; nothing was attempted.
    NotAttempted { tool: String },
    /// The engine ran but produced no artifact; nothing was mutated.
    OutputMissing {
        subtitle_path: PathBuf,
        engine: EngineResult,
    },
    /// Debug mode: the raw engine result, no swap, no history.
    Debug(EngineResult),
}

/// Sink for sync outcomes. Implemented by the history database; tests
/// substitute their own.
pub trait HistoryRecorder {
    fn record(&self, action: i64, media: &MediaId, report: &SyncReport) -> Result<()>;
}

/// The orchestrator. Holds only per-instance immutable state, so a single
/// instance is safe to reuse across sequential jobs; per-call state lives on
/// the stack.
pub struct Syncer {
    settings: SubsyncConfig,
    tools: ToolsConfig,
    vad: VadBackend,
    log_dir: PathBuf,
    mappings: PathMappings,
    events: Option<EventBus>,
}

impl Syncer {
    /// Build a syncer from config. The VAD backend is probed here, once,
    /// unless the config pins it.
    pub fn new(config: &Config) -> Self {
        let vad = VadBackend::resolve(config.subsync.vad.as_deref(), &config.tools.python);

        Self {
            settings: config.subsync.clone(),
            tools: config.tools.clone(),
            vad,
            log_dir: config.log_dir.clone(),
            mappings: PathMappings::new(config.path_mappings.clone()),
            events: None,
        }
    }

    /// Build a syncer that announces completed swaps on the event bus.
    pub fn with_events(config: &Config, events: EventBus) -> Self {
        let mut syncer = Self::new(config);
        syncer.events = Some(events);
        syncer
    }

    /// The backend this syncer passes to the engine.
    pub fn vad_backend(&self) -> VadBackend {
        self.vad
    }

    /// Run one synchronization job.
    ///
    /// Blocks for the full engine run; there is no timeout. A hung engine
    /// blocks the caller indefinitely.
    pub fn sync(
        &self,
        request: &SyncRequest,
        history: &dyn HistoryRecorder,
    ) -> Result<SyncDisposition> {
        if !request.subtitle_path.is_file() {
            return Err(Error::file_not_found(&request.subtitle_path));
        }

        let ffprobe = match tools::get_tool_path("ffprobe", self.tools.ffprobe.as_deref()) {
            Ok(path) => path,
            Err(Error::ToolNotFound { tool }) => {
                debug!("FFprobe not found, skipping sync");
                return Ok(SyncDisposition::NotAttempted { tool });
            }
            Err(e) => return Err(e),
        };
        debug!("FFprobe used is {}", ffprobe.display());

        let ffmpeg = match tools::get_tool_path("ffmpeg", self.tools.ffmpeg.as_deref()) {
            Ok(path) => path,
            Err(Error::ToolNotFound { tool }) => {
                debug!("FFmpeg not found, skipping sync");
                return Ok(SyncDisposition::NotAttempted { tool });
            }
            Err(e) => return Err(e),
        };
        debug!("FFmpeg used is {}", ffmpeg.display());

        let engine = match tools::get_tool_path("ffsubsync", self.tools.ffsubsync.as_deref()) {
            Ok(path) => path,
            Err(Error::ToolNotFound { tool }) => {
                debug!("Alignment engine not found, skipping sync");
                return Ok(SyncDisposition::NotAttempted { tool });
            }
            Err(e) => return Err(e),
        };

        let ffmpeg_dir = ffmpeg
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let invocation = EngineInvocation::build(
            &request.video_path,
            &request.subtitle_path,
            &self.settings,
            self.vad,
            &ffmpeg_dir,
            &self.log_dir,
        );

        let result = executor::execute(&engine, &invocation)?;

        if self.settings.debug {
            return Ok(SyncDisposition::Debug(result));
        }

        match materialize::materialize(&invocation, &result, request, &self.mappings)? {
            Materialized::Swapped(report) => {
                history.record(ACTION_SYNCED, &request.media, &report)?;

                if let Some(events) = &self.events {
                    events.emit(AppEvent::SubtitlesSynced {
                        path: report.subtitle_path.clone(),
                    });
                }

                info!("{}", report.message);
                Ok(SyncDisposition::Synced(report))
            }
            Materialized::OutputMissing => Ok(SyncDisposition::OutputMissing {
                subtitle_path: request.subtitle_path.clone(),
                engine: result,
            }),
        }
    }
}
