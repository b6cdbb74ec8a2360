use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Directory the engine writes its own log files into.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// SQLite database holding history and blacklist tables.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default)]
    pub subsync: SubsyncConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub path_mappings: Vec<PathMapping>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            db_path: default_db_path(),
            subsync: SubsyncConfig::default(),
            tools: ToolsConfig::default(),
            path_mappings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubsyncConfig {
    /// Pin the reference to the first audio stream and disable automatic
    /// framerate correction.
    #[serde(default)]
    pub force_audio: bool,

    /// Ask the engine for a diagnostic test-case bundle and skip the
    /// output swap entirely.
    #[serde(default)]
    pub debug: bool,

    /// Voice-activity-detection backend override. When unset the backend
    /// is probed once at startup.
    #[serde(default)]
    pub vad: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit ffmpeg path, overrides PATH lookup.
    #[serde(default)]
    pub ffmpeg: Option<PathBuf>,

    /// Explicit ffprobe path, overrides PATH lookup.
    #[serde(default)]
    pub ffprobe: Option<PathBuf>,

    /// Explicit ffsubsync engine path, overrides PATH lookup.
    #[serde(default)]
    pub ffsubsync: Option<PathBuf>,

    /// Python interpreter used by the VAD capability probe.
    #[serde(default = "default_python")]
    pub python: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: None,
            ffprobe: None,
            ffsubsync: None,
            python: default_python(),
        }
    }
}

/// A local-to-remote path prefix pair.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathMapping {
    pub local: PathBuf,
    pub remote: PathBuf,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./log")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./subalign.db")
}

fn default_python() -> String {
    "python3".to_string()
}
