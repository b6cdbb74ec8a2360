//! Engine argument marshaling.
//!
//! Pure path and string construction; nothing here touches the filesystem.

use crate::config::SubsyncConfig;
use crate::sync::backend::VadBackend;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the input stem for the engine's output artifact.
const SYNCED_SUFFIX: &str = "synced.srt";

/// A fully resolved engine invocation.
#[derive(Debug, Clone)]
pub struct EngineInvocation {
    /// Reference media the subtitle is aligned against.
    pub reference: PathBuf,
    /// Input subtitle.
    pub srtin: PathBuf,
    /// Derived output subtitle (`<stem>.synced.srt` next to the input).
    pub srtout: PathBuf,
    /// Directory containing the ffmpeg binaries.
    pub ffmpeg_dir: PathBuf,
    /// Detection backend identifier.
    pub vad: VadBackend,
    /// Directory for the engine's own logs.
    pub log_dir: PathBuf,
    /// Disable automatic framerate correction (`force_audio`).
    pub no_fix_framerate: bool,
    /// Pin the reference to a specific stream (`force_audio` pins `a:0`).
    pub reference_stream: Option<String>,
    /// Request a diagnostic test-case bundle (`debug`).
    pub make_test_case: bool,
}

impl EngineInvocation {
    /// Build the invocation for a subtitle/reference pair.
    pub fn build(
        reference: &Path,
        srtin: &Path,
        settings: &SubsyncConfig,
        vad: VadBackend,
        ffmpeg_dir: &Path,
        log_dir: &Path,
    ) -> Self {
        Self {
            reference: reference.to_path_buf(),
            srtin: srtin.to_path_buf(),
            srtout: derived_output_path(srtin),
            ffmpeg_dir: ffmpeg_dir.to_path_buf(),
            vad,
            log_dir: log_dir.to_path_buf(),
            no_fix_framerate: settings.force_audio,
            reference_stream: settings.force_audio.then(|| "a:0".to_string()),
            make_test_case: settings.debug,
        }
    }

    /// Render the engine's command-line arguments.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.reference.clone().into(),
            "-i".into(),
            self.srtin.clone().into(),
            "-o".into(),
            self.srtout.clone().into(),
            "--ffmpegpath".into(),
            self.ffmpeg_dir.clone().into(),
            "--vad".into(),
            self.vad.as_str().into(),
            "--log-dir-path".into(),
            self.log_dir.clone().into(),
        ];

        if self.no_fix_framerate {
            args.push("--no-fix-framerate".into());
        }
        if let Some(stream) = &self.reference_stream {
            args.push("--reference-stream".into());
            args.push(stream.into());
        }
        if self.make_test_case {
            args.push("--make-test-case".into());
        }

        args
    }
}

/// Output path convention: input stem with `.synced.srt` appended, in the
/// input's directory.
pub fn derived_output_path(srtin: &Path) -> PathBuf {
    let stem = srtin
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    srtin.with_file_name(format!("{}.{}", stem, SYNCED_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(force_audio: bool, debug: bool) -> SubsyncConfig {
        SubsyncConfig {
            force_audio,
            debug,
            vad: None,
        }
    }

    fn args_as_strings(invocation: &EngineInvocation) -> Vec<String> {
        invocation
            .to_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn derived_path_replaces_extension() {
        assert_eq!(
            derived_output_path(Path::new("/media/movie.srt")),
            PathBuf::from("/media/movie.synced.srt")
        );
        // Only the last extension is stripped.
        assert_eq!(
            derived_output_path(Path::new("/media/movie.en.srt")),
            PathBuf::from("/media/movie.en.synced.srt")
        );
    }

    #[test]
    fn base_arguments() {
        let invocation = EngineInvocation::build(
            Path::new("/media/movie.mkv"),
            Path::new("/media/movie.srt"),
            &settings(false, false),
            VadBackend::SubsThenAuditok,
            Path::new("/usr/bin"),
            Path::new("/var/log/subalign"),
        );

        let args = args_as_strings(&invocation);
        assert_eq!(
            args,
            vec![
                "/media/movie.mkv",
                "-i",
                "/media/movie.srt",
                "-o",
                "/media/movie.synced.srt",
                "--ffmpegpath",
                "/usr/bin",
                "--vad",
                "subs_then_auditok",
                "--log-dir-path",
                "/var/log/subalign",
            ]
        );
    }

    #[test]
    fn force_audio_appends_stream_pinning() {
        let invocation = EngineInvocation::build(
            Path::new("/media/movie.mkv"),
            Path::new("/media/movie.srt"),
            &settings(true, false),
            VadBackend::SubsThenWebrtc,
            Path::new("/usr/bin"),
            Path::new("/var/log/subalign"),
        );

        let args = args_as_strings(&invocation);
        let tail = &args[args.len() - 3..];
        assert_eq!(tail, ["--no-fix-framerate", "--reference-stream", "a:0"]);
    }

    #[test]
    fn debug_appends_test_case_flag() {
        let invocation = EngineInvocation::build(
            Path::new("/media/movie.mkv"),
            Path::new("/media/movie.srt"),
            &settings(false, true),
            VadBackend::SubsThenWebrtc,
            Path::new("/usr/bin"),
            Path::new("/var/log/subalign"),
        );

        let args = args_as_strings(&invocation);
        assert_eq!(args.last().unwrap(), "--make-test-case");
        assert!(!args.contains(&"--no-fix-framerate".to_string()));
    }
}
