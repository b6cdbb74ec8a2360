//! Voice-activity-detection backend selection.
//!
//! The engine accepts either backend through the same `--vad` parameter; the
//! webrtc one is faster and more accurate but requires the `webrtcvad` module
//! in the engine's Python environment. The choice is a quality trade-off
//! only, probed once at startup and injected into the orchestrator.

use std::process::{Command, Stdio};
use tracing::debug;

/// Detection backend passed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VadBackend {
    /// Subtitle-guided detection refined with webrtcvad.
    SubsThenWebrtc,
    /// Subtitle-guided detection refined with auditok. Slower, no extra
    /// dependencies.
    SubsThenAuditok,
}

impl VadBackend {
    /// The engine-facing identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            VadBackend::SubsThenWebrtc => "subs_then_webrtc",
            VadBackend::SubsThenAuditok => "subs_then_auditok",
        }
    }

    /// Probe whether the accelerated backend is usable in the engine's
    /// Python environment. Any probe failure falls back to auditok.
    pub fn detect(python: &str) -> Self {
        let probe = Command::new(python)
            .args(["-c", "import webrtcvad"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        let backend = match probe {
            Ok(status) if status.success() => VadBackend::SubsThenWebrtc,
            _ => VadBackend::SubsThenAuditok,
        };
        debug!("Selected VAD backend: {}", backend.as_str());
        backend
    }

    /// Resolve the backend from an optional config override, probing only
    /// when no override is set.
    pub fn resolve(configured: Option<&str>, python: &str) -> Self {
        match configured {
            Some("subs_then_webrtc") | Some("webrtc") => VadBackend::SubsThenWebrtc,
            Some("subs_then_auditok") | Some("auditok") => VadBackend::SubsThenAuditok,
            _ => Self::detect(python),
        }
    }
}

impl std::fmt::Display for VadBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
