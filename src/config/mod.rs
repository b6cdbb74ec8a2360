mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./subalign.toml",
        "~/.config/subalign/config.toml",
        "/etc/subalign/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if let Some(vad) = &config.subsync.vad {
        let known = ["subs_then_webrtc", "subs_then_auditok", "webrtc", "auditok"];
        if !known.contains(&vad.as_str()) {
            anyhow::bail!("Unknown VAD backend '{}'", vad);
        }
    }

    if config.tools.python.is_empty() {
        anyhow::bail!("tools.python cannot be empty");
    }

    for mapping in &config.path_mappings {
        if mapping.local.as_os_str().is_empty() || mapping.remote.as_os_str().is_empty() {
            anyhow::bail!("Path mappings must have non-empty local and remote sides");
        }
    }

    if !config.log_dir.exists() {
        tracing::warn!("Log directory does not exist: {:?}", config.log_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml = r#"
            log_dir = "/var/log/subalign"
            db_path = "/var/lib/subalign/subalign.db"

            [subsync]
            force_audio = true
            debug = false
            vad = "subs_then_webrtc"

            [tools]
            ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
            python = "python3.11"

            [[path_mappings]]
            local = "/mnt/media"
            remote = "/data/media"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        validate_config(&config).unwrap();

        assert!(config.subsync.force_audio);
        assert!(!config.subsync.debug);
        assert_eq!(config.subsync.vad.as_deref(), Some("subs_then_webrtc"));
        assert_eq!(config.tools.python, "python3.11");
        assert_eq!(config.path_mappings.len(), 1);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.subsync.force_audio);
        assert!(!config.subsync.debug);
        assert!(config.subsync.vad.is_none());
        assert_eq!(config.tools.python, "python3");
        assert!(config.path_mappings.is_empty());
    }

    #[test]
    fn rejects_unknown_vad() {
        let config: Config = toml::from_str("[subsync]\nvad = \"bogus\"").unwrap();
        assert!(validate_config(&config).is_err());
    }
}
