use std::path::Path;

use mimic_core::VoiceConfig;

use crate::error::ConfigError;

/// Load settings from a TOML file. No path, or a path that does not exist,
/// gives the defaults.
pub fn load_config(path: Option<&Path>) -> Result<VoiceConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(VoiceConfig::default());
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("no config at {}, using defaults", path.display());
            return Ok(VoiceConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn to_toml(config: &VoiceConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

pub fn log_config(config: &VoiceConfig) {
    tracing::info!(frequency = config.voice.frequency, "voice");
    tracing::info!(
        keep_files = config.capture.keep_files_between_sessions,
        scan_interval = ?config.scan_interval(),
        custom_sounds = config.capture.add_custom_sounds,
        custom_weight = config.custom_weight(),
        "capture"
    );
    tracing::info!(
        inside = config.modded.inside,
        outside = config.modded.outside,
        daytime = config.modded.daytime,
        nighttime = config.modded.nighttime,
        "modded actors"
    );
    for (name, enabled) in &config.categories {
        tracing::info!("{name}: {enabled}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("mimic.toml"))).unwrap();
        assert_eq!(cfg, VoiceConfig::default());
        assert_eq!(load_config(None).unwrap(), VoiceConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mimic.toml");
        std::fs::write(
            &path,
            "[voice]\nfrequency = 2.5\n\n[categories]\nBracken = false\n",
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.voice.frequency, 2.5);
        assert_eq!(cfg.categories.get("Bracken"), Some(&false));
        assert!(cfg.modded.inside);
        assert_eq!(cfg.capture.custom_sound_weight, 50.0);
    }

    #[test]
    fn test_weight_accepts_any_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mimic.toml");
        let load = |weight: &str| {
            std::fs::write(
                &path,
                format!("[capture]\nadd_custom_sounds = true\ncustom_sound_weight = {weight}\n"),
            )
            .unwrap();
            load_config(Some(&path)).unwrap()
        };

        let cfg = load("300");
        assert_eq!(cfg.custom_weight(), 100.0);
        assert!(!cfg.recording_enabled());

        let cfg = load("-1");
        assert_eq!(cfg.custom_weight(), 0.0);
        assert!(!cfg.custom_sounds_enabled());

        let cfg = load("50.0");
        assert_eq!(cfg.custom_weight(), 50.0);
        assert!(cfg.recording_enabled() && cfg.custom_sounds_enabled());

        let cfg = load("12.5");
        assert_eq!(cfg.custom_weight(), 12.5);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mimic.toml");
        std::fs::write(&path, "[voice]\nfrequency = \"loud\"\n").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_toml_roundtrip_keeps_categories() {
        let mut cfg = VoiceConfig::default();
        cfg.categories.insert("Coil-Head".to_string(), false);
        let text = to_toml(&cfg).unwrap();
        assert!(text.contains("[capture]"));
        let back: VoiceConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
