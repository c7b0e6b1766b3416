use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gridglow::{GpuOptions, GpuPowerPreference, PresentMode, SurfaceSize, WindowOptions};
use serde::{Deserialize, Serialize};

use crate::cli::RunArgs;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Contents of `hero.toml`. Every key is optional; flags override the file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub window: WindowSection,
    pub gpu: GpuSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub transparent: bool,
}

impl Default for WindowSection {
    fn default() -> Self {
        let defaults = WindowOptions::default();
        Self {
            width: defaults.size.width,
            height: defaults.size.height,
            title: defaults.title,
            transparent: defaults.transparent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpuSection {
    pub power: PowerSetting,
    pub present_mode: PresentSetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSetting {
    #[default]
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentSetting {
    #[default]
    Auto,
    Fifo,
    Mailbox,
    Immediate,
}

impl From<PowerSetting> for GpuPowerPreference {
    fn from(value: PowerSetting) -> Self {
        match value {
            PowerSetting::Low => GpuPowerPreference::Low,
            PowerSetting::High => GpuPowerPreference::High,
        }
    }
}

impl From<GpuPowerPreference> for PowerSetting {
    fn from(value: GpuPowerPreference) -> Self {
        match value {
            GpuPowerPreference::Low => PowerSetting::Low,
            GpuPowerPreference::High => PowerSetting::High,
        }
    }
}

impl From<PresentSetting> for PresentMode {
    fn from(value: PresentSetting) -> Self {
        match value {
            PresentSetting::Auto => PresentMode::Auto,
            PresentSetting::Fifo => PresentMode::Fifo,
            PresentSetting::Mailbox => PresentMode::Mailbox,
            PresentSetting::Immediate => PresentMode::Immediate,
        }
    }
}

impl From<PresentMode> for PresentSetting {
    fn from(value: PresentMode) -> Self {
        match value {
            PresentMode::Auto => PresentSetting::Auto,
            PresentMode::Fifo => PresentSetting::Fifo,
            PresentMode::Mailbox => PresentSetting::Mailbox,
            PresentMode::Immediate => PresentSetting::Immediate,
        }
    }
}

impl HeroConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    /// Loads `explicit` if given (it must exist), otherwise `default_path`
    /// when present, otherwise built-in defaults.
    pub fn resolve(explicit: Option<&Path>, default_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        if default_path.is_file() {
            return Self::load_file(default_path);
        }
        tracing::debug!(
            path = %default_path.display(),
            "no config file found; using defaults"
        );
        Ok(Self::default())
    }

    pub fn apply_overrides(&mut self, args: &RunArgs) {
        if let Some(size) = args.size {
            self.window.width = size.width;
            self.window.height = size.height;
        }
        if let Some(title) = &args.title {
            self.window.title = title.clone();
        }
        if let Some(power) = args.gpu_power {
            self.gpu.power = power.into();
        }
        if let Some(present_mode) = args.present_mode {
            self.gpu.present_mode = present_mode.into();
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialise configuration")
    }

    pub fn window_options(&self) -> WindowOptions {
        WindowOptions {
            size: SurfaceSize::new(self.window.width, self.window.height),
            title: self.window.title.clone(),
            transparent: self.window.transparent,
            gpu: GpuOptions {
                power: self.gpu.power.into(),
                present_mode: self.gpu.present_mode.into(),
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_uses_defaults() {
        let config = HeroConfig::from_toml_str("").unwrap();
        assert_eq!(config, HeroConfig::default());
        assert_eq!(config.window_options(), WindowOptions::default());
    }

    #[test]
    fn parses_partial_sections() {
        let config = HeroConfig::from_toml_str(
            r#"
[window]
width = 800
title = "Landing"

[gpu]
power = "high"
present_mode = "mailbox"
"#,
        )
        .unwrap();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, WindowSection::default().height);
        assert_eq!(config.window.title, "Landing");
        let options = config.window_options();
        assert_eq!(options.gpu.power, GpuPowerPreference::High);
        assert_eq!(options.gpu.present_mode, PresentMode::Mailbox);
    }

    #[test]
    fn rejects_unknown_keys_and_zero_sizes() {
        let err = HeroConfig::from_toml_str("[window]\ncolour = \"red\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = HeroConfig::from_toml_str("[window]\nheight = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        assert!(HeroConfig::from_toml_str("[gpu]\npower = \"turbo\"\n").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = HeroConfig::from_toml_str("[window]\ntitle = \"File\"\n").unwrap();
        let args = RunArgs {
            size: Some(SurfaceSize::new(320, 240)),
            title: Some("Flag".to_string()),
            present_mode: Some(PresentMode::Immediate),
            ..RunArgs::default()
        };
        config.apply_overrides(&args);

        assert_eq!((config.window.width, config.window.height), (320, 240));
        assert_eq!(config.window.title, "Flag");
        assert_eq!(config.gpu.power, PowerSetting::Low);
        assert_eq!(config.gpu.present_mode, PresentSetting::Immediate);
    }

    #[test]
    fn resolve_tolerates_missing_default_but_not_explicit() {
        let dir = TempDir::new().unwrap();
        let default_path = dir.path().join("hero.toml");

        let config = HeroConfig::resolve(None, &default_path).unwrap();
        assert_eq!(config, HeroConfig::default());

        let missing = dir.path().join("missing.toml");
        assert!(HeroConfig::resolve(Some(&missing), &default_path).is_err());

        fs::write(&default_path, "[window]\ntransparent = false\n").unwrap();
        let config = HeroConfig::resolve(None, &default_path).unwrap();
        assert!(!config.window.transparent);
    }

    #[test]
    fn serialised_config_round_trips() {
        let mut config = HeroConfig::default();
        config.gpu.power = PowerSetting::High;
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("power = \"high\""));
        assert_eq!(HeroConfig::from_toml_str(&text).unwrap(), config);
    }
}
