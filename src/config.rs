use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// Easing applied to the proximity raw scale. The string forms are
/// accepted case-insensitively in the config file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum EasingKind {
    #[strum(serialize = "Linear", serialize = "none")]
    Linear,
    #[strum(serialize = "EaseIn", serialize = "in")]
    EaseIn,
    #[strum(serialize = "EaseOut", serialize = "out")]
    EaseOut,
    #[strum(serialize = "EaseInOut", serialize = "inout")]
    EaseInOut,
}

impl EasingKind {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingKind::Linear => t,
            EasingKind::EaseIn => t * t,
            EasingKind::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EasingKind::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Proximity-effect tuning. These are empirically tuned values with no
/// documented derivation; they are kept configurable rather than
/// reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProximityTuning {
    /// Fraction of the item padding used as the padded-edge margin.
    pub edge_padding_factor: f64,
    /// Viewport extent the activation radius is normalized against.
    pub reference_extent: f64,
    /// Items further than `cutoff * diameter` past an edge clamp to the
    /// minimum item scaling outright.
    pub clamp_cutoff_factor: f64,
    pub easing: EasingKind,
}

impl Default for ProximityTuning {
    fn default() -> Self {
        Self {
            edge_padding_factor: 0.4,
            reference_extent: 320.0,
            clamp_cutoff_factor: 2.5,
            easing: EasingKind::EaseOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tuning {
    pub item_diameter: f64,
    pub item_padding: f64,
    /// Scale an item shrinks toward as it falls off the viewport edge.
    pub minimum_item_scaling: f64,
    /// Double-tapping at or above this zoom (and away from minimum zoom)
    /// zooms back out to show-all instead of centering.
    pub launch_zoom_threshold: f64,
    /// Weight of the ideal (item-centered) offset when a deceleration is
    /// predicted to settle outside the valid content rect.
    pub settle_bias: f64,
    /// Labels hide below this effective item scale.
    pub label_visibility_threshold: f64,
    pub proximity: ProximityTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            item_diameter: 128.0,
            item_padding: 48.0,
            minimum_item_scaling: 0.5,
            launch_zoom_threshold: 0.4,
            settle_bias: 0.8,
            label_visibility_threshold: 0.75,
            proximity: ProximityTuning::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("io", "springboard", "springboard").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_tuning() -> Result<Tuning, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("SPRINGBOARD"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Tuning {
    match load_tuning() {
        Ok(t) => t,
        Err(e) => {
            log::warn!("Falling back to default tuning: {}", e);
            Tuning::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Writes the bundled defaults unless a config file already exists.
fn write_default_config_to(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"easeout\"", EasingKind::EaseOut),
            ("\"EaseOut\"", EasingKind::EaseOut),
            ("\"out\"", EasingKind::EaseOut),
            ("\"linear\"", EasingKind::Linear),
            ("\"NONE\"", EasingKind::Linear),
            ("\"inout\"", EasingKind::EaseInOut),
        ];

        for (json, expected) in cases {
            let deserialized: EasingKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_ease_out_matches_quadratic_falloff() {
        let ease = EasingKind::EaseOut;
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert!((ease.apply(0.5) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed: Tuning = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(parsed, Tuning::default());
    }

    #[test]
    fn test_write_default_config_keeps_existing_file() {
        let dir = std::env::temp_dir().join(format!("springboard-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs_err::remove_dir_all(&dir);

        write_default_config_to(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        // A second call must not clobber user edits.
        fs_err::write(&path, "item_diameter = 96.0").unwrap();
        write_default_config_to(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "item_diameter = 96.0");

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed: Tuning = config::Config::builder()
            .add_source(config::File::from_str(
                "item_diameter = 96.0",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(parsed.item_diameter, 96.0);
        assert_eq!(parsed.item_padding, Tuning::default().item_padding);
        assert_eq!(parsed.proximity, ProximityTuning::default());
    }
}
