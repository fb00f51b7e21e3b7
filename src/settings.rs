//! Optional config file at `~/.config/quakeglobe/config.toml`. Every field
//! is optional; CLI flags win over the file.

use serde::Deserialize;
use std::io;
use std::path::PathBuf;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub globe: GlobeSettings,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Default catalog file for `play` when no path is given.
    pub catalog: Option<PathBuf>,
    pub minutes: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct GlobeSettings {
    pub rotate: Option<f64>,
    pub tilt: Option<f64>,
    pub lon: Option<f64>,
}

impl Settings {
    /// Load the config file if present; a missing file yields defaults, a
    /// malformed file is an error.
    pub fn load() -> io::Result<Self> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        toml::from_str(&text).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {e}", path.display()),
            )
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quakeglobe").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let s: Settings = toml::from_str("").unwrap();
        assert!(s.playback.catalog.is_none());
        assert!(s.playback.minutes.is_none());
        assert!(s.globe.rotate.is_none());
    }

    #[test]
    fn partial_sections_parse() {
        let s: Settings = toml::from_str(
            "[playback]\nminutes = 6.0\n\n[globe]\ntilt = -20.0\n",
        )
        .unwrap();
        assert_eq!(s.playback.minutes, Some(6.0));
        assert_eq!(s.globe.tilt, Some(-20.0));
        assert!(s.globe.rotate.is_none());
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let s: Settings = toml::from_str("[playback]\nfuture_knob = 1\n").unwrap();
        assert!(s.playback.minutes.is_none());
    }
}
