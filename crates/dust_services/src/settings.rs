//! Settings management
//!
//! Simulation settings persist as JSON. Every section and field falls back to
//! its default when missing, so partial files are valid.

use dust_core::time::{DEFAULT_TICK_DT, TICK_RATE_HZ};
use dust_core::{Acceleration, Canvas, Color, Emitter, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimSettings {
    pub physics: PhysicsSettings,
    pub canvas: CanvasSettings,
    pub emitter: EmitterSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: f64,
    pub tick_dt: f64,
    /// Pacing for front-ends that run in real time.
    pub tick_rate_hz: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: i32,
    pub height: i32,
    pub floor_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterSettings {
    pub x: f64,
    pub y: f64,
    pub spread_radius: f64,
    pub velocity_min: f64,
    pub velocity_max: f64,
    pub angle_min: f64,
    pub angle_max: f64,
    pub lifetime: f64,
    /// RGBA, each channel in 0..=1.
    pub color: [f64; 4],
    pub size: f64,
    /// `null` emits particles without an acceleration component.
    pub acceleration: Option<[f64; 2]>,
    /// Particles per burst.
    pub burst: usize,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: dust_core::systems::DEFAULT_GRAVITY,
            tick_dt: DEFAULT_TICK_DT,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            floor_y: 23.0,
        }
    }
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self::from_emitter(&Emitter::new(40.0, 4.0), 32)
    }
}

impl EmitterSettings {
    pub fn from_emitter(emitter: &Emitter, burst: usize) -> Self {
        let c = emitter.color;
        Self {
            x: emitter.x,
            y: emitter.y,
            spread_radius: emitter.spread_radius,
            velocity_min: emitter.velocity_min,
            velocity_max: emitter.velocity_max,
            angle_min: emitter.angle_min,
            angle_max: emitter.angle_max,
            lifetime: emitter.lifetime,
            color: [c.r, c.g, c.b, c.a],
            size: emitter.size,
            acceleration: emitter.acceleration.map(|a| [a.ax, a.ay]),
            burst,
        }
    }

    pub fn to_emitter(&self) -> Emitter {
        let [r, g, b, a] = self.color;
        Emitter {
            x: self.x,
            y: self.y,
            spread_radius: self.spread_radius,
            velocity_min: self.velocity_min,
            velocity_max: self.velocity_max,
            angle_min: self.angle_min,
            angle_max: self.angle_max,
            lifetime: self.lifetime,
            color: Color::rgba(r, g, b, a),
            size: self.size,
            acceleration: self.acceleration.map(|[ax, ay]| Acceleration::new(ax, ay)),
        }
    }
}

impl SimSettings {
    /// Read and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let text = self.to_json_string()?;
        std::fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let physics = &self.physics;
        check(physics.gravity.is_finite(), "physics.gravity", "must be finite")?;
        check(
            physics.tick_dt.is_finite() && physics.tick_dt > 0.0,
            "physics.tick_dt",
            "must be positive",
        )?;
        check(physics.tick_rate_hz > 0, "physics.tick_rate_hz", "must be positive")?;

        let canvas = &self.canvas;
        check(canvas.width > 0, "canvas.width", "must be positive")?;
        check(canvas.height > 0, "canvas.height", "must be positive")?;
        check(canvas.floor_y.is_finite(), "canvas.floor_y", "must be finite")?;

        let emitter = &self.emitter;
        check(
            emitter.velocity_min <= emitter.velocity_max,
            "emitter.velocity_min",
            "must not exceed velocity_max",
        )?;
        check(emitter.spread_radius >= 0.0, "emitter.spread_radius", "must not be negative")?;
        check(emitter.lifetime >= 0.0, "emitter.lifetime", "must not be negative")?;
        check(emitter.size > 0.0, "emitter.size", "must be positive")?;
        check(
            emitter.color.iter().all(|c| (0.0..=1.0).contains(c)),
            "emitter.color",
            "channels must lie in 0..=1",
        )?;
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas.width, self.canvas.height, self.canvas.floor_y)
    }

    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            gravity: self.physics.gravity,
            tick_dt: self.physics.tick_dt,
            canvas: self.canvas(),
        }
    }
}

fn check(ok: bool, field: &'static str, reason: &str) -> Result<(), SettingsError> {
    if ok {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_simulation_defaults() {
        let settings = SimSettings::default();
        assert_eq!(settings.to_simulation_config(), SimulationConfig::default());
        assert_eq!(settings.emitter.to_emitter(), Emitter::new(40.0, 4.0));
        settings.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings = SimSettings::from_json_str(r#"{ "physics": { "gravity": 3.5 } }"#).unwrap();
        assert_eq!(settings.physics.gravity, 3.5);
        assert_eq!(settings.physics.tick_dt, DEFAULT_TICK_DT);
        assert_eq!(settings.canvas, CanvasSettings::default());
    }

    #[test]
    fn json_text_round_trips() {
        let mut settings = SimSettings::default();
        settings.canvas.width = 120;
        settings.emitter.acceleration = None;

        let text = settings.to_json_string().unwrap();
        assert_eq!(SimSettings::from_json_str(&text).unwrap(), settings);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = SimSettings::from_json_str(r#"{ "physics": { "tick_dt": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "physics.tick_dt", .. }));

        let err = SimSettings::from_json_str(r#"{ "canvas": { "width": -4 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "canvas.width", .. }));

        let err = SimSettings::from_json_str(
            r#"{ "emitter": { "velocity_min": 9.0, "velocity_max": 1.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "emitter.velocity_min", .. }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = SimSettings::from_json_str("{ physics: ").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = std::env::temp_dir().join("dust-settings-does-not-exist.json");
        match SimSettings::load(&path) {
            Err(SettingsError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("dust-settings-{}.json", std::process::id()));
        let mut settings = SimSettings::default();
        settings.physics.gravity = 1.25;
        settings.save(&path).unwrap();

        let loaded = SimSettings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }
}
