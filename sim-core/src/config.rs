use crate::{color::Color, error::ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pointer distance (pixels) under which particles react to the pointer.
pub const INTERACTION_RADIUS: f32 = 100.0;
/// Pair distance (pixels) under which two particles are connected by a line.
pub const CONNECTION_RADIUS: f32 = 100.0;
/// Extra radius at full pointer force.
pub const RADIUS_BOOST: f32 = 2.0;
/// Extra opacity per frame at full pointer force.
pub const OPACITY_BOOST: f32 = 0.3;
/// Opacity lost per frame while outside the interaction radius.
pub const OPACITY_DECAY: f32 = 0.01;
pub const MIN_OPACITY: f32 = 0.2;
pub const MAX_OPACITY: f32 = 1.0;
/// Upper bound of the opacity a particle spawns with.
pub const MAX_SPAWN_OPACITY: f32 = 0.7;
/// Alpha (out of 255) of a connection line between two coincident particles.
pub const CONNECTION_INTENSITY: f32 = 50.0;
pub const CONNECTION_WIDTH: f32 = 0.5;
/// Pool size from which the connection pass switches to grid bucketing.
pub const GRID_THRESHOLD: usize = 256;

/// Construction-time options of a [`crate::field::ParticleField`].
///
/// Every field is optional when deserializing; missing keys take their
/// default. Keys are camelCase (`particleCount`, `particleColor`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Number of particles in the pool.
    pub particle_count: usize,
    /// Base fill/stroke color.
    pub particle_color: Color,
    /// Upper bound added to the base radius sampling range `[1, size + 1]`.
    pub particle_size: f32,
    /// Multiplier on the per-axis velocity sampling range `[-0.5, 0.5]`.
    pub animation_speed: f32,
    /// Enables pointer proximity effects and connecting lines.
    pub interactive: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            particle_color: Color::INDIGO,
            particle_size: 2.0,
            animation_speed: 1.0,
            interactive: true,
        }
    }
}

impl FieldConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json_str(&json)?;
        log::debug!("loaded field config from {}: {cfg:?}", path.display());
        Ok(cfg)
    }

    /// Rejects negative or non-finite sampling parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.animation_speed.is_finite() || self.animation_speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.animation_speed));
        }
        if !self.particle_size.is_finite() || self.particle_size < 0.0 {
            return Err(ConfigError::InvalidSize(self.particle_size));
        }
        Ok(())
    }
}
