//! Tunable parameters for a confetti session.
//!
//! [`FieldConfig`] follows the JSON-params convention used throughout the
//! workspace: build it from a loose `serde_json::Value`, then
//! [`validate`](FieldConfig::validate) before use.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ConfettiError;
use crate::palette::Palette;
use crate::params::{param_f64, param_string, param_usize};

pub const DEFAULT_PARTICLE_COUNT: usize = 150;
pub const DEFAULT_SIZE_MIN: f64 = 4.0;
pub const DEFAULT_SIZE_MAX: f64 = 12.0;
pub const DEFAULT_VX_MIN: f64 = -2.0;
pub const DEFAULT_VX_MAX: f64 = 2.0;
pub const DEFAULT_VY_MIN: f64 = 2.0;
pub const DEFAULT_VY_MAX: f64 = 7.0;
pub const DEFAULT_SPIN_MAX: f64 = 0.05;
pub const DEFAULT_PALETTE: &str = "confetti";

/// Largest `particle_count` a config may ask for.
pub const MAX_PARTICLE_COUNT: usize = 10_000;

/// Ranges every particle attribute is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub size_min: f64,
    pub size_max: f64,
    pub vx_min: f64,
    pub vx_max: f64,
    pub vy_min: f64,
    pub vy_max: f64,
    /// Spin is drawn from `[-spin_max, spin_max)` radians per frame.
    pub spin_max: f64,
    pub palette: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            vx_min: DEFAULT_VX_MIN,
            vx_max: DEFAULT_VX_MAX,
            vy_min: DEFAULT_VY_MIN,
            vy_max: DEFAULT_VY_MAX,
            spin_max: DEFAULT_SPIN_MAX,
            palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

impl FieldConfig {
    /// Builds a config from a JSON object, using defaults for missing keys.
    ///
    /// Does not validate; call [`validate`](Self::validate) afterwards.
    pub fn from_json(params: &Value) -> Self {
        Self {
            particle_count: param_usize(params, "particle_count", DEFAULT_PARTICLE_COUNT),
            size_min: param_f64(params, "size_min", DEFAULT_SIZE_MIN),
            size_max: param_f64(params, "size_max", DEFAULT_SIZE_MAX),
            vx_min: param_f64(params, "vx_min", DEFAULT_VX_MIN),
            vx_max: param_f64(params, "vx_max", DEFAULT_VX_MAX),
            vy_min: param_f64(params, "vy_min", DEFAULT_VY_MIN),
            vy_max: param_f64(params, "vy_max", DEFAULT_VY_MAX),
            spin_max: param_f64(params, "spin_max", DEFAULT_SPIN_MAX),
            palette: param_string(params, "palette", DEFAULT_PALETTE),
        }
    }

    /// Checks every range is non-empty and finite, the particle count is
    /// within [`MAX_PARTICLE_COUNT`], and the palette exists.
    pub fn validate(&self) -> Result<(), ConfettiError> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfettiError::InvalidConfig(format!(
                "particle_count must be at most {MAX_PARTICLE_COUNT}, got {}",
                self.particle_count
            )));
        }
        check_range("size", self.size_min, self.size_max)?;
        check_range("vx", self.vx_min, self.vx_max)?;
        check_range("vy", self.vy_min, self.vy_max)?;
        if self.size_min <= 0.0 {
            return Err(ConfettiError::InvalidConfig(format!(
                "size_min must be positive, got {}",
                self.size_min
            )));
        }
        if !self.spin_max.is_finite() || self.spin_max < 0.0 {
            return Err(ConfettiError::InvalidConfig(format!(
                "spin_max must be finite and non-negative, got {}",
                self.spin_max
            )));
        }
        self.palette()?;
        Ok(())
    }

    /// Resolves the configured palette name.
    pub fn palette(&self) -> Result<Palette, ConfettiError> {
        Palette::from_name(&self.palette)
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "particle_count": self.particle_count,
            "size_min": self.size_min,
            "size_max": self.size_max,
            "vx_min": self.vx_min,
            "vx_max": self.vx_max,
            "vy_min": self.vy_min,
            "vy_max": self.vy_max,
            "spin_max": self.spin_max,
            "palette": self.palette,
        })
    }

    /// Schema describing each parameter's type, default and meaning.
    pub fn param_schema() -> Value {
        json!({
            "particle_count": {
                "type": "integer", "default": DEFAULT_PARTICLE_COUNT,
                "minimum": 0, "maximum": MAX_PARTICLE_COUNT,
                "description": "Fixed number of confetti pieces in the field"
            },
            "size_min": {
                "type": "number", "default": DEFAULT_SIZE_MIN,
                "description": "Smallest piece edge length in pixels (inclusive)"
            },
            "size_max": {
                "type": "number", "default": DEFAULT_SIZE_MAX,
                "description": "Largest piece edge length in pixels (exclusive)"
            },
            "vx_min": {
                "type": "number", "default": DEFAULT_VX_MIN,
                "description": "Horizontal drift per frame, lower bound"
            },
            "vx_max": {
                "type": "number", "default": DEFAULT_VX_MAX,
                "description": "Horizontal drift per frame, upper bound"
            },
            "vy_min": {
                "type": "number", "default": DEFAULT_VY_MIN,
                "description": "Fall speed per frame, lower bound"
            },
            "vy_max": {
                "type": "number", "default": DEFAULT_VY_MAX,
                "description": "Fall speed per frame, upper bound"
            },
            "spin_max": {
                "type": "number", "default": DEFAULT_SPIN_MAX,
                "description": "Maximum rotation per frame in radians, either direction"
            },
            "palette": {
                "type": "string", "default": DEFAULT_PALETTE,
                "enum": Palette::list_names(),
                "description": "Built-in palette pieces pick their color from"
            }
        })
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), ConfettiError> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(ConfettiError::InvalidConfig(format!(
            "{name}_min must be < {name}_max and both finite, got [{min}, {max})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_greeting_page_values() {
        let c = FieldConfig::default();
        assert_eq!(c.particle_count, 150);
        assert_eq!((c.size_min, c.size_max), (4.0, 12.0));
        assert_eq!((c.vx_min, c.vx_max), (-2.0, 2.0));
        assert_eq!((c.vy_min, c.vy_max), (2.0, 7.0));
        assert_eq!(c.spin_max, 0.05);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn from_json_empty_object_gives_defaults() {
        assert_eq!(FieldConfig::from_json(&json!({})), FieldConfig::default());
    }

    #[test]
    fn from_json_overrides_given_keys() {
        let c = FieldConfig::from_json(&json!({
            "particle_count": 20,
            "vy_max": 9,
            "palette": "party"
        }));
        assert_eq!(c.particle_count, 20);
        assert_eq!(c.vy_max, 9.0);
        assert_eq!(c.palette, "party");
        assert_eq!(c.vy_min, DEFAULT_VY_MIN);
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let c = FieldConfig {
            vy_min: 7.0,
            vy_max: 2.0,
            ..FieldConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfettiError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_non_positive_size() {
        let c = FieldConfig {
            size_min: 0.0,
            ..FieldConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_spin() {
        let c = FieldConfig {
            spin_max: -0.1,
            ..FieldConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_palette() {
        let c = FieldConfig {
            palette: "nope".into(),
            ..FieldConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfettiError::UnknownPalette(_))));
    }

    #[test]
    fn validate_rejects_excessive_particle_count() {
        let c = FieldConfig::from_json(&json!({"particle_count": 1u64 << 62}));
        assert!(matches!(c.validate(), Err(ConfettiError::InvalidConfig(_))));
        let at_cap = FieldConfig {
            particle_count: MAX_PARTICLE_COUNT,
            ..FieldConfig::default()
        };
        assert!(at_cap.validate().is_ok());
        let over = FieldConfig {
            particle_count: MAX_PARTICLE_COUNT + 1,
            ..FieldConfig::default()
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn zero_particles_is_a_valid_config() {
        let c = FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn params_round_trip_through_from_json() {
        let c = FieldConfig::from_json(&json!({"particle_count": 12, "spin_max": 0.2}));
        assert_eq!(FieldConfig::from_json(&c.params()), c);
    }

    #[test]
    fn schema_lists_every_param() {
        let schema = FieldConfig::param_schema();
        for key in FieldConfig::default().params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
        assert_eq!(schema["particle_count"]["default"], 150);
        assert_eq!(schema["particle_count"]["maximum"], MAX_PARTICLE_COUNT);
    }
}
