use serde::{Deserialize, Serialize};

use crate::error::{BackstripError, Result};

pub const GRAVITY_M_S2: f64 = 9.81;
pub const WATER_DENSITY_KGM3: f64 = 1000.0;
pub const MANTLE_DENSITY_KGM3: f64 = 3300.0;

// Gauss-Legendre node offset for the 2-point rule (1/sqrt(3))
pub const GAUSS_LEGENDRE_2_NODE: f64 = 0.5773502691896257;

// Newton solve defaults for layer re-compaction
pub const DEFAULT_NEWTON_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_NEWTON_MAX_ITERATIONS: usize = 100;

/// Physical constants shared by every loading and isostasy computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    pub gravity: f64,
    pub water_density: f64,
    pub mantle_density: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_M_S2,
            water_density: WATER_DENSITY_KGM3,
            mantle_density: MANTLE_DENSITY_KGM3,
        }
    }
}

impl PhysicalConstants {
    pub fn new(gravity: f64, water_density: f64, mantle_density: f64) -> Result<Self> {
        let constants = Self {
            gravity,
            water_density,
            mantle_density,
        };
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("gravity", self.gravity),
            ("water_density", self.water_density),
            ("mantle_density", self.mantle_density),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BackstripError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.mantle_density <= self.water_density {
            return Err(BackstripError::InvalidInput(format!(
                "mantle density {} must exceed water density {}",
                self.mantle_density, self.water_density
            )));
        }
        Ok(())
    }

    /// Density contrast that resists isostatic deflection (kg/m³)
    pub fn mantle_water_contrast(&self) -> f64 {
        self.mantle_density - self.water_density
    }
}
