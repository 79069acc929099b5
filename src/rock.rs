// src/rock.rs - Rock compaction properties and the built-in sample rock table

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{BackstripError, Result};

/// Compaction and density parameters for one lithology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RockProperties {
    pub surface_porosity: f64, // fraction at zero burial, [0, 1)
    pub compaction_rate: f64,  // 1/m
    pub sediment_density: f64, // grain density, kg/m³
}

impl RockProperties {
    pub fn new(surface_porosity: f64, compaction_rate: f64, sediment_density: f64) -> Result<Self> {
        let rock = Self {
            surface_porosity,
            compaction_rate,
            sediment_density,
        };
        rock.validate()?;
        Ok(rock)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.surface_porosity) {
            return Err(BackstripError::InvalidInput(format!(
                "surface porosity must lie in [0, 1), got {}",
                self.surface_porosity
            )));
        }
        if !self.compaction_rate.is_finite() || self.compaction_rate < 0.0 {
            return Err(BackstripError::InvalidInput(format!(
                "compaction rate must be non-negative, got {}",
                self.compaction_rate
            )));
        }
        if !self.sediment_density.is_finite() || self.sediment_density <= 0.0 {
            return Err(BackstripError::InvalidInput(format!(
                "sediment density must be positive, got {}",
                self.sediment_density
            )));
        }
        Ok(())
    }

    /// A rock with no pore space; it never compacts.
    pub fn non_porous(sediment_density: f64) -> Self {
        Self {
            surface_porosity: 0.0,
            compaction_rate: 0.0,
            sediment_density,
        }
    }
}

/// The six lithologies of the sample column, indexed by rock type.
pub static SAMPLE_ROCK_PROPERTIES: Lazy<Vec<RockProperties>> = Lazy::new(|| {
    vec![
        RockProperties {
            surface_porosity: 0.63,
            compaction_rate: 0.51e-3,
            sediment_density: 2720.0,
        },
        RockProperties {
            surface_porosity: 0.49,
            compaction_rate: 0.27e-3,
            sediment_density: 2650.0,
        },
        RockProperties {
            surface_porosity: 0.70,
            compaction_rate: 0.71e-3,
            sediment_density: 2710.0,
        },
        RockProperties {
            surface_porosity: 0.40,
            compaction_rate: 0.60e-3,
            sediment_density: 2720.0,
        },
        RockProperties {
            surface_porosity: 0.20,
            compaction_rate: 0.60e-3,
            sediment_density: 2870.0,
        },
        RockProperties {
            surface_porosity: 0.05,
            compaction_rate: 0.20e-3,
            sediment_density: 2960.0,
        },
    ]
});

pub fn get_sample_rock(rock_type: usize) -> Option<&'static RockProperties> {
    SAMPLE_ROCK_PROPERTIES.get(rock_type)
}
