use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::burial_sequence::{BurialSequence, DepositionEvent};
use crate::constants::PhysicalConstants;
use crate::error::{BackstripError, Result};
use crate::layer::Layer;
use crate::porosity::{AthyPorosity, PorosityModel};
use crate::rock::{RockProperties, SAMPLE_ROCK_PROPERTIES};

/// Parallel input arrays describing one stratigraphic column
///
/// `ages`, `bathymetries` and `sea_levels` carry one entry per time step,
/// basement first: element 0 describes conditions before the oldest
/// deposition, element `i + 1` the deposition of layer `i`. `thicknesses`
/// and `rock_types` carry one entry per layer, oldest first; each rock type
/// indexes `rock_properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    pub ages: Vec<f64>,
    pub bathymetries: Vec<f64>,
    pub sea_levels: Vec<f64>,
    pub thicknesses: Vec<f64>,
    pub rock_types: Vec<usize>,
    pub rock_properties: Vec<RockProperties>,
    #[serde(default)]
    pub constants: PhysicalConstants,
}

impl ColumnInput {
    /// The sample column: ten layers deposited between 245 Ma and the present
    /// on a 260 Ma basement, drawn from six lithologies.
    pub fn sample() -> Self {
        Self {
            ages: vec![260.0, 245.0, 210.0, 160.0, 145.0, 125.0, 100.0, 80.0, 55.0, 45.0, 0.0],
            bathymetries: vec![
                -20.0, 0.0, 20.0, 10.0, 20.0, 20.0, 200.0, 300.0, 350.0, 325.0, 300.0,
            ],
            sea_levels: vec![10.0, 0.0, 0.0, -20.0, -40.0, 70.0, 80.0, 100.0, 50.0, 40.0, 0.0],
            thicknesses: vec![
                400.0, 750.0, 250.0, 400.0, 200.0, 900.0, 1300.0, 750.0, 250.0, 200.0,
            ],
            rock_types: vec![4, 5, 1, 4, 3, 1, 2, 0, 1, 0],
            rock_properties: SAMPLE_ROCK_PROPERTIES.clone(),
            constants: PhysicalConstants::default(),
        }
    }

    pub fn from_json_str(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let json_str = fs::read_to_string(file_path)?;
        Self::from_json_str(&json_str)
    }

    /// Number of deposited layers.
    pub fn layer_count(&self) -> usize {
        self.thicknesses.len()
    }

    pub fn validate(&self) -> Result<()> {
        let layers = self.layer_count();
        if layers == 0 {
            return Err(BackstripError::InvalidInput("column has no layers".to_string()));
        }
        for (name, len) in [
            ("ages", self.ages.len()),
            ("bathymetries", self.bathymetries.len()),
            ("sea_levels", self.sea_levels.len()),
        ] {
            if len != layers + 1 {
                return Err(BackstripError::OrderingViolation(format!(
                    "{} has {} entries, expected {} (one per layer plus basement)",
                    name,
                    len,
                    layers + 1
                )));
            }
        }
        if self.rock_types.len() != layers {
            return Err(BackstripError::OrderingViolation(format!(
                "rock_types has {} entries, expected {}",
                self.rock_types.len(),
                layers
            )));
        }

        if let Some(bad) = self
            .ages
            .iter()
            .chain(&self.bathymetries)
            .chain(&self.sea_levels)
            .find(|v| !v.is_finite())
        {
            return Err(BackstripError::InvalidInput(format!("non-finite value {} in input", bad)));
        }
        if let Some(pair) = self.ages.windows(2).find(|pair| pair[1] >= pair[0]) {
            return Err(BackstripError::OrderingViolation(format!(
                "ages must decrease strictly toward the present, got {} then {}",
                pair[0], pair[1]
            )));
        }
        if let Some(t) = self.thicknesses.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            return Err(BackstripError::InvalidInput(format!(
                "layer thickness must be positive, got {}",
                t
            )));
        }
        if let Some(rt) = self.rock_types.iter().find(|rt| **rt >= self.rock_properties.len()) {
            return Err(BackstripError::InvalidInput(format!(
                "rock type {} not in a table of {} rocks",
                rt,
                self.rock_properties.len()
            )));
        }
        for rock in &self.rock_properties {
            rock.validate()?;
        }
        self.constants.validate()
    }

    /// Build and reconstruct a burial sequence compacting by Athy's law.
    pub fn prepare_sequence(&self) -> Result<BurialSequence<AthyPorosity>> {
        self.prepare_sequence_with(AthyPorosity)
    }

    pub fn prepare_sequence_with<P: PorosityModel + Clone>(
        &self,
        model: P,
    ) -> Result<BurialSequence<P>> {
        self.validate()?;

        let mut events = Vec::with_capacity(self.layer_count());
        let layer_specs = self.thicknesses.iter().zip(&self.rock_types);
        for (i, (&thickness, &rock_type)) in layer_specs.enumerate() {
            let rock = self.rock_properties[rock_type];
            let layer = Layer::with_model(thickness, rock, model.clone())?;
            events.push(DepositionEvent::new(
                self.ages[i + 1],
                self.bathymetries[i + 1],
                self.sea_levels[i + 1],
                layer,
            ));
        }

        let mut sequence = BurialSequence::new(
            self.ages[0],
            self.sea_levels[0],
            self.bathymetries[0],
            events,
        )?;
        sequence.reconstruct_burial_history()?;
        Ok(sequence)
    }
}
