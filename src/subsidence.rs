//! Backstripping: tectonic subsidence through time.
//!
//! For every deposition event the solver strips the younger layers, replays
//! the remaining column from the surface, and removes the Airy isostatic
//! response to the sediment and eustatic water loads.

use serde::{Deserialize, Serialize};

use crate::burial_sequence::BurialSequence;
use crate::constants::PhysicalConstants;
use crate::error::{BackstripError, Result};
use crate::layer::NewtonSettings;
use crate::porosity::PorosityModel;

/// Airy isostatic deflection under a sediment load plus a eustatic water column.
pub fn compute_deflection(
    sediment_weight: f64,
    sea_level_change: f64,
    constants: &PhysicalConstants,
) -> f64 {
    let water_load = constants.gravity * constants.water_density * sea_level_change;
    let total_weight = sediment_weight + water_load;
    total_weight / (constants.gravity * constants.mantle_water_contrast())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub constants: PhysicalConstants,
    pub newton: NewtonSettings,
    /// Print one trace line per time step.
    pub debug: bool,
}

/// Subsidence history, index 0 being the most recent deposition event and
/// the last index the oldest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubsidenceResult {
    pub ages: Vec<f64>,
    pub subsidence: Vec<f64>,
    /// Decompacted layer thicknesses of the column at each event, shallowest
    /// layer first. Entry `i` holds `len() - i` layers.
    pub thickness_evolution: Vec<Vec<f64>>,
}

impl SubsidenceResult {
    pub fn len(&self) -> usize {
        self.subsidence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsidence.is_empty()
    }

    /// Subsidence at the most recent event.
    pub fn present(&self) -> Option<f64> {
        self.subsidence.first().copied()
    }

    /// Subsidence right after the first layer was deposited.
    pub fn oldest(&self) -> Option<f64> {
        self.subsidence.last().copied()
    }

    pub fn total_thickness(&self, index: usize) -> Option<f64> {
        self.thickness_evolution.get(index).map(|t| t.iter().sum())
    }
}

pub struct SubsidenceSolver {
    settings: SolverSettings,
}

impl SubsidenceSolver {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self::with_settings(SolverSettings {
            constants,
            ..SolverSettings::default()
        })
    }

    pub fn with_settings(settings: SolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn compute_subsidence<P: PorosityModel>(
        &self,
        sequence: &BurialSequence<P>,
    ) -> Result<SubsidenceResult> {
        self.settings.constants.validate()?;
        self.settings.newton.validate()?;
        if !sequence.is_reconstructed() {
            return Err(BackstripError::OrderingViolation(
                "subsidence requested before burial history was reconstructed".to_string(),
            ));
        }

        let constants = &self.settings.constants;
        let count = sequence.len();
        let mut result = SubsidenceResult {
            ages: Vec::with_capacity(count),
            subsidence: Vec::with_capacity(count),
            thickness_evolution: Vec::with_capacity(count),
        };

        if self.settings.debug {
            println!("🪨 Backstripping {} deposition events", count);
        }

        // oldest event first; reversed below
        for index in (0..count).rev() {
            let column = sequence.decompact_column_with(index, constants, &self.settings.newton)?;
            let total_thickness = column.total_thickness();
            let sea_level_change = sequence.sea_level_change(index)?;
            let bathymetry = sequence.bathymetry_at(index)?;
            let deflection = compute_deflection(column.total_weight(), sea_level_change, constants);

            let subsidence = bathymetry + total_thickness - deflection - sea_level_change
                - sequence.initial_bathymetry();

            let age = sequence.events()[index].age;
            if self.settings.debug {
                println!(
                    "   ⏱️ {:>8.1} | layers {:>3} | column {:>9.2}m | deflection {:>9.2}m | subsidence {:>9.2}m",
                    age,
                    column.len(),
                    total_thickness,
                    deflection,
                    subsidence
                );
            }

            result.ages.push(age);
            result.subsidence.push(subsidence);
            result.thickness_evolution.push(column.thicknesses);
        }

        result.ages.reverse();
        result.subsidence.reverse();
        result.thickness_evolution.reverse();
        Ok(result)
    }
}

/// Backstrip `sequence` with default Newton settings.
pub fn compute_subsidence<P: PorosityModel>(
    sequence: &BurialSequence<P>,
    constants: &PhysicalConstants,
) -> Result<SubsidenceResult> {
    SubsidenceSolver::new(*constants).compute_subsidence(sequence)
}
