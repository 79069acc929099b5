//! Horizon depths through time, the numeric half of a burial-history plot.
//!
//! Depths are measured downward from the basement-time sea floor, corrected
//! for the eustatic change since then.

use crate::column_input::ColumnInput;
use crate::error::{BackstripError, Result};
use crate::math_utils::cumulative_from;
use crate::subsidence::SubsidenceResult;

/// Depth of every horizon at one deposition event: the sea floor first,
/// then the base of each layer, shallowest first.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonSlice {
    pub age: f64,
    pub depths: Vec<f64>,
}

impl HorizonSlice {
    pub fn sea_floor(&self) -> Option<f64> {
        self.depths.first().copied()
    }

    pub fn basement(&self) -> Option<f64> {
        self.depths.last().copied()
    }
}

/// Sea-floor offset at each time step, basement first.
pub fn horizon_offsets(input: &ColumnInput) -> Vec<f64> {
    input
        .bathymetries
        .iter()
        .zip(&input.sea_levels)
        .map(|(w, s)| w - input.bathymetries[0] - (s - input.sea_levels[0]))
        .collect()
}

/// Horizon depths for each deposition event, oldest first (matching
/// `input.ages[1..]`).
///
/// Each event's sea floor sits at that event's own offset (`offsets[k + 1]`,
/// from its own bathymetry and sea level), not the offset of the step before.
pub fn horizon_depths(
    input: &ColumnInput,
    result: &SubsidenceResult,
) -> Result<Vec<HorizonSlice>> {
    let layers = input.layer_count();
    if result.len() != layers
        || result.thickness_evolution.len() != layers
        || input.ages.len() != layers + 1
    {
        return Err(BackstripError::OrderingViolation(format!(
            "result holds {} events but the column has {} layers",
            result.len(),
            layers
        )));
    }

    let offsets = horizon_offsets(input);
    let mut slices = Vec::with_capacity(layers);
    // result is ordered present first
    for (k, thicknesses) in result.thickness_evolution.iter().rev().enumerate() {
        slices.push(HorizonSlice {
            age: input.ages[k + 1],
            depths: cumulative_from(offsets[k + 1], thicknesses),
        });
    }
    Ok(slices)
}
