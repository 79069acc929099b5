//! Deposition events and the burial sequence that orders them.
//!
//! Events are kept sorted by ascending age: index 0 is the most recent
//! deposition (the top of the column) and the last index is the oldest,
//! deepest layer. The sequence starts UNRECONSTRUCTED; a single call to
//! [`BurialSequence::reconstruct_burial_history`] assigns every layer its
//! maximum burial and moves it to RECONSTRUCTED, after which the
//! decompaction queries are valid.

use crate::constants::PhysicalConstants;
use crate::error::{BackstripError, Result};
use crate::layer::{Layer, NewtonSettings};
use crate::porosity::{AthyPorosity, PorosityModel};

/// One time step of basin history: a layer deposited at `age` under the
/// given water depth and eustatic sea level.
#[derive(Debug, Clone)]
pub struct DepositionEvent<P = AthyPorosity> {
    pub age: f64,
    pub bathymetry: f64,
    pub sea_level: f64,
    pub layer: Layer<P>,
}

impl<P> DepositionEvent<P> {
    pub fn new(age: f64, bathymetry: f64, sea_level: f64, layer: Layer<P>) -> Self {
        Self {
            age,
            bathymetry,
            sea_level,
            layer,
        }
    }
}

/// Re-decompacted thickness and sediment load of each remaining layer,
/// shallowest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSlice {
    pub thicknesses: Vec<f64>,
    pub weights: Vec<f64>,
}

impl ColumnSlice {
    pub fn total_thickness(&self) -> f64 {
        self.thicknesses.iter().sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.thicknesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thicknesses.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct BurialSequence<P = AthyPorosity> {
    events: Vec<DepositionEvent<P>>,
    initial_age: f64,
    initial_sea_level: f64,
    initial_bathymetry: f64,
    reconstructed: bool,
}

impl<P: PorosityModel> BurialSequence<P> {
    /// Build a sequence from basement conditions and the full event set.
    /// Events may arrive in any order; they are sorted by age here.
    pub fn new(
        initial_age: f64,
        initial_sea_level: f64,
        initial_bathymetry: f64,
        mut events: Vec<DepositionEvent<P>>,
    ) -> Result<Self> {
        if events.is_empty() {
            return Err(BackstripError::InvalidInput(
                "a burial sequence needs at least one deposition event".to_string(),
            ));
        }
        if let Some(bad) = events.iter().find(|e| !e.age.is_finite()) {
            return Err(BackstripError::InvalidInput(format!(
                "event age {} is not finite",
                bad.age
            )));
        }
        if events.iter().any(|e| e.layer.is_buried()) {
            return Err(BackstripError::OrderingViolation(
                "events must be added before any burial history is assigned".to_string(),
            ));
        }

        events.sort_by(|a, b| a.age.total_cmp(&b.age));

        if let Some(pair) = events.windows(2).find(|pair| pair[0].age == pair[1].age) {
            return Err(BackstripError::OrderingViolation(format!(
                "two deposition events share age {}",
                pair[0].age
            )));
        }
        let oldest = events[events.len() - 1].age;
        if !(oldest < initial_age) {
            return Err(BackstripError::OrderingViolation(format!(
                "deposition at age {} is not younger than the basement age {}",
                oldest, initial_age
            )));
        }

        Ok(Self {
            events,
            initial_age,
            initial_sea_level,
            initial_bathymetry,
            reconstructed: false,
        })
    }

    pub fn events(&self) -> &[DepositionEvent<P>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn initial_age(&self) -> f64 {
        self.initial_age
    }

    pub fn initial_sea_level(&self) -> f64 {
        self.initial_sea_level
    }

    pub fn initial_bathymetry(&self) -> f64 {
        self.initial_bathymetry
    }

    pub fn is_reconstructed(&self) -> bool {
        self.reconstructed
    }

    /// Assign each layer the depth of its top once every younger layer is in
    /// place. Runs exactly once.
    pub fn reconstruct_burial_history(&mut self) -> Result<()> {
        if self.reconstructed {
            return Err(BackstripError::OrderingViolation(
                "burial history has already been reconstructed".to_string(),
            ));
        }

        let mut current_burial = 0.0;
        for event in &mut self.events {
            event.layer.set_maximum_burial(current_burial)?;
            current_burial += event.layer.present_thickness();
        }
        self.reconstructed = true;
        Ok(())
    }

    pub fn decompact_column(
        &self,
        start: usize,
        constants: &PhysicalConstants,
    ) -> Result<ColumnSlice> {
        self.decompact_column_with(start, constants, &NewtonSettings::default())
    }

    /// Replay the column as it stood when event `start` was deposited: that
    /// event and every older one, stacked fresh from zero burial.
    pub fn decompact_column_with(
        &self,
        start: usize,
        constants: &PhysicalConstants,
        settings: &NewtonSettings,
    ) -> Result<ColumnSlice> {
        self.ensure_reconstructed()?;
        self.check_index(start)?;

        let remaining = &self.events[start..];
        let mut slice = ColumnSlice {
            thicknesses: Vec::with_capacity(remaining.len()),
            weights: Vec::with_capacity(remaining.len()),
        };

        let mut current_burial = 0.0;
        for event in remaining {
            let thickness = event.layer.thickness_at_depth_with(current_burial, settings)?;
            let weight = event.layer.sediment_weight(constants)?;
            current_burial += thickness;
            slice.thicknesses.push(thickness);
            slice.weights.push(weight);
        }
        Ok(slice)
    }

    /// Eustatic change since basement time at event `index`.
    pub fn sea_level_change(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.events[index].sea_level - self.initial_sea_level)
    }

    pub fn bathymetry_at(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.events[index].bathymetry)
    }

    fn ensure_reconstructed(&self) -> Result<()> {
        if self.reconstructed {
            Ok(())
        } else {
            Err(BackstripError::OrderingViolation(
                "decompaction queried before burial history was reconstructed".to_string(),
            ))
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.events.len() {
            Ok(())
        } else {
            Err(BackstripError::OrderingViolation(format!(
                "event index {} out of range for {} events",
                index,
                self.events.len()
            )))
        }
    }
}
