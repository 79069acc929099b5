//! A single deposited sediment layer
//!
//! A layer knows its present (fully buried) thickness and rock parameters.
//! Once its maximum burial depth is assigned it can report its grain
//! thickness, re-compact itself at any other burial depth, and report the
//! load it places on the basement.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_NEWTON_MAX_ITERATIONS, DEFAULT_NEWTON_TOLERANCE, PhysicalConstants,
};
use crate::error::{BackstripError, Result};
use crate::math_utils::gauss_legendre_2;
use crate::porosity::{AthyPorosity, PorosityModel};
use crate::rock::RockProperties;

/// Convergence controls for the thickness-at-depth Newton solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonSettings {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_NEWTON_TOLERANCE,
            max_iterations: DEFAULT_NEWTON_MAX_ITERATIONS,
        }
    }
}

impl NewtonSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(BackstripError::InvalidInput(format!(
                "newton tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(BackstripError::InvalidInput(
                "newton iteration cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BurialState {
    maximum_burial: f64,
    decompacted_thickness: f64,
}

#[derive(Debug, Clone)]
pub struct Layer<P = AthyPorosity> {
    present_thickness: f64,
    rock: RockProperties,
    model: P,
    // written once by the burial reconstruction
    burial: Option<BurialState>,
}

impl Layer<AthyPorosity> {
    /// Layer compacting by Athy's law.
    pub fn new(present_thickness: f64, rock: RockProperties) -> Result<Self> {
        Layer::with_model(present_thickness, rock, AthyPorosity)
    }
}

impl<P: PorosityModel> Layer<P> {
    pub fn with_model(present_thickness: f64, rock: RockProperties, model: P) -> Result<Self> {
        if !present_thickness.is_finite() || present_thickness <= 0.0 {
            return Err(BackstripError::InvalidInput(format!(
                "present thickness must be positive, got {}",
                present_thickness
            )));
        }
        rock.validate()?;
        Ok(Self {
            present_thickness,
            rock,
            model,
            burial: None,
        })
    }

    pub fn present_thickness(&self) -> f64 {
        self.present_thickness
    }

    pub fn rock(&self) -> &RockProperties {
        &self.rock
    }

    pub fn porosity_at(&self, depth: f64) -> f64 {
        self.model.porosity(&self.rock, depth)
    }

    /// Water-equivalent thickness of the pore space between depths `z0` and `z1`.
    pub fn integrate_porosity(&self, z0: f64, z1: f64) -> f64 {
        gauss_legendre_2(|z| self.porosity_at(z), z0, z1)
    }

    /// Assign the depth of this layer's top once every younger layer is in
    /// place. Write-once; the grain thickness is memoized here.
    pub fn set_maximum_burial(&mut self, maximum_burial: f64) -> Result<()> {
        if self.burial.is_some() {
            return Err(BackstripError::OrderingViolation(
                "maximum burial is already assigned".to_string(),
            ));
        }
        if !maximum_burial.is_finite() || maximum_burial < 0.0 {
            return Err(BackstripError::InvalidInput(format!(
                "maximum burial must be a non-negative depth, got {}",
                maximum_burial
            )));
        }

        let water_thickness =
            self.integrate_porosity(maximum_burial, maximum_burial + self.present_thickness);
        let decompacted_thickness = self.present_thickness - water_thickness;
        if !decompacted_thickness.is_finite() || decompacted_thickness <= 0.0 {
            return Err(BackstripError::InvalidPorosity {
                depth: maximum_burial,
                porosity: water_thickness / self.present_thickness,
            });
        }

        self.burial = Some(BurialState {
            maximum_burial,
            decompacted_thickness,
        });
        Ok(())
    }

    pub fn is_buried(&self) -> bool {
        self.burial.is_some()
    }

    pub fn maximum_burial(&self) -> Result<f64> {
        Ok(self.burial_state()?.maximum_burial)
    }

    /// Thickness of the layer with its pore space removed at maximum burial:
    /// `present - ∫φ` over `[maximum_burial, maximum_burial + present]`.
    pub fn decompacted_thickness(&self) -> Result<f64> {
        Ok(self.burial_state()?.decompacted_thickness)
    }

    pub fn thickness_at_depth(&self, depth: f64) -> Result<f64> {
        self.thickness_at_depth_with(depth, &NewtonSettings::default())
    }

    /// Thickness this layer compacts to when its top sits at `depth`.
    ///
    /// Solves `T - decompacted - ∫φ(depth, depth + T) = 0` by Newton
    /// iteration from the present thickness, using `1 - φ(depth + T)` as the
    /// slope. The slope ignores the quadrature's dependence on the node
    /// positions, so it is an approximation of the true derivative.
    pub fn thickness_at_depth_with(&self, depth: f64, settings: &NewtonSettings) -> Result<f64> {
        if !depth.is_finite() || depth < 0.0 {
            return Err(BackstripError::InvalidInput(format!(
                "burial depth must be a non-negative depth, got {}",
                depth
            )));
        }
        let grain_thickness = self.decompacted_thickness()?;

        let mut thickness = self.present_thickness;
        let mut residual = f64::NAN;
        for _ in 0..settings.max_iterations {
            let water_thickness = self.integrate_porosity(depth, depth + thickness);
            residual = thickness - grain_thickness - water_thickness;

            let porosity = self.porosity_at(depth + thickness);
            let derivative = 1.0 - porosity;
            if !porosity.is_finite() || porosity >= 1.0 || !(derivative > 0.0) {
                return Err(BackstripError::InvalidPorosity {
                    depth: depth + thickness,
                    porosity,
                });
            }

            thickness -= residual / derivative;
            if !thickness.is_finite() {
                return Err(BackstripError::InvalidPorosity { depth, porosity });
            }
            if residual.abs() <= settings.tolerance {
                return Ok(thickness);
            }
        }

        Err(BackstripError::NonConvergence {
            depth,
            iterations: settings.max_iterations,
            residual,
        })
    }

    /// Weight per unit area in excess of the water the grains displace (Pa).
    pub fn sediment_weight(&self, constants: &PhysicalConstants) -> Result<f64> {
        Ok((self.rock.sediment_density - constants.water_density)
            * constants.gravity
            * self.decompacted_thickness()?)
    }

    fn burial_state(&self) -> Result<&BurialState> {
        self.burial.as_ref().ok_or_else(|| {
            BackstripError::OrderingViolation(
                "layer queried before its maximum burial was reconstructed".to_string(),
            )
        })
    }
}

impl<P> std::fmt::Display for Layer<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.burial {
            Some(b) => write!(
                f,
                "Layer[{:.1}m @ {:.1}m, φ0={:.2}, grain {:.1}m]",
                self.present_thickness,
                b.maximum_burial,
                self.rock.surface_porosity,
                b.decompacted_thickness
            ),
            None => write!(
                f,
                "Layer[{:.1}m, φ0={:.2}, unburied]",
                self.present_thickness, self.rock.surface_porosity
            ),
        }
    }
}
