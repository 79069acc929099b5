//! Porosity-depth laws.
//!
//! A law maps a rock's compaction parameters and a burial depth (m) to the
//! pore fraction at that depth. Layers are generic over the law, so any
//! implementor (including a plain closure) can stand in for Athy's relation.

use crate::rock::RockProperties;

pub trait PorosityModel {
    /// Porosity fraction of `rock` at `depth` metres below the sediment surface.
    fn porosity(&self, rock: &RockProperties, depth: f64) -> f64;
}

/// Athy's exponential porosity-depth relation: `φ0 · exp(-c · z)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AthyPorosity;

impl PorosityModel for AthyPorosity {
    fn porosity(&self, rock: &RockProperties, depth: f64) -> f64 {
        rock.surface_porosity * (-rock.compaction_rate * depth).exp()
    }
}

impl<F> PorosityModel for F
where
    F: Fn(&RockProperties, f64) -> f64,
{
    fn porosity(&self, rock: &RockProperties, depth: f64) -> f64 {
        self(rock, depth)
    }
}
