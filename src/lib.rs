pub mod constants;
pub mod error;
pub mod math_utils;
pub mod rock;
pub mod porosity;
pub mod layer;
pub mod burial_sequence;
pub mod subsidence;
pub mod column_input;
pub mod horizons;
pub mod report;

pub use burial_sequence::{BurialSequence, ColumnSlice, DepositionEvent};
pub use column_input::ColumnInput;
pub use constants::PhysicalConstants;
pub use error::{BackstripError, Result};
pub use layer::{Layer, NewtonSettings};
pub use porosity::{AthyPorosity, PorosityModel};
pub use rock::RockProperties;
pub use subsidence::{
    SolverSettings, SubsidenceResult, SubsidenceSolver, compute_deflection, compute_subsidence,
};
