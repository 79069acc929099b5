//! Error taxonomy for the backstripping engine.
//!
//! Every failure is local and non-retryable: one bad layer aborts the
//! whole column.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackstripError {
    /// Newton iteration for a layer thickness did not reach tolerance.
    #[error(
        "thickness solve at depth {depth:.2}m did not converge after {iterations} iterations (residual {residual:.3e})"
    )]
    NonConvergence {
        depth: f64,
        iterations: usize,
        residual: f64,
    },

    /// Porosity reached 1 (or the Newton derivative vanished) during a solve.
    #[error("invalid porosity {porosity:.4} at depth {depth:.2}m (must stay below 1)")]
    InvalidPorosity { depth: f64, porosity: f64 },

    /// Query issued in the wrong lifecycle state, or inputs out of order/length.
    #[error("ordering violation: {0}")]
    OrderingViolation(String),

    /// A parameter value is outside its physical range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input file could not be read.
    #[error("input error: {0}")]
    Io(#[from] io::Error),

    /// Column JSON could not be parsed.
    #[error("failed to parse column JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BackstripError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_messages() {
        let e = BackstripError::NonConvergence {
            depth: 150.0,
            iterations: 100,
            residual: 0.5,
        };
        assert_eq!(
            e.to_string(),
            "thickness solve at depth 150.00m did not converge after 100 iterations (residual 5.000e-1)"
        );

        let e = BackstripError::InvalidPorosity {
            depth: 0.0,
            porosity: 1.2,
        };
        assert!(e.to_string().contains("1.2000"));

        let e = BackstripError::OrderingViolation("burial history not reconstructed".into());
        assert_eq!(
            e.to_string(),
            "ordering violation: burial history not reconstructed"
        );
    }

    #[test]
    fn boxes_as_std_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let e: Box<dyn std::error::Error> = Box::new(BackstripError::from(io_err));
        assert_eq!(e.to_string(), "input error: missing");
    }

    #[test]
    fn wrapped_errors_keep_their_source() {
        let e: BackstripError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(e.source().is_some());

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = BackstripError::from(parse_err);
        assert!(matches!(e, BackstripError::Json(_)));
        assert!(e.to_string().starts_with("failed to parse column JSON: "));
        assert!(e.source().is_some());
    }
}
