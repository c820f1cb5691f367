//! Miscellaneous math functions for general use

/// Free functions used in more than one module of the crate.
pub mod ancillary;
pub use ancillary::gudermannian;
pub use ancillary::pj_msfn;
pub use ancillary::pj_phi2;
pub use ancillary::qs;
pub use ancillary::sinhpsi_to_tanphi;
pub use ancillary::ts;

/// Free functions for handling and converting between
/// different representations of angles.
pub mod angular;
pub use angular::*;

/// Bounded numerical integration
pub mod quadrature;
pub use quadrature::romberg;

/// Tolerance used for loose comparison of grid parameters
pub const LOOSE_TOL: f64 = 1.0e-5;

/// Absolute comparison of two floats
pub fn is_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}
