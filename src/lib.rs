//! *Grids and map projections for forecast verification*.
//!
//! Every field, observation and mask handled by a verification system
//! must be locatable on a common coordinate system before any statistic
//! can be computed. `vxgrid` provides that layer: a grid relates the
//! integer row/column ("pixel") coordinates of a regular or irregular
//! data grid to geographic latitude/longitude, and back.
//!
//! Conventions
//! -----------
//!
//! At the grid level, all angles are in degrees, and longitudes are
//! counted **west positive**. Pixel coordinates are continuous: `(0, 0)`
//! is the center of the lower left grid cell.
//!
//! The projection [engine] works internally in radians, east positive,
//! as is customary for projection libraries.
//!
//! Quick start
//! -----------
//!
//! ```
//! use vxgrid::prelude::*;
//! # fn main() -> Result<(), Error> {
//! let grid = find_grid("wrf10")?;
//! let (lat, lon) = grid.xy_to_latlon(0., 0.);
//! assert!((lat - 31.29359).abs() < 1e-3);
//! assert!((lon - 109.2074).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod affine;
pub mod engine;
pub mod geoid;
pub mod grid;
pub mod math;

mod bibliography;
pub use bibliography::Bibliography;

/// Preamble for users of the crate
pub mod prelude {
    pub use crate::grid::find_grid;
    pub use crate::grid::find_grid_by_name;
    pub use crate::grid::parse_grid;
    pub use crate::grid::parse_grid_def;
    pub use crate::grid::Grid;
    pub use crate::grid::GridInfo;
    pub use crate::grid::GridRep;

    pub use crate::grid::GaussianData;
    pub use crate::grid::LaeaData;
    pub use crate::grid::LambertData;
    pub use crate::grid::LatLonData;
    pub use crate::grid::MercatorData;
    pub use crate::grid::RotatedLatLonData;
    pub use crate::grid::StereographicData;
    pub use crate::grid::UnstructuredData;

    pub use crate::geoid::GeoidParameters;
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
}

/// Preamble for crate-internal modules, and for authoring
/// additional grid families and projection operators
pub mod authoring {
    pub use crate::prelude::*;

    pub use crate::affine::AffineTransform;
    pub use crate::engine::Coor2D;
    pub use crate::engine::InnerOp;
    pub use crate::engine::OpParameter;
    pub use crate::engine::ParsedParameters;
    pub use crate::engine::ProjConstructor;
    pub use crate::engine::Projection;
    pub use crate::engine::RawParameters;
    pub use crate::math::*;

    pub use log::debug;
    pub use log::error;
    pub use log::trace;
    pub use log::warn;

    pub use std::collections::BTreeMap;
    pub use std::collections::BTreeSet;
    pub use std::fmt::Write as _;
}

/// Everything that can go wrong in the grid and projection layers
#[derive(Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    General(&'static str),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("bad grid specification: {0}")]
    BadGridSpec(String),

    #[error("invalid grid descriptor: {0}")]
    InvalidDescriptor(&'static str),

    #[error("{0}: no convergence after {1} iterations")]
    NoConvergence(&'static str, usize),

    #[error("{0}: not yet implemented")]
    Unsupported(String),

    #[error("spatial index error: {0}")]
    Index(String),

    #[error("{0}: empty grid")]
    EmptyGrid(&'static str),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}

// ----- T E S T S ---------------------------------------------------------------------
