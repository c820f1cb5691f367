//! Grids: the mapping between geographic latitude/longitude and the
//! continuous pixel coordinates of a data grid.
//!
//! Every projection family implements [`GridRep`]. Users hold grids
//! through the shared, reference counted [`Grid`] handle, and describe
//! them by a [`GridInfo`], either given directly, parsed from a grid
//! specification, or looked up by name in the registry.

mod data;
mod gaussian;
mod handle;
mod info;
mod lambert;
mod latlon;
mod mercator;
mod parse;
mod proj_grid;
mod registry;
mod rotated_latlon;
mod unstructured;

pub use data::GaussianData;
pub use data::LaeaData;
pub use data::LambertData;
pub use data::LatLonData;
pub use data::MercatorData;
pub use data::RotatedLatLonData;
pub use data::StereographicData;
pub use data::UnstructuredData;

pub use gaussian::GaussianGrid;
pub use lambert::LambertGrid;
pub use latlon::LatLonGrid;
pub use mercator::MercatorGrid;
pub use proj_grid::ProjGrid;
pub use rotated_latlon::RotatedLatLonGrid;
pub use unstructured::UnstructuredGrid;

pub use handle::ll_func;
pub use handle::Grid;
pub use info::GridInfo;
pub use parse::parse_grid;
pub use parse::parse_grid_def;
pub use parse::parse_grid_def_with;
pub use registry::find_grid;
pub use registry::find_grid_by_name;
pub use registry::grid_names;

use crate::math::{atan2d, is_eq, reduce_rad, sind, LOOSE_TOL};
use crate::Error;
use std::fmt::{self, Debug};

/// The capability set of a grid representation. Angles are in degrees,
/// longitudes west positive. Pixel coordinates are continuous, with
/// `(0, 0)` at the center of the lower left cell.
pub trait GridRep: Debug {
    /// Human readable identity, for logging and serialization
    fn name(&self) -> &str;

    fn nx(&self) -> usize;

    fn ny(&self) -> usize;

    /// Geographic to pixel coordinates
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64);

    /// Pixel to geographic coordinates, returned as `(lat, lon)`
    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64);

    /// Area of the cell centered at `(x, y)`, in km²
    fn calc_area(&self, x: i64, y: i64) -> Result<f64, Error>;

    /// The angle, in degrees, from grid relative to earth relative
    /// wind directions at `(x, y)`
    fn rot_grid_to_earth(&self, x: i64, y: i64) -> f64;

    /// Deterministic one-line description, with `sep` between the items
    fn serialize(&self, sep: &str) -> String;

    /// Multi-line human readable description, indented by `depth` levels
    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result;

    /// The parameter record the grid was built from
    fn info(&self) -> GridInfo;

    /// Does the longitude wrap around at the east/west edges?
    fn wrap_lon(&self) -> bool;

    /// Does the grid cover the entire globe?
    fn is_global(&self) -> bool;

    /// Nominal cell size in km, for the families defined by one
    fn scale_km(&self) -> Option<f64> {
        None
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// Indentation prefix for `dump` at nesting level `depth`
pub(crate) fn indent(depth: usize) -> String {
    "   ".repeat(depth)
}

/// Area, in km², of a small spherical polygon given by its vertices in
/// degrees (longitudes west positive), on a sphere of radius `r_km`.
///
/// The edges are integrated as straight lines in (λ, sin 𝜙). This is
/// exact for polygons bounded by meridians and parallels, and very close
/// for the small cells of a projected grid.
pub fn calc_area_ll(lat: &[f64], lon: &[f64], r_km: f64) -> f64 {
    let n = lat.len().min(lon.len());
    if n < 3 {
        return 0.;
    }
    let mut sum = 0.;
    for j in 0..n {
        let k = (j + 1) % n;
        let dlam = reduce_rad((lon[k] - lon[j]).to_radians());
        sum += dlam * (sind(lat[j]) + sind(lat[k]));
    }
    (0.5 * sum * r_km * r_km).abs()
}

// Latitude step, in degrees, for the numerical grid rotation
const ROT_STEP: f64 = 1.0e-3;

/// The angle, in degrees, from grid relative to earth relative directions
/// at the center of cell `(x, y)`, from the direction in grid space of a
/// small step due north. Close to the north pole, the step goes south.
pub fn numerical_rotation(rep: &dyn GridRep, x: i64, y: i64) -> f64 {
    let (x, y) = (x as f64, y as f64);
    let (lat, lon) = rep.xy_to_latlon(x, y);

    let (step, sign) = if lat + ROT_STEP > 90. - ROT_STEP {
        (-ROT_STEP, -1.)
    } else {
        (ROT_STEP, 1.)
    };
    let (x1, y1) = rep.latlon_to_xy(lat + step, lon);
    let dx = sign * (x1 - x);
    let dy = sign * (y1 - y);
    atan2d(-dx, dy)
}

// ----- T E S T S ---------------------------------------------------------------------
