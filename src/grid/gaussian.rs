//! Global Gaussian grids: equidistant longitudes, and latitudes at the
//! roots of a Legendre polynomial
use super::*;
use crate::geoid::NCEP_EARTH_RADIUS_KM;
use crate::math::{rescale_lon, rescale_lon_360};
use std::f64::consts::PI;

const NEWTON_TOL: f64 = 3.0e-14;
const NEWTON_MAX_ITER: usize = 100;

#[derive(Debug, Clone)]
pub struct GaussianGrid {
    data: GaussianData,
    // South to north, so y grows northward
    latitudes: Vec<f64>,
    delta_lon: f64,
}

/// The `n` Gaussian latitudes, in degrees, sorted south to north:
/// arcsines of the roots of the Legendre polynomial Pₙ, found by Newton
/// iteration from the asymptotic estimates of
/// [Abramowitz and Stegun](crate::Bibliography::Abr64).
pub fn gaussian_latitudes(n: usize) -> Result<Vec<f64>, Error> {
    let mut lat = vec![0.; n];
    let m = (n + 1) / 2;
    let nf = n as f64;

    for i in 1..=m {
        let mut z = (PI * (i as f64 - 0.25) / (nf + 0.5)).cos();
        let mut converged = false;
        for _ in 0..NEWTON_MAX_ITER {
            let (p1, p2) = legendre(n, z);
            let pp = nf * (z * p1 - p2) / (z * z - 1.);
            let z1 = z;
            z = z1 - p1 / pp;
            if (z - z1).abs() <= NEWTON_TOL {
                converged = true;
                break;
            }
        }
        if !converged {
            log::error!("gaussian latitudes: no convergence for root {i} of P{n}");
            return Err(Error::NoConvergence("gaussian latitudes", NEWTON_MAX_ITER));
        }
        let phi = z.asin().to_degrees();
        lat[n - i] = phi;
        lat[i - 1] = -phi;
    }
    Ok(lat)
}

// Pₙ(z) and Pₙ₋₁(z), by the three term recurrence
fn legendre(n: usize, z: f64) -> (f64, f64) {
    let mut p1 = 1.;
    let mut p2 = 0.;
    for j in 1..=n {
        let p3 = p2;
        p2 = p1;
        let jf = j as f64;
        p1 = ((2. * jf - 1.) * z * p2 - (jf - 1.) * p3) / jf;
    }
    (p1, p2)
}

impl GaussianGrid {
    pub fn new(data: &GaussianData) -> Result<GaussianGrid, Error> {
        data.validate()?;
        let latitudes = gaussian_latitudes(data.ny)?;
        log::debug!(
            "gaussian grid '{}': {} latitudes, northmost {:.4}",
            data.name,
            data.ny,
            latitudes[data.ny - 1]
        );
        Ok(GaussianGrid {
            data: data.clone(),
            latitudes,
            delta_lon: 360. / data.nx as f64,
        })
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    // Southern and northern boundaries of the latitude band of row y
    fn band(&self, y: usize) -> (f64, f64) {
        let lat = &self.latitudes;
        let n = lat.len();
        let bottom = if y == 0 { -90. } else { 0.5 * (lat[y - 1] + lat[y]) };
        let top = if y + 1 == n { 90. } else { 0.5 * (lat[y] + lat[y + 1]) };
        (bottom, top)
    }
}

impl GridRep for GaussianGrid {
    fn name(&self) -> &str {
        &self.data.name
    }

    fn nx(&self) -> usize {
        self.data.nx
    }

    fn ny(&self) -> usize {
        self.data.ny
    }

    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = rescale_lon_360(self.data.lon_zero - lon) / self.delta_lon;

        // Linear in latitude between neighbouring rows, extrapolated
        // beyond the outermost ones
        let lats = &self.latitudes;
        let j = lats.partition_point(|&l| l <= lat).clamp(1, lats.len() - 1);
        let i = j - 1;
        let y = i as f64 + (lat - lats[i]) / (lats[j] - lats[i]);
        (x, y)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = rescale_lon(self.data.lon_zero - x * self.delta_lon);
        let lats = &self.latitudes;
        let i = (y.floor().max(0.) as usize).min(lats.len() - 2);
        let lat = lats[i] + (y - i as f64) * (lats[i + 1] - lats[i]);
        (lat, lon)
    }

    fn calc_area(&self, _x: i64, y: i64) -> Result<f64, Error> {
        if y < 0 || y as usize >= self.data.ny {
            log::warn!("gaussian: row {y} outside of grid '{}'", self.data.name);
            return Ok(0.);
        }
        let (bottom, top) = self.band(y as usize);
        let r = NCEP_EARTH_RADIUS_KM;
        Ok(r * r * self.delta_lon.to_radians() * (sind(top) - sind(bottom)))
    }

    fn rot_grid_to_earth(&self, _x: i64, _y: i64) -> f64 {
        0.
    }

    fn serialize(&self, sep: &str) -> String {
        let d = &self.data;
        [
            "Projection: Gaussian".to_string(),
            format!("Lon_Zero: {:.4}", d.lon_zero),
            format!("Nx: {}", d.nx),
            format!("Ny: {}", d.ny),
        ]
        .join(sep)
    }

    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        let d = &self.data;
        writeln!(out, "{p}Projection = Gaussian")?;
        writeln!(out, "{p}Name       = \"{}\"", d.name)?;
        writeln!(out, "{p}Lon_Zero   = {:.4}", d.lon_zero)?;
        writeln!(out, "{p}Nx         = {}", d.nx)?;
        writeln!(out, "{p}Ny         = {}", d.ny)?;
        writeln!(out, "{p}Lat range  = {:.4} .. {:.4}", self.latitudes[0], self.latitudes[d.ny - 1])
    }

    fn info(&self) -> GridInfo {
        GridInfo::Gaussian(self.data.clone())
    }

    fn wrap_lon(&self) -> bool {
        true
    }

    fn is_global(&self) -> bool {
        true
    }
}

// ----- T E S T S ---------------------------------------------------------------------
