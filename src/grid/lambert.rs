//! Lambert conformal conic grids, in closed form
use super::*;
use crate::math::{rescale_lon, romberg};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Lambert conformal grid. All derived constants are computed once,
/// at construction.
#[derive(Debug, Clone)]
pub struct LambertGrid {
    data: LambertData,
    cone: f64,
    alpha: f64,
    bx: f64,
    by: f64,
    lon_orient_rad: f64,
}

// ----- R A D I A L   F U N C T I O N ---------------------------------------------------

/// The Lambert radial function r(𝜙) = tan(π/4 - 𝜙/2)^c
fn lc_func(lat: f64, cone: f64) -> f64 {
    (FRAC_PI_4 - 0.5 * lat).tan().powf(cone)
}

/// Inverse of [`lc_func`]
fn lc_inv_func(r: f64, cone: f64) -> f64 {
    FRAC_PI_2 - 2. * r.powf(1. / cone).atan()
}

/// Derivative of [`lc_func`] with respect to latitude
fn lc_der_func(lat: f64, cone: f64) -> f64 {
    -(cone / lat.cos()) * lc_func(lat, cone)
}

/// The cone constant for secant latitudes 𝜙₁, 𝜙₂ (radians). The tangent
/// case, 𝜙₁ = 𝜙₂, is the limit sin 𝜙₁.
pub fn cone_constant(phi1: f64, phi2: f64) -> f64 {
    if (phi1 - phi2).abs() < 1.0e-5 {
        return phi1.sin();
    }
    let t = phi1.cos() / phi2.cos();
    let b = (FRAC_PI_4 - 0.5 * phi1).tan() / (FRAC_PI_4 - 0.5 * phi2).tan();
    t.ln() / b.ln()
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

impl LambertGrid {
    pub fn new(data: &LambertData) -> Result<LambertGrid, Error> {
        data.validate()?;

        let phi1 = data.scale_lat_1.to_radians();
        let phi2 = data.scale_lat_2.to_radians();
        let phi0 = data.lat_pin.to_radians();
        let lon0 = reduce_rad(data.lon_pin.to_radians());
        let lon_orient_rad = reduce_rad(data.lon_orient.to_radians());

        let cone = cone_constant(phi1, phi2);
        let alpha = (-1.0 / lc_der_func(phi1, cone)) * (data.r_km / data.d_km);

        let r0 = lc_func(phi0, cone);
        let theta0 = cone * reduce_rad(lon_orient_rad - lon0);
        let bx = data.x_pin - alpha * r0 * theta0.sin();
        let by = data.y_pin + alpha * r0 * theta0.cos();

        log::debug!(
            "lambert grid '{}': cone {cone:.6}, alpha {alpha:.4}, Bx {bx:.4}, By {by:.4}",
            data.name
        );

        Ok(LambertGrid {
            data: data.clone(),
            cone,
            alpha,
            bx,
            by,
            lon_orient_rad,
        })
    }

    pub fn cone(&self) -> f64 {
        self.cone
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn data(&self) -> &LambertData {
        &self.data
    }

    // The natural (u, v) plane of the projection, in units of the radial function
    fn xy_to_uv(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.bx) / self.alpha, (y - self.by) / (-self.alpha))
    }

    /// Area, in km², of the closed polygon with vertices `(x[i], y[i])`
    /// in pixel coordinates
    pub fn xy_closedpolyline_area(&self, x: &[f64], y: &[f64]) -> Result<f64, Error> {
        let n = x.len().min(y.len());
        let mut sum = 0.;
        for j in 0..n {
            let k = (j + 1) % n;
            let (u0, v0) = self.xy_to_uv(x[j], y[j]);
            let (u1, v1) = self.xy_to_uv(x[k], y[k]);
            sum += lambert_segment_area(u0, v0, u1, v1, self.cone)?;
        }
        Ok(sum.abs() * self.data.r_km * self.data.r_km)
    }
}

// ----- A R E A ---------------------------------------------------------------------

/// Line integral of the Lambert areal element along the segment from
/// (u0, v0) to (u1, v1), in steradians
fn lambert_segment_area(u0: f64, v0: f64, u1: f64, v1: f64, c: f64) -> Result<f64, Error> {
    let du = u1 - u0;
    let dv = v1 - v0;
    let e_bot = 1.0 / c;
    let e_top = e_bot - 1.0;
    let beta = |t: f64| {
        let u = u0 + t * du;
        let v = v0 + t * dv;
        let r2 = u * u + v * v;
        r2.powf(e_top) / (1.0 + r2.powf(e_bot))
    };
    let rom = romberg(beta, 0.0, 1.0)?;
    Ok(rom * (2.0 / c) * (u0 * v1 - u1 * v0))
}

// ----- G R I D R E P -----------------------------------------------------------------

impl GridRep for LambertGrid {
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
        let lat = lat.to_radians();
        let lon = reduce_rad(lon.to_radians());
        let r = lc_func(lat, self.cone);
        let theta = self.cone * reduce_rad(self.lon_orient_rad - lon);
        (
            self.bx + self.alpha * r * theta.sin(),
            self.by - self.alpha * r * theta.cos(),
        )
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let x = (x - self.bx) / self.alpha;
        let y = (y - self.by) / self.alpha;
        let r = x.hypot(y);
        let lat = lc_inv_func(r, self.cone);

        // Note the argument order: NOT atan2(y, x)
        let theta = if r.abs() < 1.0e-5 { 0.0 } else { x.atan2(-y) };
        let lon = reduce_rad(self.lon_orient_rad - theta / self.cone);
        (lat.to_degrees(), lon.to_degrees())
    }

    fn calc_area(&self, x: i64, y: i64) -> Result<f64, Error> {
        let (x, y) = (x as f64, y as f64);
        let xs = [x - 0.5, x + 0.5, x + 0.5, x - 0.5];
        let ys = [y - 0.5, y - 0.5, y + 0.5, y + 0.5];
        self.xy_closedpolyline_area(&xs, &ys)
    }

    // The cone constant carries the sign of the hemisphere
    fn rot_grid_to_earth(&self, x: i64, y: i64) -> f64 {
        let (_, lon) = self.xy_to_latlon(x as f64, y as f64);
        let diff = rescale_lon(self.lon_orient_rad.to_degrees() - lon);
        diff * self.cone
    }

    fn serialize(&self, sep: &str) -> String {
        let (lat_ll, lon_ll) = self.xy_to_latlon(0., 0.);
        [
            "Projection: Lambert Conformal".to_string(),
            format!("Nx: {}", self.data.nx),
            format!("Ny: {}", self.data.ny),
            format!("Lat_LL: {lat_ll:.3}"),
            format!("Lon_LL: {lon_ll:.3}"),
            format!("Lon_orient: {:.3}", self.data.lon_orient),
            format!("Alpha: {:.3}", self.alpha),
            format!("Cone: {:.3}", self.cone),
            format!("Bx: {:.4}", self.bx),
            format!("By: {:.4}", self.by),
        ]
        .join(sep)
    }

    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        let d = &self.data;
        writeln!(out, "{p}Projection = Lambert Conformal")?;
        writeln!(out, "{p}Name        = \"{}\"", d.name)?;
        writeln!(out, "{p}Scale_Lat_1 = {:.4}", d.scale_lat_1)?;
        writeln!(out, "{p}Scale_Lat_2 = {:.4}", d.scale_lat_2)?;
        writeln!(out, "{p}Lat_pin     = {:.4}", d.lat_pin)?;
        writeln!(out, "{p}Lon_pin     = {:.4}", d.lon_pin)?;
        writeln!(out, "{p}X_pin       = {:.4}", d.x_pin)?;
        writeln!(out, "{p}Y_pin       = {:.4}", d.y_pin)?;
        writeln!(out, "{p}Lon_orient  = {:.4}", d.lon_orient)?;
        writeln!(out, "{p}D_km        = {:.4}", d.d_km)?;
        writeln!(out, "{p}R_km        = {:.4}", d.r_km)?;
        writeln!(out, "{p}Nx          = {}", d.nx)?;
        writeln!(out, "{p}Ny          = {}", d.ny)?;
        writeln!(out, "{p}Cone        = {:.6}", self.cone)?;
        writeln!(out, "{p}Alpha       = {:.4}", self.alpha)?;
        writeln!(out, "{p}Bx          = {:.4}", self.bx)?;
        writeln!(out, "{p}By          = {:.4}", self.by)
    }

    fn info(&self) -> GridInfo {
        GridInfo::Lambert(self.data.clone())
    }

    fn wrap_lon(&self) -> bool {
        false
    }

    fn is_global(&self) -> bool {
        false
    }

    fn scale_km(&self) -> Option<f64> {
        Some(self.data.d_km)
    }
}

// ----- T E S T S ---------------------------------------------------------------------
