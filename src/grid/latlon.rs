//! Regular latitude/longitude grids
use super::*;
use crate::geoid::NCEP_EARTH_RADIUS_KM;
use crate::math::{rescale_lon, rescale_lon_360};

#[derive(Debug, Clone)]
pub struct LatLonGrid {
    data: LatLonData,
    global: bool,
}

impl LatLonGrid {
    pub fn new(data: &LatLonData) -> Result<LatLonGrid, Error> {
        data.validate()?;
        let global = is_eq(data.nlon as f64 * data.delta_lon, 360., LOOSE_TOL);
        log::debug!("latlon grid '{}': global {global}", data.name);
        Ok(LatLonGrid {
            data: data.clone(),
            global,
        })
    }

    pub fn data(&self) -> &LatLonData {
        &self.data
    }
}

/// Longitude offset west of `lon_ll`, in degrees. For regional grids,
/// points beyond the midpoint of the uncovered sector come out negative,
/// i.e. east of the grid.
pub(crate) fn west_offset(lon_ll: f64, lon: f64, span: f64, global: bool) -> f64 {
    let dl = rescale_lon_360(lon_ll - lon);
    if !global && dl > span + 0.5 * (360. - span) {
        return dl - 360.;
    }
    dl
}

impl GridRep for LatLonGrid {
    fn name(&self) -> &str {
        &self.data.name
    }

    fn nx(&self) -> usize {
        self.data.nlon
    }

    fn ny(&self) -> usize {
        self.data.nlat
    }

    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let d = &self.data;
        let span = (d.nlon as f64 - 1.) * d.delta_lon;
        let x = west_offset(d.lon_ll, lon, span, self.global) / d.delta_lon;
        let y = (lat - d.lat_ll) / d.delta_lat;
        (x, y)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let d = &self.data;
        (d.lat_ll + y * d.delta_lat, rescale_lon(d.lon_ll - x * d.delta_lon))
    }

    // Exact area of the spherical zone slice
    fn calc_area(&self, _x: i64, y: i64) -> Result<f64, Error> {
        let d = &self.data;
        let lat = d.lat_ll + y as f64 * d.delta_lat;
        let top = (lat + 0.5 * d.delta_lat).min(90.);
        let bottom = (lat - 0.5 * d.delta_lat).max(-90.);
        let r = NCEP_EARTH_RADIUS_KM;
        Ok(r * r * d.delta_lon.to_radians() * (sind(top) - sind(bottom)).abs())
    }

    fn rot_grid_to_earth(&self, _x: i64, _y: i64) -> f64 {
        0.
    }

    fn serialize(&self, sep: &str) -> String {
        let d = &self.data;
        [
            "Projection: Lat/Lon".to_string(),
            format!("lat_ll: {:.3}", d.lat_ll),
            format!("lon_ll: {:.3}", d.lon_ll),
            format!("delta_lat: {:.3}", d.delta_lat),
            format!("delta_lon: {:.3}", d.delta_lon),
            format!("Nlat: {}", d.nlat),
            format!("Nlon: {}", d.nlon),
        ]
        .join(sep)
    }

    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        let d = &self.data;
        writeln!(out, "{p}Projection = Lat/Lon")?;
        writeln!(out, "{p}Name       = \"{}\"", d.name)?;
        writeln!(out, "{p}lat_ll     = {:.4}", d.lat_ll)?;
        writeln!(out, "{p}lon_ll     = {:.4}", d.lon_ll)?;
        writeln!(out, "{p}delta_lat  = {:.4}", d.delta_lat)?;
        writeln!(out, "{p}delta_lon  = {:.4}", d.delta_lon)?;
        writeln!(out, "{p}Nlat       = {}", d.nlat)?;
        writeln!(out, "{p}Nlon       = {}", d.nlon)?;
        writeln!(out, "{p}wrap_lon   = {}", self.global)
    }

    fn info(&self) -> GridInfo {
        GridInfo::LatLon(self.data.clone())
    }

    fn wrap_lon(&self) -> bool {
        self.global
    }

    fn is_global(&self) -> bool {
        self.global
    }
}

// ----- T E S T S ---------------------------------------------------------------------
