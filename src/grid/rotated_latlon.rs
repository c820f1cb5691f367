//! Rotated latitude/longitude grids: a regular lat/lon grid on a sphere
//! whose poles have been moved away from the poles of the earth
use super::*;
use crate::math::{asind, atan2d, cosd, rescale_lon, sind};

#[derive(Debug, Clone)]
pub struct RotatedLatLonGrid {
    data: RotatedLatLonData,
    // The grid proper, in rotated coordinates
    rotated: LatLonGrid,
    // Earth to rotated cartesian coordinates. The transpose goes back.
    matrix: [[f64; 3]; 3],
}

// Unit vector of a point given in degrees, longitude east positive
fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    [cosd(lat) * cosd(lon), cosd(lat) * sind(lon), sind(lat)]
}

// (lat, lon) in degrees, longitude east positive
fn lat_lon(v: [f64; 3]) -> (f64, f64) {
    (asind(v[2].clamp(-1., 1.)), atan2d(v[1], v[0]))
}

impl RotatedLatLonGrid {
    pub fn new(data: &RotatedLatLonData) -> Result<RotatedLatLonGrid, Error> {
        data.validate()?;
        let rotated = LatLonGrid::new(&data.rotated_grid())?;

        // Turn the south pole meridian onto the zero meridian, then tilt
        // the south pole down to -90°
        let lam = -data.true_lon_south_pole;
        let theta = data.true_lat_south_pole + 90.;
        let (c, s) = (cosd(lam), sind(lam));
        let (ct, st) = (cosd(theta), sind(theta));
        #[rustfmt::skip]
        let matrix = [
            [ ct * c,  ct * s,  st],
            [     -s,       c,  0.],
            [-st * c, -st * s,  ct],
        ];

        log::debug!(
            "rotated latlon grid '{}': south pole at ({}, {}), aux rotation {}",
            data.name,
            data.true_lat_south_pole,
            data.true_lon_south_pole,
            data.aux_rotation
        );
        Ok(RotatedLatLonGrid {
            data: data.clone(),
            rotated,
            matrix,
        })
    }

    pub fn data(&self) -> &RotatedLatLonData {
        &self.data
    }

    /// Geographic to rotated coordinates, both west positive
    pub fn earth_to_rotated(&self, lat: f64, lon: f64) -> (f64, f64) {
        let v = unit_vector(lat, -lon);
        let m = &self.matrix;
        let r = [0, 1, 2].map(|i| m[i][0] * v[0] + m[i][1] * v[1] + m[i][2] * v[2]);
        let (rlat, rlon) = lat_lon(r);
        (rlat, rescale_lon(-(rlon - self.data.aux_rotation)))
    }

    /// Rotated to geographic coordinates, both west positive
    pub fn rotated_to_earth(&self, rlat: f64, rlon: f64) -> (f64, f64) {
        let r = unit_vector(rlat, -rlon + self.data.aux_rotation);
        let m = &self.matrix;
        let v = [0, 1, 2].map(|j| m[0][j] * r[0] + m[1][j] * r[1] + m[2][j] * r[2]);
        let (lat, lon) = lat_lon(v);
        (lat, rescale_lon(-lon))
    }
}

impl GridRep for RotatedLatLonGrid {
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
        let (rlat, rlon) = self.earth_to_rotated(lat, lon);
        self.rotated.latlon_to_xy(rlat, rlon)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let (rlat, rlon) = self.rotated.xy_to_latlon(x, y);
        self.rotated_to_earth(rlat, rlon)
    }

    // Rotations preserve area
    fn calc_area(&self, x: i64, y: i64) -> Result<f64, Error> {
        self.rotated.calc_area(x, y)
    }

    fn rot_grid_to_earth(&self, x: i64, y: i64) -> f64 {
        numerical_rotation(self, x, y)
    }

    fn serialize(&self, sep: &str) -> String {
        let d = &self.data;
        [
            "Projection: Rotated Lat/Lon".to_string(),
            format!("rot_lat_ll: {:.3}", d.rot_lat_ll),
            format!("rot_lon_ll: {:.3}", d.rot_lon_ll),
            format!("delta_rot_lat: {:.3}", d.delta_rot_lat),
            format!("delta_rot_lon: {:.3}", d.delta_rot_lon),
            format!("Nlat: {}", d.nlat),
            format!("Nlon: {}", d.nlon),
            format!("true_lat_south_pole: {:.3}", d.true_lat_south_pole),
            format!("true_lon_south_pole: {:.3}", d.true_lon_south_pole),
            format!("aux_rotation: {:.3}", d.aux_rotation),
        ]
        .join(sep)
    }

    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        let d = &self.data;
        writeln!(out, "{p}Projection          = Rotated Lat/Lon")?;
        writeln!(out, "{p}Name                = \"{}\"", d.name)?;
        writeln!(out, "{p}rot_lat_ll          = {:.4}", d.rot_lat_ll)?;
        writeln!(out, "{p}rot_lon_ll          = {:.4}", d.rot_lon_ll)?;
        writeln!(out, "{p}delta_rot_lat       = {:.4}", d.delta_rot_lat)?;
        writeln!(out, "{p}delta_rot_lon       = {:.4}", d.delta_rot_lon)?;
        writeln!(out, "{p}Nlat                = {}", d.nlat)?;
        writeln!(out, "{p}Nlon                = {}", d.nlon)?;
        writeln!(out, "{p}true_lat_south_pole = {:.4}", d.true_lat_south_pole)?;
        writeln!(out, "{p}true_lon_south_pole = {:.4}", d.true_lon_south_pole)?;
        writeln!(out, "{p}aux_rotation        = {:.4}", d.aux_rotation)
    }

    fn info(&self) -> GridInfo {
        GridInfo::RotatedLatLon(self.data.clone())
    }

    fn wrap_lon(&self) -> bool {
        self.rotated.wrap_lon()
    }

    fn is_global(&self) -> bool {
        self.rotated.is_global()
    }
}

// ----- T E S T S ---------------------------------------------------------------------
