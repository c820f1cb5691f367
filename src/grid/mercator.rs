//! Mercator grids, given by their lower left and upper right corners
use super::*;
use crate::geoid::NCEP_EARTH_RADIUS_KM;
use crate::math::{gudermannian, rescale_lon, rescale_lon_360};
use super::latlon::west_offset;

#[derive(Debug, Clone)]
pub struct MercatorGrid {
    data: MercatorData,
    // Longitude extent, degrees westward from lon_ll to lon_ur
    span: f64,
    // Mercator ordinates of the lower and upper corners
    v_ll: f64,
    v_ur: f64,
}

// The Mercator ordinate, ln tan(π/4 + 𝜙/2)
fn merc_v(lat: f64) -> f64 {
    gudermannian::inv(lat.to_radians())
}

impl MercatorGrid {
    pub fn new(data: &MercatorData) -> Result<MercatorGrid, Error> {
        data.validate()?;
        let mut span = rescale_lon_360(data.lon_ll - data.lon_ur);
        if span < 1.0e-2 {
            span = 360.;
        }
        let grid = MercatorGrid {
            data: data.clone(),
            span,
            v_ll: merc_v(data.lat_ll),
            v_ur: merc_v(data.lat_ur),
        };
        log::debug!("mercator grid '{}': span {span:.4}", data.name);
        Ok(grid)
    }

    pub fn data(&self) -> &MercatorData {
        &self.data
    }

    fn dlon(&self) -> f64 {
        self.span / (self.data.nx as f64 - 1.)
    }

    fn dv(&self) -> f64 {
        (self.v_ur - self.v_ll) / (self.data.ny as f64 - 1.)
    }

    fn y_to_lat(&self, y: f64) -> f64 {
        gudermannian::fwd(self.v_ll + y * self.dv()).to_degrees()
    }
}

impl GridRep for MercatorGrid {
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
        let dl = west_offset(self.data.lon_ll, lon, self.span, self.is_global());
        let x = dl / self.dlon();
        let y = (merc_v(lat) - self.v_ll) / self.dv();
        (x, y)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = rescale_lon(self.data.lon_ll - x * self.dlon());
        (self.y_to_lat(y), lon)
    }

    // Mercator cells are lat/lon rectangles
    fn calc_area(&self, _x: i64, y: i64) -> Result<f64, Error> {
        let y = y as f64;
        let top = self.y_to_lat(y + 0.5);
        let bottom = self.y_to_lat(y - 0.5);
        let r = NCEP_EARTH_RADIUS_KM;
        Ok(r * r * self.dlon().to_radians() * (sind(top) - sind(bottom)).abs())
    }

    fn rot_grid_to_earth(&self, _x: i64, _y: i64) -> f64 {
        0.
    }

    fn serialize(&self, sep: &str) -> String {
        let d = &self.data;
        [
            "Projection: Mercator".to_string(),
            format!("Nx: {}", d.nx),
            format!("Ny: {}", d.ny),
            format!("Lat_LL: {:.3}", d.lat_ll),
            format!("Lon_LL: {:.3}", d.lon_ll),
            format!("Lat_UR: {:.3}", d.lat_ur),
            format!("Lon_UR: {:.3}", d.lon_ur),
        ]
        .join(sep)
    }

    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        let d = &self.data;
        writeln!(out, "{p}Projection = Mercator")?;
        writeln!(out, "{p}Name       = \"{}\"", d.name)?;
        writeln!(out, "{p}Lat_LL     = {:.4}", d.lat_ll)?;
        writeln!(out, "{p}Lon_LL     = {:.4}", d.lon_ll)?;
        writeln!(out, "{p}Lat_UR     = {:.4}", d.lat_ur)?;
        writeln!(out, "{p}Lon_UR     = {:.4}", d.lon_ur)?;
        writeln!(out, "{p}Nx         = {}", d.nx)?;
        writeln!(out, "{p}Ny         = {}", d.ny)
    }

    fn info(&self) -> GridInfo {
        GridInfo::Mercator(self.data.clone())
    }

    // Only when the corner columns are a full turn apart
    fn wrap_lon(&self) -> bool {
        self.is_global()
    }

    fn is_global(&self) -> bool {
        self.span >= 360. - LOOSE_TOL
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn regional() -> Result<(), Error> {
        // NCEP grid 204: Hawaii, crossing the date line
        let data = MercatorData {
            name: "G204".to_string(),
            lat_ll: -25.,
            lon_ll: -110.,
            lat_ur: 60.644,
            lon_ur: 109.129,
            nx: 93,
            ny: 68,
        };
        let grid = MercatorGrid::new(&data)?;
        assert!(!grid.is_global());

        let (x, y) = grid.latlon_to_xy(-25., -110.);
        assert_float_eq!(x, 0., abs <= 1e-9);
        assert_float_eq!(y, 0., abs <= 1e-9);
        let (x, y) = grid.latlon_to_xy(60.644, 109.129);
        assert_float_eq!(x, 92., abs <= 1e-9);
        assert_float_eq!(y, 67., abs <= 1e-9);

        for (x, y) in [(0., 0.), (46.5, 33.5), (92., 67.)] {
            let (lat, lon) = grid.xy_to_latlon(x, y);
            let (xx, yy) = grid.latlon_to_xy(lat, lon);
            assert_float_eq!(xx, x, abs <= 1e-9);
            assert_float_eq!(yy, y, abs <= 1e-9);
        }
        assert_eq!(grid.rot_grid_to_earth(10, 10), 0.);
        Ok(())
    }

    #[test]
    fn global_and_area() -> Result<(), Error> {
        // NCEP grid 1: a full turn of longitude
        let data = MercatorData {
            name: "G001".to_string(),
            lat_ll: -48.09,
            lon_ll: 0.,
            lat_ur: 48.09,
            lon_ur: 0.,
            nx: 73,
            ny: 23,
        };
        let grid = MercatorGrid::new(&data)?;
        assert!(grid.is_global() && grid.wrap_lon());

        // Cells are symmetric about the equator, and shrink poleward
        let south = grid.calc_area(0, 0)?;
        let north = grid.calc_area(0, 22)?;
        assert_float_eq!(south, north, r2nd <= 1e-12);
        assert!(grid.calc_area(0, 11)? > north);

        // The columns add up to the zone between the corner latitudes,
        // padded by half a cell at either end
        let total: f64 = (0..23).map(|y| grid.calc_area(0, y).unwrap_or(0.)).sum();
        let top = grid.xy_to_latlon(0., 22.5).0;
        let r = NCEP_EARTH_RADIUS_KM;
        let zone = r * r * 5_f64.to_radians() * 2. * sind(top);
        assert_float_eq!(total, zone, r2nd <= 1e-12);
        Ok(())
    }
}
