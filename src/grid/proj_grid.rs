//! Grids for projection families handled by the projection [engine](crate::engine):
//! the engine maps geographic coordinates to its natural plane (km), and
//! an affine map takes the plane to pixel space.
use super::*;
use crate::affine::AffineTransform;
use crate::engine::Projection;
use crate::math::rescale_lon;

#[derive(Debug)]
pub struct ProjGrid {
    info: GridInfo,
    name: String,
    nx: usize,
    ny: usize,
    radius_km: f64,
    engine: Projection,
    affine: AffineTransform,
}

// ----- C O N S T R U C T O R S -------------------------------------------------------

impl ProjGrid {
    /// Build the grid for any family routed through the engine. Families
    /// not yet wired into the engine give [`Error::Unsupported`].
    pub fn new(info: &GridInfo) -> Result<ProjGrid, Error> {
        match info {
            GridInfo::Stereographic(data) => ProjGrid::stereographic(data),
            GridInfo::Laea(data) => ProjGrid::laea(data),
            other => {
                let family = other.family();
                log::error!("Proj grid for {family}: not yet implemented");
                Err(Error::Unsupported(format!("Proj grid for {family}")))
            }
        }
    }

    pub fn stereographic(data: &StereographicData) -> Result<ProjGrid, Error> {
        data.validate()?;
        let lat_0 = if data.is_north() { 90. } else { -90. };
        let definition = format!(
            "stere lat_0={lat_0} lat_ts={} lon_0={} R={}",
            data.scale_lat, -data.lon_orient, data.r_km
        );
        ProjGrid::compose(
            GridInfo::Stereographic(data.clone()),
            &definition,
            (data.lat_pin, data.lon_pin),
            (data.x_pin, data.y_pin),
            data.d_km,
        )
    }

    pub fn laea(data: &LaeaData) -> Result<ProjGrid, Error> {
        data.validate()?;
        let earth = if data.a_km == data.b_km {
            format!("R={}", data.a_km)
        } else {
            format!("a={} b={}", data.a_km, data.b_km)
        };
        let definition = format!(
            "laea lat_0={} lon_0={} {earth}",
            data.standard_lat, -data.central_lon
        );
        ProjGrid::compose(
            GridInfo::Laea(data.clone()),
            &definition,
            (data.lat_pin, data.lon_pin),
            (data.x_pin, data.y_pin),
            data.d_km,
        )
    }

    // Instantiate the engine, then solve the affine part such that the
    // pin lat/lon lands on the pin pixel
    fn compose(
        info: GridInfo,
        definition: &str,
        pin_ll: (f64, f64),
        pin_xy: (f64, f64),
        d_km: f64,
    ) -> Result<ProjGrid, Error> {
        let engine = Projection::new(definition)?;
        let Some((u, v)) = engine.fwd(pin_ll.0.to_radians(), -pin_ll.1.to_radians()) else {
            log::error!("Pin point ({}, {}) outside of '{definition}'", pin_ll.0, pin_ll.1);
            return Err(Error::BadParam("pin".to_string(), definition.to_string()));
        };

        let mut affine = AffineTransform::from_scale(1. / d_km, 1. / d_km)?;
        affine.set_pin(pin_xy.0, pin_xy.1, u, v);

        let radius_km = engine.params().ellps().mean_radius();
        let (name, nx, ny) = (info.name().to_string(), info.nx(), info.ny());
        log::debug!("proj grid '{name}': {definition}, affine {affine:?}");

        Ok(ProjGrid {
            info,
            name,
            nx,
            ny,
            radius_km,
            engine,
            affine,
        })
    }

    /// The engine definition the grid was built from
    pub fn definition(&self) -> &str {
        self.engine.definition()
    }

    pub fn affine(&self) -> &AffineTransform {
        &self.affine
    }
}

// ----- G R I D R E P -----------------------------------------------------------------

impl GridRep for ProjGrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn nx(&self) -> usize {
        self.nx
    }

    fn ny(&self) -> usize {
        self.ny
    }

    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        match self.engine.fwd(lat.to_radians(), -lon.to_radians()) {
            Some((u, v)) => self.affine.forward(u, v),
            None => (f64::NAN, f64::NAN),
        }
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let (u, v) = self.affine.reverse(x, y);
        match self.engine.inv(u, v) {
            Some((lat, lon)) => (lat.to_degrees(), rescale_lon(-lon.to_degrees())),
            None => (f64::NAN, f64::NAN),
        }
    }

    fn calc_area(&self, x: i64, y: i64) -> Result<f64, Error> {
        let (x, y) = (x as f64, y as f64);
        let corners = [
            (x - 0.5, y - 0.5),
            (x + 0.5, y - 0.5),
            (x + 0.5, y + 0.5),
            (x - 0.5, y + 0.5),
        ];
        let mut lat = [0.; 4];
        let mut lon = [0.; 4];
        for (i, (cx, cy)) in corners.into_iter().enumerate() {
            (lat[i], lon[i]) = self.xy_to_latlon(cx, cy);
        }
        Ok(calc_area_ll(&lat, &lon, self.radius_km))
    }

    fn rot_grid_to_earth(&self, x: i64, y: i64) -> f64 {
        numerical_rotation(self, x, y)
    }

    fn serialize(&self, sep: &str) -> String {
        let items = match &self.info {
            GridInfo::Stereographic(d) => vec![
                "Projection: Stereographic".to_string(),
                format!("Nx: {}", d.nx),
                format!("Ny: {}", d.ny),
                format!("IsNorthHemisphere: {}", d.is_north()),
                format!("Scale_Lat: {:.3}", d.scale_lat),
                format!("Lat_pin: {:.3}", d.lat_pin),
                format!("Lon_pin: {:.3}", d.lon_pin),
                format!("X_pin: {:.3}", d.x_pin),
                format!("Y_pin: {:.3}", d.y_pin),
                format!("Lon_orient: {:.3}", d.lon_orient),
                format!("D_km: {:.3}", d.d_km),
                format!("R_km: {:.3}", d.r_km),
            ],
            GridInfo::Laea(d) => vec![
                "Projection: Lambert Azimuthal Equal Area".to_string(),
                format!("Nx: {}", d.nx),
                format!("Ny: {}", d.ny),
                format!("Standard_Lat: {:.3}", d.standard_lat),
                format!("Central_Lon: {:.3}", d.central_lon),
                format!("Lat_pin: {:.3}", d.lat_pin),
                format!("Lon_pin: {:.3}", d.lon_pin),
                format!("X_pin: {:.3}", d.x_pin),
                format!("Y_pin: {:.3}", d.y_pin),
                format!("D_km: {:.3}", d.d_km),
                format!("A_km: {:.3}", d.a_km),
                format!("B_km: {:.3}", d.b_km),
            ],
            // Unreachable: construction rejects other families
            other => vec![format!("Projection: {}", other.family())],
        };
        items.join(sep)
    }

    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        writeln!(out, "{p}Projection = {}", self.info.family())?;
        writeln!(out, "{p}Name       = \"{}\"", self.name)?;
        writeln!(out, "{p}Nx         = {}", self.nx)?;
        writeln!(out, "{p}Ny         = {}", self.ny)?;
        writeln!(out, "{p}Definition = \"{}\"", self.engine.definition())?;
        let (tx, ty) = self.affine.translation();
        writeln!(out, "{p}Affine     = scale {:.6}, offset ({tx:.4}, {ty:.4})", self.affine.det().sqrt())
    }

    fn info(&self) -> GridInfo {
        self.info.clone()
    }

    fn wrap_lon(&self) -> bool {
        false
    }

    fn is_global(&self) -> bool {
        false
    }

    fn scale_km(&self) -> Option<f64> {
        match &self.info {
            GridInfo::Stereographic(d) => Some(d.d_km),
            GridInfo::Laea(d) => Some(d.d_km),
            _ => None,
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------
