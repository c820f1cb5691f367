//! The shared, reference counted grid handle
use super::*;
use crate::math::rescale_lon;
use std::rc::Rc;

/// A handle to a shared grid representation. Cloning the handle shares
/// the representation, which is dropped with the last handle.
///
/// An empty handle is valid: its geometry operations return neutral
/// values (zeros, empty strings), so call sites can defer validation.
/// The exceptions are [`Grid::info`] and [`Grid::rot_grid_to_earth`],
/// which have no meaningful neutral value.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rep: Option<Rc<dyn GridRep>>,
}

/// Index of the lower left cell of a run of `n` cells centered on `center`.
/// Odd runs center on the nearest cell, even runs on the nearest corner.
pub fn ll_func(center: f64, n: usize) -> i64 {
    let n = n as i64;
    if n % 2 == 1 {
        center.round() as i64 - (n - 1) / 2
    } else {
        center.floor() as i64 - (n / 2 - 1)
    }
}

impl Grid {
    /// A new grid, with its own, freshly built, representation
    pub fn new(info: &GridInfo) -> Result<Grid, Error> {
        info.create_grid()
    }

    pub fn from_rep(rep: Rc<dyn GridRep>) -> Grid {
        Grid { rep: Some(rep) }
    }

    /// Replace the representation with a freshly built one
    pub fn set(&mut self, info: &GridInfo) -> Result<(), Error> {
        let rep = info.create_rep()?;
        self.rep = Some(rep);
        Ok(())
    }

    /// Release the representation, leaving an empty handle
    pub fn clear(&mut self) {
        self.rep = None;
    }

    pub fn is_empty(&self) -> bool {
        self.rep.is_none()
    }

    /// Number of handles sharing the representation (0 if empty)
    pub fn ref_count(&self) -> usize {
        self.rep.as_ref().map_or(0, Rc::strong_count)
    }

    /// The representation itself, if any
    pub fn rep(&self) -> Option<&dyn GridRep> {
        self.rep.as_deref()
    }

    // ----- F O R W A R D E D   O P E R A T I O N S -----

    pub fn name(&self) -> &str {
        self.rep.as_ref().map_or("(no name)", |rep| rep.name())
    }

    pub fn nx(&self) -> usize {
        self.rep.as_ref().map_or(0, |rep| rep.nx())
    }

    pub fn ny(&self) -> usize {
        self.rep.as_ref().map_or(0, |rep| rep.ny())
    }

    pub fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        self.rep
            .as_ref()
            .map_or((0., 0.), |rep| rep.latlon_to_xy(lat, lon))
    }

    pub fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        self.rep
            .as_ref()
            .map_or((0., 0.), |rep| rep.xy_to_latlon(x, y))
    }

    pub fn calc_area(&self, x: i64, y: i64) -> Result<f64, Error> {
        match &self.rep {
            Some(rep) => rep.calc_area(x, y),
            None => Ok(0.),
        }
    }

    pub fn rot_grid_to_earth(&self, x: i64, y: i64) -> Result<f64, Error> {
        let Some(rep) = &self.rep else {
            log::error!("rot_grid_to_earth: empty grid");
            return Err(Error::EmptyGrid("rot_grid_to_earth"));
        };
        Ok(rep.rot_grid_to_earth(x, y))
    }

    pub fn serialize(&self, sep: &str) -> String {
        self.rep
            .as_ref()
            .map_or(String::new(), |rep| rep.serialize(sep))
    }

    pub fn info(&self) -> Result<GridInfo, Error> {
        let Some(rep) = &self.rep else {
            log::error!("info: empty grid");
            return Err(Error::EmptyGrid("info"));
        };
        Ok(rep.info())
    }

    pub fn wrap_lon(&self) -> bool {
        self.rep.as_ref().map_or(false, |rep| rep.wrap_lon())
    }

    pub fn is_global(&self) -> bool {
        self.rep.as_ref().map_or(false, |rep| rep.is_global())
    }

    /// Nominal cell size in km. None for empty handles, and for the
    /// families not defined by a cell size.
    pub fn scale_km(&self) -> Option<f64> {
        self.rep.as_ref().and_then(|rep| rep.scale_km())
    }

    /// Is `(x, y)` within the cells of the grid?
    pub fn xy_is_inside(&self, x: f64, y: f64) -> bool {
        let (nx, ny) = (self.nx() as f64, self.ny() as f64);
        (-0.5..nx - 0.5).contains(&x) && (-0.5..ny - 0.5).contains(&y)
    }

    pub fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        writeln!(out, "{p}Grid Base ...")?;
        match &self.rep {
            Some(rep) => rep.dump(out, depth + 1),
            None => writeln!(out, "{p}   (empty)"),
        }
    }

    /// [`Grid::dump`] to the log, at debug level
    pub fn log_dump(&self) {
        let mut text = String::new();
        if self.dump(&mut text, 0).is_ok() {
            log::debug!("\n{text}");
        }
    }

    // ----- S U B S E T S -----

    /// A grid covering the `nx`×`ny` cells of this one, starting at cell
    /// `(x_ll, y_ll)`. Only for families with a pin point.
    pub fn subset_ll(&self, x_ll: i64, y_ll: i64, nx: usize, ny: usize) -> Result<Grid, Error> {
        if nx < 2 || ny < 2 {
            log::warn!("subset_ll: size {nx}x{ny} too small");
            return Err(Error::BadParam(
                "subset size".to_string(),
                format!("{nx}x{ny}"),
            ));
        }
        let info = self.info()?;
        let (lat_ll, lon_ll) = self.xy_to_latlon(x_ll as f64, y_ll as f64);
        let name = format!("{} subset", info.name());

        let subset = match info {
            GridInfo::Lambert(d) => GridInfo::Lambert(LambertData {
                name,
                lat_pin: lat_ll,
                lon_pin: lon_ll,
                x_pin: 0.,
                y_pin: 0.,
                nx,
                ny,
                ..d
            }),
            GridInfo::Stereographic(d) => GridInfo::Stereographic(StereographicData {
                name,
                lat_pin: lat_ll,
                lon_pin: lon_ll,
                x_pin: 0.,
                y_pin: 0.,
                nx,
                ny,
                ..d
            }),
            GridInfo::LatLon(d) => GridInfo::LatLon(LatLonData {
                name,
                lat_ll,
                lon_ll,
                nlat: ny,
                nlon: nx,
                ..d
            }),
            GridInfo::RotatedLatLon(d) => GridInfo::RotatedLatLon(RotatedLatLonData {
                name,
                rot_lat_ll: d.rot_lat_ll + y_ll as f64 * d.delta_rot_lat,
                rot_lon_ll: rescale_lon(d.rot_lon_ll - x_ll as f64 * d.delta_rot_lon),
                nlat: ny,
                nlon: nx,
                ..d
            }),
            GridInfo::Mercator(_) => {
                let x_ur = (x_ll + nx as i64 - 1) as f64;
                let y_ur = (y_ll + ny as i64 - 1) as f64;
                let (lat_ur, lon_ur) = self.xy_to_latlon(x_ur, y_ur);
                GridInfo::Mercator(MercatorData {
                    name,
                    lat_ll,
                    lon_ll,
                    lat_ur,
                    lon_ur,
                    nx,
                    ny,
                })
            }
            other => {
                log::error!("subset_ll: not supported for {} grids", other.family());
                return Err(Error::Unsupported(format!(
                    "subset of {} grid",
                    other.family()
                )));
            }
        };
        subset.create_grid()
    }

    /// A grid of `nx`×`ny` cells of this one, centered on `(lat, lon)`
    pub fn subset_center(&self, lat: f64, lon: f64, nx: usize, ny: usize) -> Result<Grid, Error> {
        let (x, y) = self.latlon_to_xy(lat, lon);
        self.subset_ll(ll_func(x, nx), ll_func(y, ny), nx, ny)
    }

    /// Turn a global grid `n` columns east, matching data planes whose
    /// column `x` has moved to column `(x + n) % nx`. Only this handle
    /// gets the new representation: other handles keep the old one.
    pub fn shift_right(&mut self, n: i64) -> Result<(), Error> {
        let Some(rep) = &self.rep else {
            log::error!("shift_right: empty grid");
            return Err(Error::EmptyGrid("shift_right"));
        };
        let nx = rep.nx() as i64;
        if nx == 0 || n.rem_euclid(nx) == 0 {
            return Ok(());
        }
        if !rep.is_global() {
            log::error!("shift_right: grid '{}' is not global", rep.name());
            return Err(Error::BadParam("shift".to_string(), rep.name().to_string()));
        }
        let info = rep.info().shifted(n)?;
        log::debug!("shift_right: '{}' by {n} columns", rep.name());
        self.set(&info)
    }
}

/// Structural comparison of the grid parameters. An empty handle is
/// equal to nothing, not even another empty handle, or itself.
impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        match (&self.rep, &other.rep) {
            (Some(a), Some(b)) => a.info() == b.info(),
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize(" "))
    }
}

impl From<Rc<dyn GridRep>> for Grid {
    fn from(rep: Rc<dyn GridRep>) -> Grid {
        Grid::from_rep(rep)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use std::cell::Cell;

    // A representation that counts its own destruction
    #[derive(Debug)]
    struct Counted {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    impl GridRep for Counted {
        fn name(&self) -> &str {
            "counted"
        }
        fn nx(&self) -> usize {
            3
        }
        fn ny(&self) -> usize {
            2
        }
        fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
            (lon, lat)
        }
        fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
            (y, x)
        }
        fn calc_area(&self, _x: i64, _y: i64) -> Result<f64, Error> {
            Ok(1.)
        }
        fn rot_grid_to_earth(&self, _x: i64, _y: i64) -> f64 {
            0.
        }
        fn serialize(&self, _sep: &str) -> String {
            "counted".to_string()
        }
        fn dump(&self, out: &mut dyn fmt::Write, _depth: usize) -> fmt::Result {
            writeln!(out, "counted")
        }
        fn info(&self) -> GridInfo {
            GridInfo::Gaussian(GaussianData::default())
        }
        fn wrap_lon(&self) -> bool {
            false
        }
        fn is_global(&self) -> bool {
            false
        }
    }

    #[test]
    fn reference_counting() {
        let drops = Rc::new(Cell::new(0));
        let grid = Grid::from_rep(Rc::new(Counted {
            drops: drops.clone(),
        }));
        assert_eq!(grid.ref_count(), 1);

        let copies: Vec<Grid> = (0..5).map(|_| grid.clone()).collect();
        assert_eq!(grid.ref_count(), 6);

        // Dropping all but one keeps the representation alive
        drop(grid);
        let last = copies[4].clone();
        drop(copies);
        assert_eq!(drops.get(), 0);
        assert_eq!(last.ref_count(), 1);
        assert_eq!(last.name(), "counted");

        let mut last = last;
        last.clear();
        assert_eq!(drops.get(), 1);
        assert_eq!(last.ref_count(), 0);
    }

    #[test]
    fn empty_handle() {
        let grid = Grid::default();
        assert!(grid.is_empty());
        assert_eq!((grid.nx(), grid.ny()), (0, 0));
        assert_eq!(grid.name(), "(no name)");
        assert_eq!(grid.serialize(" "), "");
        assert_eq!(grid.latlon_to_xy(10., 20.), (0., 0.));
        assert_eq!(grid.xy_to_latlon(1., 2.), (0., 0.));
        assert_eq!(grid.calc_area(1, 1).ok(), Some(0.));
        assert!(matches!(grid.rot_grid_to_earth(0, 0), Err(Error::EmptyGrid(_))));
        assert!(matches!(grid.info(), Err(Error::EmptyGrid(_))));
        assert!(!grid.xy_is_inside(0., 0.));
        assert_eq!(grid.scale_km(), None);

        // Empty handles never compare equal
        assert_ne!(grid, Grid::default());
        assert!(grid != grid.clone());

        let mut grid = grid;
        assert!(matches!(grid.shift_right(3), Err(Error::EmptyGrid(_))));
    }

    #[test]
    fn ll_centering() {
        assert_eq!(ll_func(10.4, 5), 8);
        assert_eq!(ll_func(10.6, 5), 9);
        assert_eq!(ll_func(10.6, 4), 9);
        assert_eq!(ll_func(10.4, 2), 10);
    }

    fn lambert() -> Result<Grid, Error> {
        Grid::new(&GridInfo::Lambert(LambertData {
            name: "G211".to_string(),
            scale_lat_1: 25.,
            scale_lat_2: 25.,
            lat_pin: 12.19,
            lon_pin: 133.459,
            lon_orient: 95.,
            d_km: 81.271,
            r_km: 6371.2,
            nx: 93,
            ny: 65,
            ..Default::default()
        }))
    }

    #[test]
    fn set_and_compare() -> Result<(), Error> {
        let a = lambert()?;
        let b = lambert()?;
        assert_eq!(a, b);
        assert_ne!(a, Grid::default());
        assert_eq!(a.to_string(), b.serialize(" "));

        let mut c = a.clone();
        assert_eq!(a.ref_count(), 2);
        c.set(&GridInfo::Gaussian(GaussianData {
            name: "G098".to_string(),
            lon_zero: 0.,
            nx: 192,
            ny: 94,
        }))?;
        assert_eq!(a.ref_count(), 1);
        assert_ne!(a, c);
        assert!(c.is_global());

        let mut text = String::new();
        a.dump(&mut text, 0).map_err(|_| Error::General("dump"))?;
        assert!(text.starts_with("Grid Base ...\n   Projection = Lambert Conformal"));
        Ok(())
    }

    #[test]
    fn inside() -> Result<(), Error> {
        let grid = lambert()?;
        assert!(grid.xy_is_inside(-0.5, 0.));
        assert!(grid.xy_is_inside(92.49, 64.49));
        assert!(!grid.xy_is_inside(92.5, 10.));
        assert!(!grid.xy_is_inside(10., -0.51));
        Ok(())
    }

    #[test]
    fn subsets() -> Result<(), Error> {
        let grid = lambert()?;
        let sub = grid.subset_ll(10, 20, 30, 15)?;
        assert_eq!((sub.nx(), sub.ny()), (30, 15));
        for (x, y) in [(0., 0.), (12.5, 7.25), (29., 14.)] {
            let (lat, lon) = sub.xy_to_latlon(x, y);
            let (xx, yy) = grid.latlon_to_xy(lat, lon);
            assert_float_eq!(xx, x + 10., abs <= 1e-6);
            assert_float_eq!(yy, y + 20., abs <= 1e-6);
        }

        // Centered on a cell center: odd sizes put it in the middle cell
        let (lat, lon) = grid.xy_to_latlon(50., 30.);
        let sub = grid.subset_center(lat, lon, 5, 5)?;
        let (x, y) = sub.latlon_to_xy(lat, lon);
        assert_float_eq!(x, 2., abs <= 1e-6);
        assert_float_eq!(y, 2., abs <= 1e-6);

        assert!(matches!(grid.subset_ll(0, 0, 1, 5), Err(Error::BadParam(..))));
        let gaussian = Grid::new(&GridInfo::Gaussian(GaussianData {
            name: "G098".to_string(),
            lon_zero: 0.,
            nx: 192,
            ny: 94,
        }))?;
        assert!(matches!(gaussian.subset_ll(0, 0, 5, 5), Err(Error::Unsupported(_))));

        let rotated = Grid::new(&GridInfo::RotatedLatLon(RotatedLatLonData {
            name: "europe".to_string(),
            rot_lat_ll: -10.,
            rot_lon_ll: 15.,
            delta_rot_lat: 0.25,
            delta_rot_lon: 0.25,
            nlat: 81,
            nlon: 121,
            true_lat_south_pole: -40.,
            true_lon_south_pole: -10.,
            aux_rotation: 0.,
        }))?;
        let sub = rotated.subset_ll(40, 30, 11, 9)?;
        for (x, y) in [(0., 0.), (10., 8.)] {
            let (lat, lon) = sub.xy_to_latlon(x, y);
            let (xx, yy) = rotated.latlon_to_xy(lat, lon);
            assert_float_eq!(xx, x + 40., abs <= 1e-8);
            assert_float_eq!(yy, y + 30., abs <= 1e-8);
        }
        Ok(())
    }

    #[test]
    fn shift_right() -> Result<(), Error> {
        let info = GridInfo::LatLon(LatLonData {
            name: "G002".to_string(),
            lat_ll: -90.,
            lon_ll: 0.,
            delta_lat: 2.5,
            delta_lon: 2.5,
            nlat: 73,
            nlon: 144,
        });
        let original = Grid::new(&info)?;
        let mut grid = original.clone();
        grid.shift_right(5)?;
        assert_ne!(grid, original);
        assert_eq!(original.ref_count(), 1);
        for x in [0., 70., 138.] {
            let (lat, lon) = original.xy_to_latlon(x, 36.);
            let (xx, yy) = grid.latlon_to_xy(lat, lon);
            assert_float_eq!(xx, x + 5., abs <= 1e-8);
            assert_float_eq!(yy, 36., abs <= 1e-8);
        }

        // Back again, by the same amount the other way, or a full turn
        grid.shift_right(-5)?;
        assert_eq!(grid, original);
        grid.shift_right(144)?;
        assert_eq!(grid, original);

        let mut regional = lambert()?;
        assert!(regional.shift_right(0).is_ok());
        assert!(matches!(regional.shift_right(2), Err(Error::BadParam(..))));
        Ok(())
    }

    #[test]
    fn scale_km() -> Result<(), Error> {
        let grid = lambert()?;
        assert_eq!(grid.scale_km(), Some(81.271));

        let stereo = Grid::new(&GridInfo::Stereographic(StereographicData {
            name: "G005".to_string(),
            hemisphere: 'N',
            scale_lat: 60.,
            lat_pin: 7.647,
            lon_pin: 133.443,
            lon_orient: 105.,
            d_km: 190.5,
            r_km: 6371.2,
            nx: 53,
            ny: 57,
            ..Default::default()
        }))?;
        assert_eq!(stereo.scale_km(), Some(190.5));

        let gaussian = Grid::new(&GridInfo::Gaussian(GaussianData {
            name: "G098".to_string(),
            lon_zero: 0.,
            nx: 192,
            ny: 94,
        }))?;
        assert_eq!(gaussian.scale_km(), None);
        Ok(())
    }
}
