//! The grid descriptor: parameters for exactly one projection family
use super::*;
use crate::math::rescale_lon;
use std::rc::Rc;

/// Parameters for exactly one grid, of exactly one family. Consumed by
/// [`GridInfo::create_grid`] to build the grid itself.
#[derive(Debug, Clone)]
pub enum GridInfo {
    Lambert(LambertData),
    Stereographic(StereographicData),
    Laea(LaeaData),
    LatLon(LatLonData),
    Mercator(MercatorData),
    Gaussian(GaussianData),
    RotatedLatLon(RotatedLatLonData),
    Unstructured(UnstructuredData),
}

impl GridInfo {
    /// Are the parameters valid for the family?
    pub fn ok(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self {
            GridInfo::Lambert(d) => d.validate(),
            GridInfo::Stereographic(d) => d.validate(),
            GridInfo::Laea(d) => d.validate(),
            GridInfo::LatLon(d) => d.validate(),
            GridInfo::Mercator(d) => d.validate(),
            GridInfo::Gaussian(d) => d.validate(),
            GridInfo::RotatedLatLon(d) => d.validate(),
            GridInfo::Unstructured(d) => d.validate(),
        }
    }

    /// Human readable name of the projection family
    pub fn family(&self) -> &'static str {
        match self {
            GridInfo::Lambert(_) => "Lambert Conformal",
            GridInfo::Stereographic(_) => "Stereographic",
            GridInfo::Laea(_) => "Lambert Azimuthal Equal Area",
            GridInfo::LatLon(_) => "Lat/Lon",
            GridInfo::Mercator(_) => "Mercator",
            GridInfo::Gaussian(_) => "Gaussian",
            GridInfo::RotatedLatLon(_) => "Rotated Lat/Lon",
            GridInfo::Unstructured(_) => "Unstructured",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GridInfo::Lambert(d) => &d.name,
            GridInfo::Stereographic(d) => &d.name,
            GridInfo::Laea(d) => &d.name,
            GridInfo::LatLon(d) => &d.name,
            GridInfo::Mercator(d) => &d.name,
            GridInfo::Gaussian(d) => &d.name,
            GridInfo::RotatedLatLon(d) => &d.name,
            GridInfo::Unstructured(d) => &d.name,
        }
    }

    pub fn nx(&self) -> usize {
        match self {
            GridInfo::Lambert(d) => d.nx,
            GridInfo::Stereographic(d) => d.nx,
            GridInfo::Laea(d) => d.nx,
            GridInfo::LatLon(d) => d.nlon,
            GridInfo::Mercator(d) => d.nx,
            GridInfo::Gaussian(d) => d.nx,
            GridInfo::RotatedLatLon(d) => d.nlon,
            GridInfo::Unstructured(d) => d.lat.len(),
        }
    }

    pub fn ny(&self) -> usize {
        match self {
            GridInfo::Lambert(d) => d.ny,
            GridInfo::Stereographic(d) => d.ny,
            GridInfo::Laea(d) => d.ny,
            GridInfo::LatLon(d) => d.nlat,
            GridInfo::Mercator(d) => d.ny,
            GridInfo::Gaussian(d) => d.ny,
            GridInfo::RotatedLatLon(d) => d.nlat,
            GridInfo::Unstructured(_) => 1,
        }
    }

    /// Build the grid representation. All construction errors surface here.
    pub fn create_rep(&self) -> Result<Rc<dyn GridRep>, Error> {
        let rep: Rc<dyn GridRep> = match self {
            GridInfo::Lambert(d) => Rc::new(LambertGrid::new(d)?),
            GridInfo::Stereographic(_) | GridInfo::Laea(_) => Rc::new(ProjGrid::new(self)?),
            GridInfo::LatLon(d) => Rc::new(LatLonGrid::new(d)?),
            GridInfo::Mercator(d) => Rc::new(MercatorGrid::new(d)?),
            GridInfo::Gaussian(d) => Rc::new(GaussianGrid::new(d)?),
            GridInfo::RotatedLatLon(d) => Rc::new(RotatedLatLonGrid::new(d)?),
            GridInfo::Unstructured(d) => Rc::new(UnstructuredGrid::new(d)?),
        };
        log::debug!("Created {} grid '{}'", self.family(), self.name());
        Ok(rep)
    }

    pub fn create_grid(&self) -> Result<Grid, Error> {
        Ok(Grid::from_rep(self.create_rep()?))
    }

    /// The same grid with its columns turned `n` steps: column `x` of
    /// `self` is column `x + n` of the result. Only the globe spanning
    /// families can be shifted, and only a whole number of turns leaves
    /// the others unchanged.
    pub fn shifted(&self, n: i64) -> Result<GridInfo, Error> {
        let nx = self.nx() as i64;
        if nx == 0 || n.rem_euclid(nx) == 0 {
            return Ok(self.clone());
        }
        let n = n as f64;
        let shifted = match self {
            GridInfo::LatLon(d) => GridInfo::LatLon(LatLonData {
                lon_ll: rescale_lon(d.lon_ll + n * d.delta_lon),
                ..d.clone()
            }),
            GridInfo::Gaussian(d) => GridInfo::Gaussian(GaussianData {
                lon_zero: rescale_lon(d.lon_zero + n * 360. / d.nx as f64),
                ..d.clone()
            }),
            GridInfo::Mercator(d) => {
                let step = n * 360. / (d.nx as f64 - 1.);
                GridInfo::Mercator(MercatorData {
                    lon_ll: rescale_lon(d.lon_ll + step),
                    lon_ur: rescale_lon(d.lon_ur + step),
                    ..d.clone()
                })
            }
            GridInfo::RotatedLatLon(d) => GridInfo::RotatedLatLon(RotatedLatLonData {
                rot_lon_ll: rescale_lon(d.rot_lon_ll + n * d.delta_rot_lon),
                ..d.clone()
            }),
            other => {
                log::error!("Cannot shift the columns of a {} grid", other.family());
                return Err(Error::Unsupported(format!("shift of {} grid", other.family())));
            }
        };
        Ok(shifted)
    }
}

// ----- E Q U A L I T Y ---------------------------------------------------------------

fn eq(a: f64, b: f64) -> bool {
    is_eq(a, b, LOOSE_TOL)
}

fn lon_eq(a: f64, b: f64) -> bool {
    eq(rescale_lon(a), rescale_lon(b))
}

fn lambert_eq(a: &LambertData, b: &LambertData) -> bool {
    a.nx == b.nx
        && a.ny == b.ny
        && eq(a.scale_lat_1, b.scale_lat_1)
        && eq(a.scale_lat_2, b.scale_lat_2)
        && eq(a.lat_pin, b.lat_pin)
        && lon_eq(a.lon_pin, b.lon_pin)
        && eq(a.x_pin, b.x_pin)
        && eq(a.y_pin, b.y_pin)
        && lon_eq(a.lon_orient, b.lon_orient)
        && eq(a.d_km, b.d_km)
        && eq(a.r_km, b.r_km)
}

fn stereographic_eq(a: &StereographicData, b: &StereographicData) -> bool {
    a.nx == b.nx
        && a.ny == b.ny
        && a.hemisphere == b.hemisphere
        && eq(a.scale_lat, b.scale_lat)
        && eq(a.lat_pin, b.lat_pin)
        && lon_eq(a.lon_pin, b.lon_pin)
        && eq(a.x_pin, b.x_pin)
        && eq(a.y_pin, b.y_pin)
        && lon_eq(a.lon_orient, b.lon_orient)
        && eq(a.d_km, b.d_km)
        && eq(a.r_km, b.r_km)
}

fn laea_eq(a: &LaeaData, b: &LaeaData) -> bool {
    a.nx == b.nx
        && a.ny == b.ny
        && eq(a.standard_lat, b.standard_lat)
        && lon_eq(a.central_lon, b.central_lon)
        && eq(a.lat_pin, b.lat_pin)
        && lon_eq(a.lon_pin, b.lon_pin)
        && eq(a.x_pin, b.x_pin)
        && eq(a.y_pin, b.y_pin)
        && eq(a.d_km, b.d_km)
        && eq(a.a_km, b.a_km)
        && eq(a.b_km, b.b_km)
}

fn latlon_eq(a: &LatLonData, b: &LatLonData) -> bool {
    a.nlat == b.nlat
        && a.nlon == b.nlon
        && eq(a.lat_ll, b.lat_ll)
        && lon_eq(a.lon_ll, b.lon_ll)
        && eq(a.delta_lat, b.delta_lat)
        && eq(a.delta_lon, b.delta_lon)
}

fn mercator_eq(a: &MercatorData, b: &MercatorData) -> bool {
    a.nx == b.nx
        && a.ny == b.ny
        && eq(a.lat_ll, b.lat_ll)
        && lon_eq(a.lon_ll, b.lon_ll)
        && eq(a.lat_ur, b.lat_ur)
        && lon_eq(a.lon_ur, b.lon_ur)
}

fn rotated_latlon_eq(a: &RotatedLatLonData, b: &RotatedLatLonData) -> bool {
    a.nlat == b.nlat
        && a.nlon == b.nlon
        && eq(a.rot_lat_ll, b.rot_lat_ll)
        && lon_eq(a.rot_lon_ll, b.rot_lon_ll)
        && eq(a.delta_rot_lat, b.delta_rot_lat)
        && eq(a.delta_rot_lon, b.delta_rot_lon)
        && eq(a.true_lat_south_pole, b.true_lat_south_pole)
        && lon_eq(a.true_lon_south_pole, b.true_lon_south_pole)
        && eq(a.aux_rotation, b.aux_rotation)
}

fn gaussian_eq(a: &GaussianData, b: &GaussianData) -> bool {
    a.nx == b.nx && a.ny == b.ny && lon_eq(a.lon_zero, b.lon_zero)
}

// Point count, end points and checksums: cheap, and sufficient in practice
fn unstructured_eq(a: &UnstructuredData, b: &UnstructuredData) -> bool {
    let n = a.lat.len();
    if n != b.lat.len() || n != a.lon.len() || n != b.lon.len() {
        return false;
    }
    if n == 0 {
        return true;
    }
    eq(a.lat[0], b.lat[0])
        && eq(a.lon[0], b.lon[0])
        && eq(a.lat[n - 1], b.lat[n - 1])
        && eq(a.lon[n - 1], b.lon[n - 1])
        && eq(a.lat_checksum(), b.lat_checksum())
        && eq(a.lon_checksum(), b.lon_checksum())
        && a.max_distance_km == b.max_distance_km
}

/// Structural equality of the defining parameters. Names do not take part.
impl PartialEq for GridInfo {
    fn eq(&self, other: &GridInfo) -> bool {
        match (self, other) {
            (GridInfo::Lambert(a), GridInfo::Lambert(b)) => lambert_eq(a, b),
            (GridInfo::Stereographic(a), GridInfo::Stereographic(b)) => stereographic_eq(a, b),
            (GridInfo::Laea(a), GridInfo::Laea(b)) => laea_eq(a, b),
            (GridInfo::LatLon(a), GridInfo::LatLon(b)) => latlon_eq(a, b),
            (GridInfo::Mercator(a), GridInfo::Mercator(b)) => mercator_eq(a, b),
            (GridInfo::Gaussian(a), GridInfo::Gaussian(b)) => gaussian_eq(a, b),
            (GridInfo::RotatedLatLon(a), GridInfo::RotatedLatLon(b)) => rotated_latlon_eq(a, b),
            (GridInfo::Unstructured(a), GridInfo::Unstructured(b)) => unstructured_eq(a, b),
            _ => false,
        }
    }
}

// ----- C O N V E R S I O N S ---------------------------------------------------------

impl From<LambertData> for GridInfo {
    fn from(data: LambertData) -> GridInfo {
        GridInfo::Lambert(data)
    }
}

impl From<StereographicData> for GridInfo {
    fn from(data: StereographicData) -> GridInfo {
        GridInfo::Stereographic(data)
    }
}

impl From<LaeaData> for GridInfo {
    fn from(data: LaeaData) -> GridInfo {
        GridInfo::Laea(data)
    }
}

impl From<LatLonData> for GridInfo {
    fn from(data: LatLonData) -> GridInfo {
        GridInfo::LatLon(data)
    }
}

impl From<MercatorData> for GridInfo {
    fn from(data: MercatorData) -> GridInfo {
        GridInfo::Mercator(data)
    }
}

impl From<GaussianData> for GridInfo {
    fn from(data: GaussianData) -> GridInfo {
        GridInfo::Gaussian(data)
    }
}

impl From<RotatedLatLonData> for GridInfo {
    fn from(data: RotatedLatLonData) -> GridInfo {
        GridInfo::RotatedLatLon(data)
    }
}

impl From<UnstructuredData> for GridInfo {
    fn from(data: UnstructuredData) -> GridInfo {
        GridInfo::Unstructured(data)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn g211() -> LambertData {
        LambertData {
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
        }
    }

    #[test]
    fn structural_equality() {
        let a: GridInfo = g211().into();

        // Names and longitude representations do not matter...
        let mut data = g211();
        data.name = "another name".to_string();
        data.lon_pin -= 360.;
        data.d_km += 1e-7;
        let b: GridInfo = data.into();
        assert_eq!(a, b);

        // ...but parameters do
        let mut data = g211();
        data.nx += 1;
        assert_ne!(a, GridInfo::from(data));
        let mut data = g211();
        data.scale_lat_2 = 25.1;
        assert_ne!(a, GridInfo::from(data));

        // Different families never compare equal
        let c = GridInfo::from(GaussianData {
            name: "G211".to_string(),
            lon_zero: 0.,
            nx: 93,
            ny: 65,
        });
        assert_ne!(a, c);
    }

    #[test]
    fn accessors_and_validation() {
        let a = GridInfo::from(g211());
        assert!(a.ok());
        assert_eq!(a.family(), "Lambert Conformal");
        assert_eq!((a.name(), a.nx(), a.ny()), ("G211", 93, 65));

        let mut data = g211();
        data.d_km = 0.;
        let b = GridInfo::from(data);
        assert!(!b.ok());
        assert!(matches!(b.create_grid(), Err(Error::InvalidDescriptor(_))));
    }

    #[test]
    fn dispatch() -> Result<(), Error> {
        let rep = GridInfo::from(g211()).create_rep()?;
        assert_eq!(rep.name(), "G211");
        assert!(rep.serialize(" ").starts_with("Projection: Lambert Conformal"));

        let info = GridInfo::from(LatLonData {
            name: "G002".to_string(),
            lat_ll: -90.,
            lon_ll: 0.,
            delta_lat: 2.5,
            delta_lon: 2.5,
            nlat: 73,
            nlon: 144,
        });
        let rep = info.create_rep()?;
        assert!(rep.is_global());
        assert_eq!(rep.info(), info);

        let info = GridInfo::from(rotated());
        let rep = info.create_rep()?;
        assert_eq!((rep.nx(), rep.ny()), (121, 81));
        assert!(rep.serialize(" ").starts_with("Projection: Rotated Lat/Lon"));
        assert_eq!(rep.info(), info);
        Ok(())
    }

    fn rotated() -> RotatedLatLonData {
        RotatedLatLonData {
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
        }
    }

    #[test]
    fn rotated_latlon_equality() {
        let a = GridInfo::from(rotated());
        assert_eq!(a.family(), "Rotated Lat/Lon");

        let b = GridInfo::from(RotatedLatLonData {
            name: "elsewhere".to_string(),
            true_lon_south_pole: 350.,
            ..rotated()
        });
        assert_eq!(a, b);

        let c = GridInfo::from(RotatedLatLonData {
            aux_rotation: 5.,
            ..rotated()
        });
        assert_ne!(a, c);

        // A plain lat/lon grid is never a rotated one, pole or no pole
        let plain = GridInfo::from(rotated().rotated_grid());
        assert_ne!(a, plain);
    }

    #[test]
    fn shifted() -> Result<(), Error> {
        let info = GridInfo::from(LatLonData {
            name: "G002".to_string(),
            lat_ll: -90.,
            lon_ll: 0.,
            delta_lat: 2.5,
            delta_lon: 2.5,
            nlat: 73,
            nlon: 144,
        });
        let old = info.create_rep()?;
        let new = info.shifted(10)?.create_rep()?;
        for x in [0., 17., 133.] {
            let (lat, lon) = old.xy_to_latlon(x, 20.);
            let (nlat, nlon) = new.xy_to_latlon(x + 10., 20.);
            assert!(is_eq(lat, nlat, 1e-9));
            assert!(is_eq(rescale_lon(lon - nlon), 0., 1e-9));
        }

        let gaussian = GridInfo::from(GaussianData {
            name: "T62".to_string(),
            lon_zero: 0.,
            nx: 192,
            ny: 94,
        });
        let old = gaussian.create_rep()?;
        let new = gaussian.shifted(-3)?.create_rep()?;
        let (_, lon) = old.xy_to_latlon(50., 10.);
        let (_, nlon) = new.xy_to_latlon(47., 10.);
        assert!(is_eq(rescale_lon(lon - nlon), 0., 1e-9));

        // Whole turns change nothing, and regional grids cannot be shifted
        assert_eq!(info.shifted(144)?, info);
        let g211 = GridInfo::from(g211());
        assert_eq!(g211.shifted(0)?, g211);
        assert!(matches!(g211.shifted(1), Err(Error::Unsupported(_))));
        Ok(())
    }
}
