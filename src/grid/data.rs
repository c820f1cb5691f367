//! Projection parameter records: flat, immutable descriptions of one grid
//! instance per family. Angles in degrees, longitudes west positive.
use crate::Error;

/// Lambert conformal conic, with one or two secant latitudes
#[derive(Debug, Clone, Default)]
pub struct LambertData {
    pub name: String,
    pub scale_lat_1: f64,
    pub scale_lat_2: f64,
    pub lat_pin: f64,
    pub lon_pin: f64,
    pub x_pin: f64,
    pub y_pin: f64,
    pub lon_orient: f64,
    pub d_km: f64,
    pub r_km: f64,
    pub nx: usize,
    pub ny: usize,
}

/// Polar stereographic
#[derive(Debug, Clone, Default)]
pub struct StereographicData {
    pub name: String,
    /// 'N' or 'S'
    pub hemisphere: char,
    pub scale_lat: f64,
    pub lat_pin: f64,
    pub lon_pin: f64,
    pub x_pin: f64,
    pub y_pin: f64,
    pub lon_orient: f64,
    pub d_km: f64,
    pub r_km: f64,
    pub nx: usize,
    pub ny: usize,
}

/// Lambert azimuthal equal area, on a sphere or an ellipsoid.
/// `b_km == a_km` means a sphere.
#[derive(Debug, Clone, Default)]
pub struct LaeaData {
    pub name: String,
    pub standard_lat: f64,
    pub central_lon: f64,
    pub lat_pin: f64,
    pub lon_pin: f64,
    pub x_pin: f64,
    pub y_pin: f64,
    pub d_km: f64,
    pub a_km: f64,
    pub b_km: f64,
    pub nx: usize,
    pub ny: usize,
}

/// Regular latitude/longitude (plate carrée)
#[derive(Debug, Clone, Default)]
pub struct LatLonData {
    pub name: String,
    pub lat_ll: f64,
    pub lon_ll: f64,
    pub delta_lat: f64,
    pub delta_lon: f64,
    pub nlat: usize,
    pub nlon: usize,
}

/// Regular latitude/longitude grid on a rotated sphere. The south pole of
/// the rotated sphere sits at (`true_lat_south_pole`, `true_lon_south_pole`)
/// on the earth, and the rotated sphere is then turned eastward by
/// `aux_rotation` degrees about its polar axis. The `rot_` values are in
/// rotated coordinates, longitudes west positive as everywhere else.
#[derive(Debug, Clone, Default)]
pub struct RotatedLatLonData {
    pub name: String,
    pub rot_lat_ll: f64,
    pub rot_lon_ll: f64,
    pub delta_rot_lat: f64,
    pub delta_rot_lon: f64,
    pub nlat: usize,
    pub nlon: usize,
    pub true_lat_south_pole: f64,
    pub true_lon_south_pole: f64,
    pub aux_rotation: f64,
}

/// Mercator, given by its lower left and upper right corners
#[derive(Debug, Clone, Default)]
pub struct MercatorData {
    pub name: String,
    pub lat_ll: f64,
    pub lon_ll: f64,
    pub lat_ur: f64,
    pub lon_ur: f64,
    pub nx: usize,
    pub ny: usize,
}

/// Global Gaussian grid: `ny` Gaussian latitudes, `nx` equidistant longitudes
#[derive(Debug, Clone, Default)]
pub struct GaussianData {
    pub name: String,
    pub lon_zero: f64,
    pub nx: usize,
    pub ny: usize,
}

/// Point cloud of arbitrarily placed points
#[derive(Debug, Clone, Default)]
pub struct UnstructuredData {
    pub name: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// Queries farther than this from every point are rejected.
    /// `None` disables rejection.
    pub max_distance_km: Option<f64>,
}

// ----- V A L I D A T I O N -----------------------------------------------------------

fn check(condition: bool, what: &'static str) -> Result<(), Error> {
    if condition {
        return Ok(());
    }
    log::error!("Invalid grid descriptor: {what}");
    Err(Error::InvalidDescriptor(what))
}

fn check_dims(nx: usize, ny: usize) -> Result<(), Error> {
    check(nx >= 1 && ny >= 1, "grid dimensions must be at least 1")
}

fn check_lat(lat: f64, what: &'static str) -> Result<(), Error> {
    check(lat.is_finite() && lat.abs() <= 90., what)
}

impl LambertData {
    pub fn validate(&self) -> Result<(), Error> {
        check_dims(self.nx, self.ny)?;
        check(self.d_km > 0., "lambert: grid spacing must be positive")?;
        check(self.r_km > 0., "lambert: earth radius must be positive")?;
        check_lat(self.lat_pin, "lambert: bad pin latitude")?;
        check(
            self.scale_lat_1.abs() < 90. && self.scale_lat_2.abs() < 90.,
            "lambert: secant latitudes must be off the poles",
        )?;
        check(
            self.scale_lat_1 * self.scale_lat_2 > 0.,
            "lambert: secant latitudes must be in the same hemisphere",
        )
    }
}

impl StereographicData {
    pub fn validate(&self) -> Result<(), Error> {
        check_dims(self.nx, self.ny)?;
        check(
            self.hemisphere == 'N' || self.hemisphere == 'S',
            "stereographic: hemisphere must be 'N' or 'S'",
        )?;
        check(self.d_km > 0., "stereographic: grid spacing must be positive")?;
        check(self.r_km > 0., "stereographic: earth radius must be positive")?;
        check_lat(self.scale_lat, "stereographic: bad scale latitude")?;
        check_lat(self.lat_pin, "stereographic: bad pin latitude")
    }

    pub fn is_north(&self) -> bool {
        self.hemisphere == 'N'
    }
}

impl LaeaData {
    pub fn validate(&self) -> Result<(), Error> {
        check_dims(self.nx, self.ny)?;
        check(self.d_km > 0., "laea: grid spacing must be positive")?;
        check(
            self.a_km > 0. && self.b_km > 0. && self.b_km <= self.a_km,
            "laea: bad semi-axes",
        )?;
        check_lat(self.standard_lat, "laea: bad standard latitude")?;
        check_lat(self.lat_pin, "laea: bad pin latitude")
    }
}

impl LatLonData {
    pub fn validate(&self) -> Result<(), Error> {
        check_dims(self.nlon, self.nlat)?;
        check(
            self.delta_lat > 0. && self.delta_lon > 0.,
            "latlon: grid increments must be positive",
        )?;
        check_lat(self.lat_ll, "latlon: bad lower left latitude")?;
        // Some grids repeat the first meridian as their last column
        check(
            (self.nlon as f64 - 1.) * self.delta_lon <= 360. + 1e-6,
            "latlon: more than 360° of longitude",
        )
    }
}

impl RotatedLatLonData {
    pub fn validate(&self) -> Result<(), Error> {
        self.rotated_grid().validate()?;
        check_lat(self.true_lat_south_pole, "rotlatlon: bad south pole latitude")?;
        check(
            self.true_lon_south_pole.is_finite() && self.aux_rotation.is_finite(),
            "rotlatlon: bad south pole longitude or rotation",
        )
    }

    /// The grid, as seen in rotated coordinates
    pub fn rotated_grid(&self) -> LatLonData {
        LatLonData {
            name: self.name.clone(),
            lat_ll: self.rot_lat_ll,
            lon_ll: self.rot_lon_ll,
            delta_lat: self.delta_rot_lat,
            delta_lon: self.delta_rot_lon,
            nlat: self.nlat,
            nlon: self.nlon,
        }
    }
}

impl MercatorData {
    pub fn validate(&self) -> Result<(), Error> {
        check(
            self.nx >= 2 && self.ny >= 2,
            "mercator: grid dimensions must be at least 2",
        )?;
        check(
            self.lat_ll.abs() < 90. && self.lat_ur.abs() < 90.,
            "mercator: corner latitudes must be off the poles",
        )?;
        check(
            self.lat_ur > self.lat_ll,
            "mercator: upper right must be north of lower left",
        )
    }
}

impl GaussianData {
    pub fn validate(&self) -> Result<(), Error> {
        check(
            self.nx >= 1 && self.ny >= 2,
            "gaussian: need at least 2 latitudes",
        )
    }
}

impl UnstructuredData {
    pub fn validate(&self) -> Result<(), Error> {
        check(!self.lat.is_empty(), "unstructured: no points")?;
        check(
            self.lat.len() == self.lon.len(),
            "unstructured: lat/lon count mismatch",
        )?;
        check(
            self.lat.iter().all(|lat| lat.is_finite() && lat.abs() <= 90.)
                && self.lon.iter().all(|lon| lon.is_finite()),
            "unstructured: bad coordinates",
        )?;
        check(
            self.max_distance_km.map_or(true, |d| d > 0.),
            "unstructured: max distance must be positive",
        )
    }

    pub fn lat_checksum(&self) -> f64 {
        self.lat.iter().sum()
    }

    pub fn lon_checksum(&self) -> f64 {
        self.lon.iter().sum()
    }
}

// ----- T E S T S ---------------------------------------------------------------------
