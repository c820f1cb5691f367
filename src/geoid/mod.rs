//! Reference ellipsoids and spheres, in kilometres
mod latitudes;

use crate::Error;
use once_cell::sync::Lazy;

/// Mean earth radius used by NCEP, in km
pub const NCEP_EARTH_RADIUS_KM: f64 = 6371.20;

/// Earth radius used by the WRF model and the DTC grids, in km
pub const WRF_EARTH_RADIUS_KM: f64 = 6367.47;

/// The NCEP sphere: the default earth for grids without an explicit radius
pub static SPHERE: Lazy<GeoidParameters> =
    Lazy::new(|| GeoidParameters::sphere(NCEP_EARTH_RADIUS_KM).with_name("sphere"));

/// The sphere used by WRF
pub static MET_SPHERE: Lazy<GeoidParameters> =
    Lazy::new(|| GeoidParameters::sphere(WRF_EARTH_RADIUS_KM).with_name("met_sphere"));

pub static WGS84: Lazy<GeoidParameters> = Lazy::new(|| {
    GeoidParameters::from_flattening(6_378.137, 1. / 298.257_223_563).with_name("WGS84")
});

pub static GRS80: Lazy<GeoidParameters> = Lazy::new(|| {
    GeoidParameters::from_flattening(6_378.137, 1. / 298.257_222_100_882_7).with_name("GRS80")
});

/// Size and shape of the earth model underlying a projection: semimajor
/// axis *a* and semiminor axis *b*, both in km. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoidParameters {
    a: f64,
    b: f64,
    name: Option<String>,
}

/// GRS80 is the default ellipsoid.
impl Default for GeoidParameters {
    fn default() -> GeoidParameters {
        GRS80.clone()
    }
}

impl GeoidParameters {
    /// User defined ellipsoid, from its two semi-axes
    #[must_use]
    pub fn new(a_km: f64, b_km: f64) -> GeoidParameters {
        GeoidParameters {
            a: a_km,
            b: b_km,
            name: None,
        }
    }

    /// User defined ellipsoid, from semimajor axis and flattening
    #[must_use]
    pub fn from_flattening(a_km: f64, flattening: f64) -> GeoidParameters {
        GeoidParameters::new(a_km, a_km * (1.0 - flattening))
    }

    #[must_use]
    pub fn sphere(radius_km: f64) -> GeoidParameters {
        GeoidParameters::new(radius_km, radius_km)
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> GeoidParameters {
        self.name = Some(name.to_string());
        self
    }

    /// Predefined ellipsoid or sphere, or an ad-hoc one given as
    /// `"a, rf"` (semimajor axis in km, reciprocal flattening)
    pub fn named(name: &str) -> Result<GeoidParameters, Error> {
        let builtin = match name {
            "sphere" | "ncep_sphere" => Some(SPHERE.clone()),
            "met_sphere" | "wrf_sphere" => Some(MET_SPHERE.clone()),
            "WGS84" | "WGS_84" => Some(WGS84.clone()),
            "GRS80" => Some(GRS80.clone()),
            "intl" => Some(GeoidParameters::from_flattening(6_378.388, 1. / 297.0)),
            "clrk66" => Some(GeoidParameters::from_flattening(6_378.206_4, 1. / 294.978_698_2)),
            "bessel" => Some(GeoidParameters::from_flattening(6_377.397_155, 1. / 299.152_812_8)),
            _ => None,
        };
        if let Some(geoid) = builtin {
            return Ok(geoid);
        }

        // Ad-hoc definition: "a, rf"
        let parts: Vec<&str> = name.split(',').map(|p| p.trim()).collect();
        if parts.len() == 2 {
            if let (Ok(a), Ok(rf)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
                let f = if rf == 0.0 { 0.0 } else { 1.0 / rf };
                return Ok(GeoidParameters::from_flattening(a, f));
            }
        }

        Err(Error::NotFound(
            String::from(name),
            ": unknown ellipsoid".to_string(),
        ))
    }

    // ----- Axes ------------------------------------------------------------------

    /// The semimajor axis, *a*, in km
    #[must_use]
    pub fn a_km(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*, in km
    #[must_use]
    pub fn b_km(&self) -> f64 {
        self.b
    }

    /// Mean radius, *(2a + b) / 3*
    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        (2.0 * self.a + self.b) / 3.0
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn is_sphere(&self) -> bool {
        self.a == self.b
    }

    // ----- Flattening and eccentricities -----------------------------------------

    /// The flattening, *f = 1 - b/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        1.0 - self.b / self.a
    }

    /// The squared eccentricity *e² = 1 - (b/a)²*
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        let ratio = self.b / self.a;
        1.0 - ratio * ratio
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }
}

// ----- Tests ---------------------------------------------------------------------
