//! Grid specifications: the family keyword followed by its parameters,
//! whitespace separated, e.g.
//! `lambert 185 129 12.19 133.459 95 40.635 6371.2 25 N`
use super::*;
use std::str::FromStr;

/// Parse a grid specification, longitudes west positive
pub fn parse_grid_def(spec: &str) -> Result<GridInfo, Error> {
    parse_grid_def_with(spec, true)
}

/// Parse a grid specification. With `west_longitude_positive` false, the
/// longitudes of the specification are east positive, and are negated on
/// the way in.
pub fn parse_grid_def_with(spec: &str, west_longitude_positive: bool) -> Result<GridInfo, Error> {
    let tokens: Vec<&str> = spec.split_whitespace().collect();
    let Some(family) = tokens.first() else {
        return Err(bad_spec("empty grid specification", spec));
    };
    let sign = if west_longitude_positive { 1. } else { -1. };
    let name = tokens.join(" ");
    let p = Tokens { tokens: &tokens, spec };

    let info = match family.to_lowercase().as_str() {
        "lambert" => {
            p.count(&[10, 11], "lambert")?;
            let phi_1: f64 = p.get(8)?;
            let (phi_2, h) = if tokens.len() == 11 {
                (p.get(9)?, 10)
            } else {
                (phi_1, 9)
            };
            let hemisphere = p.hemisphere(h)?;
            let north = hemisphere == 'N';
            if (north && (phi_1 <= 0. || phi_2 <= 0.)) || (!north && (phi_1 >= 0. || phi_2 >= 0.)) {
                return Err(bad_spec("secant latitudes in the wrong hemisphere", spec));
            }
            GridInfo::Lambert(LambertData {
                name,
                nx: p.get(1)?,
                ny: p.get(2)?,
                lat_pin: p.get(3)?,
                lon_pin: sign * p.get::<f64>(4)?,
                x_pin: 0.,
                y_pin: 0.,
                lon_orient: sign * p.get::<f64>(5)?,
                d_km: p.get(6)?,
                r_km: p.get(7)?,
                scale_lat_1: phi_1,
                scale_lat_2: phi_2,
            })
        }

        "stereo" => {
            p.count(&[10], "stereo")?;
            GridInfo::Stereographic(StereographicData {
                name,
                nx: p.get(1)?,
                ny: p.get(2)?,
                lat_pin: p.get(3)?,
                lon_pin: sign * p.get::<f64>(4)?,
                x_pin: 0.,
                y_pin: 0.,
                lon_orient: sign * p.get::<f64>(5)?,
                d_km: p.get(6)?,
                r_km: p.get(7)?,
                scale_lat: p.get(8)?,
                hemisphere: p.hemisphere(9)?,
            })
        }

        "latlon" => {
            p.count(&[7], "latlon")?;
            GridInfo::LatLon(LatLonData {
                name,
                nlon: p.get(1)?,
                nlat: p.get(2)?,
                lat_ll: p.get(3)?,
                lon_ll: sign * p.get::<f64>(4)?,
                delta_lat: p.get(5)?,
                delta_lon: p.get(6)?,
            })
        }

        "rotlatlon" => {
            p.count(&[10], "rotlatlon")?;
            GridInfo::RotatedLatLon(RotatedLatLonData {
                name,
                nlon: p.get(1)?,
                nlat: p.get(2)?,
                rot_lat_ll: p.get(3)?,
                rot_lon_ll: sign * p.get::<f64>(4)?,
                delta_rot_lat: p.get(5)?,
                delta_rot_lon: p.get(6)?,
                true_lat_south_pole: p.get(7)?,
                true_lon_south_pole: sign * p.get::<f64>(8)?,
                aux_rotation: p.get(9)?,
            })
        }

        "mercator" => {
            p.count(&[7], "mercator")?;
            GridInfo::Mercator(MercatorData {
                name,
                nx: p.get(1)?,
                ny: p.get(2)?,
                lat_ll: p.get(3)?,
                lon_ll: sign * p.get::<f64>(4)?,
                lat_ur: p.get(5)?,
                lon_ur: sign * p.get::<f64>(6)?,
            })
        }

        "gaussian" => {
            p.count(&[4], "gaussian")?;
            GridInfo::Gaussian(GaussianData {
                name,
                lon_zero: sign * p.get::<f64>(1)?,
                nx: p.get(2)?,
                ny: p.get(3)?,
            })
        }

        "laea" => {
            p.count(&[10], "laea")?;
            let a_km: f64 = p.get(8)?;
            let b_km: f64 = p.get(9)?;
            GridInfo::Laea(LaeaData {
                name,
                nx: p.get(1)?,
                ny: p.get(2)?,
                lat_pin: p.get(3)?,
                lon_pin: sign * p.get::<f64>(4)?,
                x_pin: 0.,
                y_pin: 0.,
                standard_lat: p.get(5)?,
                central_lon: sign * p.get::<f64>(6)?,
                d_km: p.get(7)?,
                a_km,
                b_km: if b_km == 0. { a_km } else { b_km },
            })
        }

        _ => return Err(bad_spec("unknown grid family", spec)),
    };

    log::debug!("Parsed {} grid from '{spec}'", info.family());
    Ok(info)
}

/// A grid from its registry name, or else from a grid specification
pub fn parse_grid(text: &str) -> Result<Grid, Error> {
    let text = text.trim();
    if let Some(info) = find_grid_by_name(text) {
        return info.create_grid();
    }
    parse_grid_def(text)?.create_grid()
}

// ----- A N C I L L A R Y -------------------------------------------------------------

fn bad_spec(what: &str, spec: &str) -> Error {
    log::error!("{what}: '{spec}'");
    Error::BadGridSpec(format!("{what}: '{spec}'"))
}

struct Tokens<'a> {
    tokens: &'a [&'a str],
    spec: &'a str,
}

impl Tokens<'_> {
    fn count(&self, allowed: &[usize], family: &str) -> Result<(), Error> {
        if allowed.contains(&self.tokens.len()) {
            return Ok(());
        }
        let expected: Vec<String> = allowed.iter().map(|n| n.to_string()).collect();
        let what = format!(
            "{family} grid spec should have {} entries, not {}",
            expected.join(" or "),
            self.tokens.len()
        );
        Err(bad_spec(&what, self.spec))
    }

    fn get<T: FromStr>(&self, index: usize) -> Result<T, Error> {
        let token = self.tokens.get(index).copied().unwrap_or_default();
        token
            .parse::<T>()
            .map_err(|_| bad_spec(&format!("cannot parse '{token}'"), self.spec))
    }

    fn hemisphere(&self, index: usize) -> Result<char, Error> {
        match self.tokens.get(index).copied() {
            Some("N") => Ok('N'),
            Some("S") => Ok('S'),
            _ => Err(bad_spec("bad hemisphere", self.spec)),
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------
