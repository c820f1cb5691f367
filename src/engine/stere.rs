//! Stereographic, polar and oblique, following the PROJ implementation,
//! cf. https://proj.org/operations/projections/stere.html
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;
const CONV: f64 = 1e-10;
const MAX_ITER: usize = 8;

// ----- C O M M O N -------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    NorthPole,
    SouthPole,
    Equatorial,
    Oblique,
}

fn mode(op: &Projection) -> Mode {
    if op.params.boolean("north_polar") {
        return Mode::NorthPole;
    }
    if op.params.boolean("south_polar") {
        return Mode::SouthPole;
    }
    if op.params.boolean("equatorial") {
        return Mode::Equatorial;
    }
    Mode::Oblique
}

// The conformal latitude, 𝜒, from the geographic
fn conformal(phi: f64, e: f64) -> f64 {
    2. * (1. / ts(phi.sin_cos(), e)).atan() - FRAC_PI_2
}

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(op: &Projection, operands: &mut [Coor2D]) -> usize {
    let a = op.params.ellps().a_km();
    let e = op.params.ellps().eccentricity();
    let lon_0 = op.params.lon(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let Ok(akm1) = op.params.real("akm1") else { return 0 };
    let Ok(sin_x1) = op.params.real("sinX1") else { return 0 };
    let Ok(cos_x1) = op.params.real("cosX1") else { return 0 };
    let mode = mode(op);

    let mut successes = 0_usize;
    for coord in operands {
        let lam = coord[0] - lon_0;
        let mut phi = coord[1];
        let (sinlam, mut coslam) = lam.sin_cos();
        let mut x;
        let y;

        match mode {
            Mode::Oblique | Mode::Equatorial => {
                let (sin_x, cos_x) = conformal(phi, e).sin_cos();
                let denom = if mode == Mode::Oblique {
                    cos_x1 * (1. + sin_x1 * sin_x + cos_x1 * cos_x * coslam)
                } else {
                    1. + cos_x * coslam
                };
                // Antipode of the projection center
                if denom.abs() < EPS10 {
                    *coord = Coor2D::nan();
                    continue;
                }
                let big_a = akm1 / denom;
                y = if mode == Mode::Oblique {
                    big_a * (cos_x1 * sin_x - sin_x1 * cos_x * coslam)
                } else {
                    big_a * sin_x
                };
                x = big_a * cos_x;
            }
            Mode::NorthPole | Mode::SouthPole => {
                if mode == Mode::SouthPole {
                    phi = -phi;
                    coslam = -coslam;
                }
                // The opposite pole is at infinity
                if (phi + FRAC_PI_2).abs() < EPS10 {
                    *coord = Coor2D::nan();
                    continue;
                }
                x = if (phi - FRAC_PI_2).abs() < 1e-15 {
                    0.
                } else {
                    akm1 * ts(phi.sin_cos(), e)
                };
                y = -x * coslam;
            }
        }
        x *= sinlam;

        coord[0] = a * x + x_0;
        coord[1] = a * y + y_0;
        successes += 1;
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(op: &Projection, operands: &mut [Coor2D]) -> usize {
    let a = op.params.ellps().a_km();
    let e = op.params.ellps().eccentricity();
    let lon_0 = op.params.lon(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let Ok(akm1) = op.params.real("akm1") else { return 0 };
    let Ok(sin_x1) = op.params.real("sinX1") else { return 0 };
    let Ok(cos_x1) = op.params.real("cosX1") else { return 0 };
    let mode = mode(op);

    let mut successes = 0_usize;
    'points: for coord in operands {
        let mut x = (coord[0] - x_0) / a;
        let mut y = (coord[1] - y_0) / a;
        let rho = x.hypot(y);

        let tp;
        let mut phi_l;
        let halfpi;
        let halfe;

        match mode {
            Mode::Oblique | Mode::Equatorial => {
                let t = 2. * (rho * cos_x1).atan2(akm1);
                let (sinphi, cosphi) = t.sin_cos();
                phi_l = if rho == 0. {
                    (cosphi * sin_x1).asin()
                } else {
                    (cosphi * sin_x1 + y * sinphi * cos_x1 / rho).asin()
                };
                tp = (0.5 * (FRAC_PI_2 + phi_l)).tan();
                x *= sinphi;
                y = rho * cos_x1 * cosphi - y * sin_x1 * sinphi;
                halfpi = FRAC_PI_2;
                halfe = 0.5 * e;
            }
            Mode::NorthPole | Mode::SouthPole => {
                if mode == Mode::NorthPole {
                    y = -y;
                }
                tp = -rho / akm1;
                phi_l = FRAC_PI_2 - 2. * tp.atan();
                halfpi = -FRAC_PI_2;
                halfe = -0.5 * e;
            }
        }

        for _ in 0..MAX_ITER {
            let sinphi = e * phi_l.sin();
            let mut phi =
                2. * (tp * ((1. + sinphi) / (1. - sinphi)).powf(halfe)).atan() - halfpi;
            if (phi_l - phi).abs() < CONV {
                if mode == Mode::SouthPole {
                    phi = -phi;
                }
                let lam = if x == 0. && y == 0. { 0. } else { x.atan2(y) };
                coord[0] = lam + lon_0;
                coord[1] = phi;
                successes += 1;
                continue 'points;
            }
            phi_l = phi;
        }
        warn!("stere: no convergence in inverse projection");
        *coord = Coor2D::nan();
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 6] = [
    OpParameter::Real { key: "lat_0",  default: Some(0_f64) },
    OpParameter::Real { key: "lon_0",  default: Some(0_f64) },
    OpParameter::Real { key: "lat_ts", default: Some(f64::NAN) },

    OpParameter::Real { key: "k_0",    default: Some(1_f64) },
    OpParameter::Real { key: "x_0",    default: Some(0_f64) },
    OpParameter::Real { key: "y_0",    default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters) -> Result<Projection, Error> {
    let def = &parameters.definition;
    let mut params = ParsedParameters::new(parameters, &GAMUT)?;

    let phi0 = params.lat(0);
    let t = phi0.abs();
    if t > FRAC_PI_2 + EPS10 {
        warn!("stere: Bad central latitude!");
        return Err(Error::BadParam("lat_0".to_string(), def.clone()));
    }

    // Latitude of true scale defaults to the pole
    let lat_ts = params.real("lat_ts")?;
    let phits = if lat_ts.is_nan() {
        FRAC_PI_2
    } else {
        if lat_ts.abs() > 90. {
            warn!("stere: Bad latitude of true scale!");
            return Err(Error::BadParam("lat_ts".to_string(), def.clone()));
        }
        lat_ts.to_radians().abs()
    };

    let polar = (t - FRAC_PI_2).abs() < EPS10;
    let equatorial = !polar && t < EPS10;
    match (polar, equatorial, phi0 > 0.) {
        (true, _, true) => params.boolean.insert("north_polar"),
        (true, _, false) => params.boolean.insert("south_polar"),
        (_, true, _) => params.boolean.insert("equatorial"),
        _ => params.boolean.insert("oblique"),
    };

    let k_0 = params.k(0);
    let e = params.ellps().eccentricity();
    let mut sin_x1 = 0.;
    let mut cos_x1 = 1.;

    let akm1 = if polar {
        if (phits - FRAC_PI_2).abs() < EPS10 {
            2. * k_0 / ((1. + e).powf(1. + e) * (1. - e).powf(1. - e)).sqrt()
        } else {
            let sc = phits.sin_cos();
            sc.1 / ts(sc, e) / (1. - (e * sc.0).powi(2)).sqrt()
        }
    } else if equatorial {
        2. * k_0
    } else {
        let chi = conformal(phi0, e);
        (sin_x1, cos_x1) = chi.sin_cos();
        let sc = phi0.sin_cos();
        2. * k_0 * sc.1 / (1. - (e * sc.0).powi(2)).sqrt()
    };

    params.real.insert("akm1", akm1);
    params.real.insert("sinX1", sin_x1);
    params.real.insert("cosX1", cos_x1);

    Ok(Projection {
        definition: def.clone(),
        params,
        fwd: InnerOp(fwd),
        inv: InnerOp(inv),
    })
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn north_polar_sphere() -> Result<(), Error> {
        let r = 6371.2;
        let op = Projection::new("stere lat_0=90 lat_ts=60 lon_0=-105 R=6371.2")?;

        // Closed form for the spherical polar case:
        // ρ = R (1 + sin 𝜙ts) tan(π/4 - 𝜙/2)
        let lat = 40_f64.to_radians();
        let lon = -80_f64.to_radians();
        let (x, y) = op.fwd(lat, lon).ok_or(Error::General("fwd"))?;
        let rho = r * (1. + 60_f64.to_radians().sin()) * (FRAC_PI_4 - lat / 2.).tan();
        let theta = lon - (-105_f64).to_radians();
        assert_float_eq!(x, rho * theta.sin(), abs <= 1e-9);
        assert_float_eq!(y, -rho * theta.cos(), abs <= 1e-9);

        let (phi, lam) = op.inv(x, y).ok_or(Error::General("inv"))?;
        assert_float_eq!(phi, lat, abs <= 1e-12);
        assert_float_eq!(lam, lon, abs <= 1e-12);

        // The pole maps to the origin
        let (x, y) = op.fwd(FRAC_PI_2, 0.3).ok_or(Error::General("fwd"))?;
        assert_float_eq!(x.hypot(y), 0., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn south_polar_ellipsoid() -> Result<(), Error> {
        // Validation value from Snyder (1987), eqs. 21-33, 21-34 and 21-36:
        // ρ = a m_c t / t_c, x = ρ sin λ, y = ρ cos λ
        let op = Projection::new("stere lat_0=-90 lat_ts=-71 ellps=WGS84")?;
        let (x, y) = op
            .fwd((-75_f64).to_radians(), 150_f64.to_radians())
            .ok_or(Error::General("fwd"))?;
        assert_float_eq!(x, 819.391_619_203_6, abs <= 1e-6);
        assert_float_eq!(y, -1_419.227_915_756_8, abs <= 1e-6);

        let (phi, lam) = op.inv(x, y).ok_or(Error::General("inv"))?;
        assert_float_eq!(phi, (-75_f64).to_radians(), abs <= 1e-11);
        assert_float_eq!(lam, 150_f64.to_radians(), abs <= 1e-11);

        // The north pole is at infinity
        assert!(op.fwd(FRAC_PI_2, 0.).is_none());
        Ok(())
    }

    #[test]
    fn oblique_roundtrip() -> Result<(), Error> {
        for def in [
            "stere lat_0=52 lon_0=5 k_0=0.9999 ellps=bessel",
            "stere lat_0=0 lon_0=10 R=6371",
            "stere lat_0=-35 lon_0=-60 R=6371",
        ] {
            let op = Projection::new(def)?;
            for (lat, lon) in [(45_f64, 0_f64), (60., 15.), (-10., 20.), (52., 5.)] {
                let (lat, lon) = (lat.to_radians(), lon.to_radians());
                let (x, y) = op.fwd(lat, lon).ok_or(Error::General("fwd"))?;
                let (phi, lam) = op.inv(x, y).ok_or(Error::General("inv"))?;
                assert_float_eq!(phi, lat, abs <= 1e-10);
                assert_float_eq!(lam, lon, abs <= 1e-10);
            }
        }
        Ok(())
    }

    #[test]
    fn bad_parameters() {
        assert!(matches!(
            Projection::new("stere lat_0=95"),
            Err(Error::BadParam(key, _)) if key == "lat_0"
        ));
        assert!(matches!(
            Projection::new("stere lat_0=90 lat_ts=-100"),
            Err(Error::BadParam(key, _)) if key == "lat_ts"
        ));
    }
}
