//! Lambert azimuthal equal area, following the PROJ implementation,
//! cf. https://proj.org/operations/projections/laea.html
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

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

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(op: &Projection, operands: &mut [Coor2D]) -> usize {
    let ellps = op.params.ellps();
    let a = ellps.a_km();
    let e = ellps.eccentricity();
    let lon_0 = op.params.lon(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let Ok(qp) = op.params.real("qp") else { return 0 };
    let Ok(sinb1) = op.params.real("sinb1") else { return 0 };
    let Ok(cosb1) = op.params.real("cosb1") else { return 0 };
    let Ok(xmf) = op.params.real("xmf") else { return 0 };
    let Ok(ymf) = op.params.real("ymf") else { return 0 };
    let mode = mode(op);

    let mut successes = 0_usize;
    for coord in operands {
        let lam = coord[0] - lon_0;
        let phi = coord[1];
        let (sinlam, coslam) = lam.sin_cos();
        let mut q = qs(phi.sin(), e);

        let (x, y) = match mode {
            Mode::Oblique | Mode::Equatorial => {
                let sinb = q / qp;
                let cosb2 = 1. - sinb * sinb;
                let cosb = if cosb2 > 0. { cosb2.sqrt() } else { 0. };
                let b = if mode == Mode::Oblique {
                    1. + sinb1 * sinb + cosb1 * cosb * coslam
                } else {
                    1. + cosb * coslam
                };
                // Antipode of the projection center
                if b.abs() < EPS10 {
                    *coord = Coor2D::nan();
                    continue;
                }
                let b = (2. / b).sqrt();
                let y = if mode == Mode::Oblique {
                    ymf * b * (cosb1 * sinb - sinb1 * cosb * coslam)
                } else {
                    ymf * b * sinb
                };
                (xmf * b * cosb * sinlam, y)
            }
            Mode::NorthPole | Mode::SouthPole => {
                let (b, sign) = if mode == Mode::NorthPole {
                    q = qp - q;
                    (FRAC_PI_2 + phi, -1.)
                } else {
                    q += qp;
                    (phi - FRAC_PI_2, 1.)
                };
                // The opposite pole
                if b.abs() < EPS10 {
                    *coord = Coor2D::nan();
                    continue;
                }
                if q >= 1e-15 {
                    let b = q.sqrt();
                    (b * sinlam, sign * b * coslam)
                } else {
                    (0., 0.)
                }
            }
        };

        coord[0] = a * x + x_0;
        coord[1] = a * y + y_0;
        successes += 1;
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(op: &Projection, operands: &mut [Coor2D]) -> usize {
    let ellps = op.params.ellps();
    let a = ellps.a_km();
    let lon_0 = op.params.lon(0);
    let lat_0 = op.params.lat(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let Ok(qp) = op.params.real("qp") else { return 0 };
    let Ok(rq) = op.params.real("rq") else { return 0 };
    let Ok(dd) = op.params.real("dd") else { return 0 };
    let Ok(sinb1) = op.params.real("sinb1") else { return 0 };
    let Ok(cosb1) = op.params.real("cosb1") else { return 0 };
    let mode = mode(op);

    let mut successes = 0_usize;
    for coord in operands {
        let mut x = (coord[0] - x_0) / a;
        let mut y = (coord[1] - y_0) / a;

        let ab = match mode {
            Mode::Oblique | Mode::Equatorial => {
                x /= dd;
                y *= dd;
                let rho = x.hypot(y);
                if rho < EPS10 {
                    coord[0] = lon_0;
                    coord[1] = lat_0;
                    successes += 1;
                    continue;
                }
                let asin_argument = 0.5 * rho / rq;
                if asin_argument > 1. {
                    *coord = Coor2D::nan();
                    continue;
                }
                let (s_ce, c_ce) = (2. * asin_argument.asin()).sin_cos();
                x *= s_ce;
                if mode == Mode::Oblique {
                    let ab = c_ce * sinb1 + y * s_ce * cosb1 / rho;
                    y = rho * cosb1 * c_ce - y * sinb1 * s_ce;
                    ab
                } else {
                    let ab = y * s_ce / rho;
                    y = rho * c_ce;
                    ab
                }
            }
            Mode::NorthPole | Mode::SouthPole => {
                if mode == Mode::NorthPole {
                    y = -y;
                }
                let q = x * x + y * y;
                if q == 0. {
                    coord[0] = lon_0;
                    coord[1] = lat_0;
                    successes += 1;
                    continue;
                }
                let ab = 1. - q / qp;
                if mode == Mode::SouthPole {
                    -ab
                } else {
                    ab
                }
            }
        };

        let beta = ab.clamp(-1., 1.).asin();
        coord[0] = x.atan2(y) + lon_0;
        coord[1] = ellps.authalic_to_geographic(beta);
        successes += 1;
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 4] = [
    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },

    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters) -> Result<Projection, Error> {
    let def = &parameters.definition;
    let mut params = ParsedParameters::new(parameters, &GAMUT)?;

    let lat_0 = params.lat(0);
    let t = lat_0.abs();
    if lat_0.is_nan() || t > FRAC_PI_2 + EPS10 {
        warn!("laea: Bad central latitude!");
        return Err(Error::BadParam("lat_0".to_string(), def.clone()));
    }

    let polar = (t - FRAC_PI_2).abs() < EPS10;
    let equatorial = !polar && t < EPS10;
    match (polar, equatorial, lat_0 > 0.) {
        (true, _, true) => params.boolean.insert("north_polar"),
        (true, _, false) => params.boolean.insert("south_polar"),
        (_, true, _) => params.boolean.insert("equatorial"),
        _ => params.boolean.insert("oblique"),
    };

    let ellps = params.ellps();
    let es = ellps.eccentricity_squared();
    let qp = ellps.qp();
    let rq = (0.5 * qp).sqrt();

    let (mut dd, mut xmf, mut ymf) = (1., 1., 1.);
    let (mut sinb1, mut cosb1) = (0., 1.);
    if equatorial {
        dd = 1. / rq;
        ymf = 0.5 * qp;
    } else if !polar {
        let sinphi = lat_0.sin();
        sinb1 = ellps.q(lat_0) / qp;
        cosb1 = (1. - sinb1 * sinb1).sqrt();
        dd = lat_0.cos() / ((1. - es * sinphi * sinphi).sqrt() * rq * cosb1);
        xmf = rq * dd;
        ymf = rq / dd;
    }

    params.real.insert("qp", qp);
    params.real.insert("rq", rq);
    params.real.insert("dd", dd);
    params.real.insert("xmf", xmf);
    params.real.insert("ymf", ymf);
    params.real.insert("sinb1", sinb1);
    params.real.insert("cosb1", cosb1);

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

    #[test]
    fn polar_sphere() -> Result<(), Error> {
        let op = Projection::new("laea lat_0=90 lon_0=0 R=6371.2")?;

        // Spherical closed form: ρ = 2R sin(π/4 - 𝜙/2)
        let lat = 60_f64.to_radians();
        let lon = 30_f64.to_radians();
        let (x, y) = op.fwd(lat, lon).ok_or(Error::General("fwd"))?;
        let rho = 2. * 6371.2 * (std::f64::consts::FRAC_PI_4 - lat / 2.).sin();
        assert_float_eq!(x, rho * lon.sin(), abs <= 1e-9);
        assert_float_eq!(y, -rho * lon.cos(), abs <= 1e-9);

        let (phi, lam) = op.inv(x, y).ok_or(Error::General("inv"))?;
        assert_float_eq!(phi, lat, abs <= 1e-12);
        assert_float_eq!(lam, lon, abs <= 1e-12);
        Ok(())
    }

    #[test]
    fn oblique_ellipsoid() -> Result<(), Error> {
        // ETRS89-LAEA style definition, in km
        let op = Projection::new("laea lat_0=52 lon_0=10 x_0=4321 y_0=3210 ellps=GRS80")?;

        // The center of projection maps to the false origin
        let (x, y) = op
            .fwd(52_f64.to_radians(), 10_f64.to_radians())
            .ok_or(Error::General("fwd"))?;
        assert_float_eq!(x, 4321., abs <= 1e-9);
        assert_float_eq!(y, 3210., abs <= 1e-9);

        for (lat, lon) in [(55_f64, 12_f64), (40., -5.), (65., 30.), (35., 25.)] {
            let (lat, lon) = (lat.to_radians(), lon.to_radians());
            let (x, y) = op.fwd(lat, lon).ok_or(Error::General("fwd"))?;
            let (phi, lam) = op.inv(x, y).ok_or(Error::General("inv"))?;
            assert_float_eq!(phi, lat, abs <= 1e-11);
            assert_float_eq!(lam, lon, abs <= 1e-11);
        }
        Ok(())
    }

    #[test]
    fn equatorial_and_south_polar() -> Result<(), Error> {
        for def in [
            "laea lat_0=0 lon_0=-20 ellps=WGS84",
            "laea lat_0=-90 lon_0=45 ellps=WGS84",
            "laea lat_0=-90 lon_0=45 R=6371",
        ] {
            let op = Projection::new(def)?;
            for (lat, lon) in [(-60_f64, 10_f64), (-20., 80.), (-75., -100.)] {
                let (lat, lon) = (lat.to_radians(), lon.to_radians());
                let (x, y) = op.fwd(lat, lon).ok_or(Error::General("fwd"))?;
                let (phi, lam) = op.inv(x, y).ok_or(Error::General("inv"))?;
                assert_float_eq!(phi, lat, abs <= 1e-11);
                assert_float_eq!(lam, lon, abs <= 1e-11);
            }
        }
        Ok(())
    }

    #[test]
    fn equal_area() -> Result<(), Error> {
        // A small 0.1° × 0.1° cell keeps its area through the projection
        let op = Projection::new("laea lat_0=45 lon_0=0 R=6371")?;
        let (lat, lon, d) = (50_f64.to_radians(), 8_f64.to_radians(), 0.1_f64.to_radians());
        let corner = |la: f64, lo: f64| op.fwd(la, lo).ok_or(Error::General("fwd"));
        let p0 = corner(lat, lon)?;
        let p1 = corner(lat, lon + d)?;
        let p2 = corner(lat + d, lon + d)?;
        let p3 = corner(lat + d, lon)?;
        let shoelace = 0.5
            * ((p0.0 * p1.1 - p1.0 * p0.1)
                + (p1.0 * p2.1 - p2.0 * p1.1)
                + (p2.0 * p3.1 - p3.0 * p2.1)
                + (p3.0 * p0.1 - p0.0 * p3.1));
        let zone = 6371_f64.powi(2) * d * ((lat + d).sin() - lat.sin());
        assert_float_eq!(shoelace, zone, r2nd <= 1e-4);
        Ok(())
    }
}
