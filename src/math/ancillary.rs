/// The Gudermannian function (often written as gd), is the work horse for computations involving
/// the isometric latitude (i.e. the vertical coordinate of the Mercator projection)
pub mod gudermannian {
    pub fn fwd(arg: f64) -> f64 {
        arg.sinh().atan()
    }

    pub fn inv(arg: f64) -> f64 {
        arg.tan().asinh()
    }
}

/// The function ts(𝜙) of [Snyder (1987)](crate::Bibliography::Sny87),
/// eq. (7-10), i.e. the exponential of the negated isometric latitude,
/// exp(-𝜓), evaluated in a numerically stable way.
///
/// Inputs:
///   (sin 𝜙, cos 𝜙): trigs of geographic latitude
///   e: eccentricity of the ellipsoid
///
/// On the sphere (e = 0), this reduces to tan(𝜋/4 - 𝜙/2), the radial
/// function of the polar stereographic and Lambert conformal projections.
pub fn ts(sincos: (f64, f64), e: f64) -> f64 {
    // exp(-asinh(tan 𝜙))
    //    = cos 𝜙 / (1 + sin 𝜙)  good for 𝜙 > 0
    //    = (1 - sin 𝜙) / cos 𝜙  good for 𝜙 < 0
    let factor = if sincos.0 > 0. {
        sincos.1 / (1. + sincos.0)
    } else {
        (1. - sincos.0) / sincos.1
    };
    (e * (e * sincos.0).atanh()).exp() * factor
}

/// Snyder (1987) eq. 14-15, PROJ's pj_msfn()
pub fn pj_msfn(sincos: (f64, f64), es: f64) -> f64 {
    sincos.1 / (1. - sincos.0 * sincos.0 * es).sqrt()
}

/// Inverse of [`ts`]: the geographic latitude for a given exp(-𝜓)
pub fn pj_phi2(ts0: f64, e: f64) -> f64 {
    sinhpsi_to_tanphi((1. / ts0 - ts0) / 2., e).atan()
}

/// Snyder (1987) eq. 3-12: the function q of the authalic latitude
pub fn qs(sinphi: f64, e: f64) -> f64 {
    let es = e * e;
    let one_es = 1.0 - es;

    if e < 1e-7 {
        return 2.0 * sinphi;
    }

    let con = e * sinphi;
    let div1 = 1.0 - con * con;
    let div2 = 1.0 + con;

    one_es * (sinphi / div1 - (0.5 / e) * ((1. - con) / div2).ln())
}

/// Inverse isometric latitude by Newton iteration, following
/// [Karney, 2011](crate::Bibliography::Kar11): from sinh 𝜓 to tan 𝜙.
pub fn sinhpsi_to_tanphi(taup: f64, e: f64) -> f64 {
    // min iterations = 1, max iterations = 2; mean = 1.954
    const MAX_ITER: usize = 5;

    let rooteps: f64 = f64::EPSILON.sqrt();
    let tol: f64 = rooteps / 10.;
    let tmax: f64 = 2. / rooteps;

    let e2m = 1. - e * e;
    let stol = tol * taup.abs().max(1.0);

    // The initial guess.  70 corresponds to chi = 89.18 deg
    let mut tau = if taup.abs() > 70. {
        taup * (e * e.atanh()).exp()
    } else {
        taup / e2m
    };

    // Handle +/-inf, nan, and e = 1
    if (tau.abs() >= tmax) || tau.is_nan() {
        return tau;
    }

    for _ in 0..MAX_ITER {
        let tau1 = (1. + tau * tau).sqrt();
        let sig = (e * (e * tau / tau1).atanh()).sinh();
        let taupa = (1. + sig * sig).sqrt() * tau - sig * tau1;
        let dtau =
            (taup - taupa) * (1. + e2m * (tau * tau)) / (e2m * tau1 * (1. + taupa * taupa).sqrt());
        tau += dtau;

        if (dtau.abs() < stol) || tau.is_nan() {
            return tau;
        }
    }
    f64::NAN
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn spherical_reductions() {
        for lat in [-80_f64, -30., 0., 25., 60., 89.] {
            let phi = lat.to_radians();
            // On the sphere, ts is the tangent of the half colatitude
            let expected = (FRAC_PI_4 - phi / 2.).tan();
            assert!((ts(phi.sin_cos(), 0.) - expected).abs() < 1e-14);
            // ...and q is twice the sine of the latitude
            assert!((qs(phi.sin(), 0.) - 2. * phi.sin()).abs() < 1e-15);
        }
    }

    #[test]
    fn ts_roundtrip() {
        let e = 0.081_819_190_842_622;
        for lat in [-75_f64, -12., 0.5, 33., 71.] {
            let phi = lat.to_radians();
            let t = ts(phi.sin_cos(), e);
            assert!((pj_phi2(t, e) - phi).abs() < 1e-13);
        }
    }

    #[test]
    fn gudermannian_roundtrip() {
        let psi = gudermannian::inv(0.7);
        assert!((gudermannian::fwd(psi) - 0.7).abs() < 1e-15);
    }
}
