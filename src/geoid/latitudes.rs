use super::GeoidParameters;
use crate::math::qs;
use std::f64::consts::FRAC_PI_2;

impl GeoidParameters {
    // --- Geographic & geocentric, in degrees, as used at the grid level ---

    /// Geographic latitude, 𝜙, to geocentric latitude, 𝜃. Degrees in, degrees out.
    /// tan 𝜃 = (1 - e²) tan 𝜙
    #[must_use]
    pub fn geographic_to_geocentric(&self, lat_deg: f64) -> f64 {
        let phi = lat_deg.to_radians();
        if (phi.abs() - FRAC_PI_2).abs() < 1e-15 {
            return lat_deg;
        }
        ((1.0 - self.eccentricity_squared()) * phi.tan())
            .atan()
            .to_degrees()
    }

    /// Geocentric latitude, 𝜃, to geographic latitude, 𝜙. Degrees in, degrees out.
    #[must_use]
    pub fn geocentric_to_geographic(&self, lat_deg: f64) -> f64 {
        let theta = lat_deg.to_radians();
        if (theta.abs() - FRAC_PI_2).abs() < 1e-15 {
            return lat_deg;
        }
        (theta.tan() / (1.0 - self.eccentricity_squared()))
            .atan()
            .to_degrees()
    }

    // --- Authalic latitude, in radians, for the equal area projections ---

    /// Snyder's *q* (eq. 3-12) for the geographic latitude `phi`
    #[must_use]
    pub fn q(&self, phi: f64) -> f64 {
        qs(phi.sin(), self.eccentricity())
    }

    /// *q* at the pole
    #[must_use]
    pub fn qp(&self) -> f64 {
        self.q(FRAC_PI_2)
    }

    /// Geographic latitude, 𝜙, to authalic latitude, 𝛽 (Snyder eq. 3-11)
    #[must_use]
    pub fn authalic_latitude(&self, phi: f64) -> f64 {
        (self.q(phi) / self.qp()).clamp(-1., 1.).asin()
    }

    /// Authalic latitude, 𝛽, to geographic latitude, 𝜙, by Newton
    /// iteration on Snyder eq. 3-16
    #[must_use]
    pub fn authalic_to_geographic(&self, beta: f64) -> f64 {
        let es = self.eccentricity_squared();
        if es < 1e-14 {
            return beta;
        }
        let e = es.sqrt();
        let q = self.qp() * beta.sin();
        let mut phi = (q / 2.0).clamp(-1., 1.).asin();
        for _ in 0..15 {
            let (s, c) = phi.sin_cos();
            if c.abs() < 1e-12 {
                return phi;
            }
            let one_es2 = 1.0 - es * s * s;
            let dphi = one_es2 * one_es2 / (2.0 * c)
                * (q / (1.0 - es) - s / one_es2
                    + (1.0 / (2.0 * e)) * ((1.0 - e * s) / (1.0 + e * s)).ln());
            phi += dphi;
            if dphi.abs() < 1e-14 {
                break;
            }
        }
        phi
    }
}

// ----- Tests ---------------------------------------------------------------------
