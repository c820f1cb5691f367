//! Affine maps between a projection's natural plane and grid pixel space
use crate::Error;

/// A 2×2 linear map plus translation:
///
/// ```text
/// x = m11·u + m12·v + tx
/// y = m21·u + m22·v + ty
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    m11: f64,
    m12: f64,
    m21: f64,
    m22: f64,
    tx: f64,
    ty: f64,
}

/// The identity map
impl Default for AffineTransform {
    fn default() -> AffineTransform {
        AffineTransform {
            m11: 1.,
            m12: 0.,
            m21: 0.,
            m22: 1.,
            tx: 0.,
            ty: 0.,
        }
    }
}

impl AffineTransform {
    /// A general affine map. Singular matrices are rejected, since the map
    /// must be invertible.
    pub fn new(
        m11: f64,
        m12: f64,
        m21: f64,
        m22: f64,
        tx: f64,
        ty: f64,
    ) -> Result<AffineTransform, Error> {
        let t = AffineTransform {
            m11,
            m12,
            m21,
            m22,
            tx,
            ty,
        };
        let det = t.det();
        if det.abs() < 1e-12 || !det.is_finite() {
            log::error!("Singular affine transform: {t:?}");
            return Err(Error::General("affine: singular matrix"));
        }
        Ok(t)
    }

    /// Pure scaling, no translation
    pub fn from_scale(sx: f64, sy: f64) -> Result<AffineTransform, Error> {
        AffineTransform::new(sx, 0., 0., sy, 0., 0.)
    }

    /// Choose the translation such that (u, v) maps to (x, y)
    pub fn set_pin(&mut self, x: f64, y: f64, u: f64, v: f64) {
        self.tx = 0.;
        self.ty = 0.;
        let (x0, y0) = self.forward(u, v);
        self.tx = x - x0;
        self.ty = y - y0;
    }

    #[must_use]
    pub fn det(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    #[must_use]
    pub fn forward(&self, u: f64, v: f64) -> (f64, f64) {
        (
            self.m11 * u + self.m12 * v + self.tx,
            self.m21 * u + self.m22 * v + self.ty,
        )
    }

    #[must_use]
    pub fn reverse(&self, x: f64, y: f64) -> (f64, f64) {
        let det = self.det();
        let (x, y) = (x - self.tx, y - self.ty);
        (
            (self.m22 * x - self.m12 * y) / det,
            (self.m11 * y - self.m21 * x) / det,
        )
    }

    #[must_use]
    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_and_roundtrip() -> Result<(), Error> {
        let mut aff = AffineTransform::from_scale(0.1, 0.1)?;
        aff.set_pin(32., 32., -150., 250.);
        let (x, y) = aff.forward(-150., 250.);
        assert!((x - 32.).abs() < 1e-12 && (y - 32.).abs() < 1e-12);
        assert!((aff.forward(-140., 250.).0 - 33.).abs() < 1e-12);

        let aff = AffineTransform::new(2., 1., -1., 3., 5., -7.)?;
        assert_eq!(aff.det(), 7.);
        let (x, y) = aff.forward(1.5, -2.5);
        let (u, v) = aff.reverse(x, y);
        assert!((u - 1.5).abs() < 1e-12);
        assert!((v + 2.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn singular() {
        assert!(AffineTransform::new(1., 2., 2., 4., 0., 0.).is_err());
        assert!(AffineTransform::from_scale(0., 1.).is_err());
        assert_eq!(AffineTransform::default().forward(3., 4.), (3., 4.));
    }
}
