use crate::Error;

/// Convergence criterion for [`romberg`]: twice the change between
/// successive extrapolation levels
pub const ROMBERG_TOL: f64 = 1.0e-6;

/// Number of interval doublings after which [`romberg`] gives up
pub const ROMBERG_MAX_LEVEL: usize = 14;

/// Romberg integration of `f` over `[a, b]`: the trapezoidal rule,
/// starting at 2 intervals and doubling, combined with Richardson
/// extrapolation in a triangular table. See
/// [Press et al. (1992)](crate::Bibliography::Pre92).
///
/// Returns [`Error::NoConvergence`] if the estimate has not settled
/// within [`ROMBERG_MAX_LEVEL`] refinements. The bound is part of the
/// numerical behaviour: area computations built on top of this must be
/// reproducible, not merely accurate.
pub fn romberg<F>(f: F, a: f64, b: f64) -> Result<f64, Error>
where
    F: Fn(f64) -> f64,
{
    let mut t = [0_f64; ROMBERG_MAX_LEVEL + 2];

    let mut n = 2_usize;
    let mut h = (b - a) / n as f64;
    let mut trap = (h / 2.0) * (f(a) + f(b)) + h * f(a + h);
    t[0] = trap;

    let mut i = 0_usize;
    loop {
        i += 1;
        n *= 2;
        h = (b - a) / n as f64;

        let sum: f64 = (1..n).step_by(2).map(|j| f(a + j as f64 * h)).sum();
        trap = 0.5 * trap + h * sum;

        // Richardson extrapolation, overwriting the previous row in place
        let mut left = trap;
        let mut test = 0.0;
        for k in 1..=i {
            let denom = 4_f64.powi(k as i32) - 1.0;
            let right = left + (left - t[k - 1]) / denom;
            test = 2.0 * (left - t[k - 1]);
            t[k - 1] = left;
            left = right;
        }
        t[i] = left;

        if test.abs() < ROMBERG_TOL {
            break;
        }
        if i >= ROMBERG_MAX_LEVEL {
            log::error!("romberg: no convergence after {i} levels (last change: {test:e})");
            return Err(Error::NoConvergence("romberg", i));
        }
    }

    Ok(t[i])
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomials_are_exact() -> Result<(), Error> {
        // Simpson-level extrapolation is exact for cubics already
        let cubic = romberg(|x| 4.0 * x * x * x - 3.0 * x * x + 1.0, 0.0, 2.0)?;
        assert!((cubic - 14.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn transcendental() -> Result<(), Error> {
        let s = romberg(f64::sin, 0.0, std::f64::consts::PI)?;
        assert!((s - 2.0).abs() < 1e-8);

        let e = romberg(f64::exp, 0.0, 1.0)?;
        assert!((e - (std::f64::consts::E - 1.0)).abs() < 1e-8);
        Ok(())
    }

    #[test]
    fn convergence_at_the_last_level() -> Result<(), Error> {
        // 50 sin(5500 x) on [0, 1] settles at exactly level 14: the change
        // is 3.3e-5 at level 13 and 9.5e-8 at level 14
        let w = 5500.0;
        let s = romberg(|x| 50.0 * (w * x).sin(), 0.0, 1.0)?;
        let exact = 50.0 * (1.0 - w.cos()) / w;
        assert!((s - exact).abs() < 1e-8);
        Ok(())
    }

    #[test]
    fn non_convergence_is_an_error() {
        // Every level samples a different phase of a wildly oscillating
        // integrand, so the table never settles
        let nasty = |x: f64| 50.0 * (1_500_000.5 * x).sin();
        let result = romberg(nasty, 0.0, 1.0);
        assert!(matches!(
            result,
            Err(Error::NoConvergence(_, ROMBERG_MAX_LEVEL))
        ));
    }
}
