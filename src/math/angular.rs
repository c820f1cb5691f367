use std::f64::consts::PI;

/// Range reduction of an angle in radians, as used by the grid projections:
/// `angle - 2π·floor(angle/2π + 0.5)`, i.e. into [-π, π).
pub fn reduce_rad(angle: f64) -> f64 {
    let n = (angle / (2.0 * PI) + 0.5).floor();
    angle - 2.0 * PI * n
}

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    let angle = (angle + PI) % (2.0 * PI);
    angle - PI * angle.signum()
}

/// normalize arbitrary angles to [0, 2π):
pub fn normalize_positive(angle: f64) -> f64 {
    let angle = angle % (2.0 * PI);
    if angle < 0. {
        return angle + 2.0 * PI;
    }
    angle
}

/// Longitude in degrees, reduced to (-180, 180]
pub fn rescale_lon(lon: f64) -> f64 {
    let l = lon - 360.0 * ((lon + 180.0) / 360.0).floor();
    if l <= -180.0 {
        return l + 360.0;
    }
    l
}

/// Longitude in degrees, reduced to [0, 360)
pub fn rescale_lon_360(lon: f64) -> f64 {
    let l = lon - 360.0 * (lon / 360.0).floor();
    // Guard against -tiny % 360 rounding up to exactly 360
    if l >= 360.0 {
        return 0.0;
    }
    l
}

// Trigonometry in degrees. Terse by intent: these show up in formulas
// lifted directly from the map projection literature.

pub fn sind(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cosd(deg: f64) -> f64 {
    deg.to_radians().cos()
}

pub fn tand(deg: f64) -> f64 {
    deg.to_radians().tan()
}

pub fn atand(x: f64) -> f64 {
    x.atan().to_degrees()
}

pub fn asind(x: f64) -> f64 {
    x.asin().to_degrees()
}

pub fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

// ----- Tests ---------------------------------------------------------------------
