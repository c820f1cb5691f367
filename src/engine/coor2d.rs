use std::ops::{Index, IndexMut};

/// Generic 2D Coordinate tuple, with no fixed interpretation of the elements.
/// For geographic coordinates, the order is (longitude, latitude).
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor2D(pub [f64; 2]);

impl Index<usize> for Coor2D {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coor2D {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl Coor2D {
    /// A `Coor2D` from latitude/longitude, with the angular input in degrees
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64) -> Coor2D {
        Coor2D([longitude.to_radians(), latitude.to_radians()])
    }

    /// A `Coor2D` from its elements, taken at face value
    #[must_use]
    pub fn raw(first: f64, second: f64) -> Coor2D {
        Coor2D([first, second])
    }

    /// A `Coor2D` consisting of 2 `NaN`s
    #[must_use]
    pub fn nan() -> Coor2D {
        Coor2D([f64::NAN, f64::NAN])
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.0[0].is_nan() || self.0[1].is_nan()
    }

    /// Euclidean distance between two points in the plane
    #[must_use]
    pub fn hypot2(&self, other: &Coor2D) -> f64 {
        (self[0] - other[0]).hypot(self[1] - other[1])
    }
}
