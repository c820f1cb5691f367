/// The `OpParameter` enumeration is used to represent which defining parameters
/// are valid for a given projection.
///
/// The individual projection implementations use these to define the
/// parameters accepted, and whether they are *required* (in which case the
/// provided default value is set to `None`), or *optional* (in which case,
/// a default value is provided).
///
/// Any other parameters given are ignored, but noted in the log.
///
/// For a given projection, the set of its required and optional parameters
/// is called the *gamut* of the projection. The earth model keys (`R`, `a`,
/// `b`, `rf`, `ellps`) are common to all projections, and are not part of
/// any gamut.
#[derive(Debug)]
pub enum OpParameter {
    /// Reals (𝐑 in math terms). Angles are given in degrees.
    Real {
        key: &'static str,
        default: Option<f64>,
    },
}

impl OpParameter {
    pub fn key(&self) -> &'static str {
        match self {
            OpParameter::Real { key, .. } => key,
        }
    }
}
