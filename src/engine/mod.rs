//! A small projection engine in the PROJ tradition: operator definitions
//! in `key=value` syntax, instantiated from a table of builtin operators.
//! Geographic coordinates are in radians, east positive. Projected
//! coordinates are in the units of the ellipsoid axes (i.e. km, when used
//! through the grid layer).
use crate::authoring::*;

mod coor2d;
mod parameter;
mod parsed_parameters;

pub use coor2d::Coor2D;
pub use parameter::OpParameter;
pub use parsed_parameters::ParsedParameters;

// ----- B U I L T I N   P R O J E C T I O N S -----------------------------------------

// Install new builtin projections by adding them in the `mod` and
// `BUILTIN_PROJECTIONS` blocks below

mod laea;
mod merc;
mod noop;
mod stere;

#[rustfmt::skip]
const BUILTIN_PROJECTIONS: [(&str, ProjConstructor); 7] = [
    ("laea",    ProjConstructor(laea::new)),
    ("merc",    ProjConstructor(merc::new)),
    ("stere",   ProjConstructor(stere::new)),

    // Some commonly used noop-aliases
    ("noop",    ProjConstructor(noop::new)),
    ("latlon",  ProjConstructor(noop::new)),
    ("longlat", ProjConstructor(noop::new)),
    ("lonlat",  ProjConstructor(noop::new)),
];

/// Handle instantiation of built-in projections, as defined in
/// `BUILTIN_PROJECTIONS` above.
pub(crate) fn builtin(name: &str) -> Result<ProjConstructor, Error> {
    for p in BUILTIN_PROJECTIONS {
        if p.0 == name {
            return Ok(p.1);
        }
    }
    Err(Error::NotFound(name.to_string(), String::default()))
}

// ----- S T R U C T   P R O J C O N S T R U C T O R -----------------------------------

/// Blueprint for the instantiation of a projection.
///
/// ProjConstructor needs to be a newtype, rather than a type alias,
/// since we must implement the Debug-trait for ProjConstructor (to
/// make auto derive of the Debug-trait work for any derived type).
#[derive(Clone, Copy)]
pub struct ProjConstructor(pub fn(args: &RawParameters) -> Result<Projection, Error>);

// Cannot autoderive the Debug trait
impl core::fmt::Debug for ProjConstructor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ProjConstructor")
    }
}

// ----- S T R U C T   I N N E R O P ---------------------------------------------------

/// Blueprint for the functions doing the actual transformation work.
/// Returns the number of successfully transformed coordinates. Failed
/// coordinates are set to NaN.
pub struct InnerOp(pub fn(op: &Projection, operands: &mut [Coor2D]) -> usize);

// Cannot autoderive the Debug trait
impl core::fmt::Debug for InnerOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "InnerOp")
    }
}

// ----- S T R U C T   R A W P A R A M E T E R S ---------------------------------------

/// The vehicle used to ferry a definition from [`Projection::new`] into the
/// constructor of the individual projections, which interpret it and convert
/// it into a more runtime friendly instance of [`ParsedParameters`].
#[derive(Debug, Default, Clone)]
pub struct RawParameters {
    pub definition: String,
}

impl RawParameters {
    pub fn new(definition: &str) -> RawParameters {
        let elements: Vec<_> = definition.split_whitespace().collect();
        RawParameters {
            definition: elements.join(" "),
        }
    }
}

// ----- S T R U C T   P R O J E C T I O N ---------------------------------------------

/// The defining parameters and functions for a projection
#[derive(Debug)]
pub struct Projection {
    pub definition: String,
    pub params: ParsedParameters,
    pub fwd: InnerOp,
    pub inv: InnerOp,
}

impl Projection {
    /// Instantiate a projection from its definition, e.g.
    /// `"stere lat_0=90 lat_ts=60 lon_0=-105 R=6371.2"`
    pub fn new(definition: &str) -> Result<Projection, Error> {
        let parameters = RawParameters::new(definition);
        let name = operator_name(&parameters.definition);
        if name.is_empty() {
            return Err(Error::Syntax(format!(
                "missing projection name in '{definition}'"
            )));
        }
        let Ok(constructor) = builtin(&name) else {
            error!("Unknown projection '{name}'");
            return Err(Error::NotFound(
                name,
                ": ".to_string() + &parameters.definition,
            ));
        };
        let op = constructor.0(&parameters)?;
        trace!("Instantiated projection '{}'", op.definition);
        Ok(op)
    }

    // Helper for the implementation of projections that need no other
    // parameters than the ones given in the definition
    pub fn plain(
        parameters: &RawParameters,
        fwd: InnerOp,
        inv: InnerOp,
        gamut: &[OpParameter],
    ) -> Result<Projection, Error> {
        let params = ParsedParameters::new(parameters, gamut)?;
        Ok(Projection {
            definition: parameters.definition.clone(),
            params,
            fwd,
            inv,
        })
    }

    /// Operate on a slice of coordinates, in the given direction
    pub fn apply(&self, operands: &mut [Coor2D], direction: Direction) -> usize {
        match direction {
            Direction::Fwd => self.fwd.0(self, operands),
            Direction::Inv => self.inv.0(self, operands),
        }
    }

    /// Project a single point: geographic (radians, east positive) to
    /// projected coordinates. `None` if the point is outside of the domain
    /// of the projection.
    pub fn fwd(&self, lat: f64, lon: f64) -> Option<(f64, f64)> {
        let mut operands = [Coor2D::raw(lon, lat)];
        if self.apply(&mut operands, Fwd) != 1 {
            return None;
        }
        Some((operands[0][0], operands[0][1]))
    }

    /// Inverse projection of a single point. Returns (latitude, longitude),
    /// in radians.
    pub fn inv(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let mut operands = [Coor2D::raw(x, y)];
        if self.apply(&mut operands, Inv) != 1 {
            return None;
        }
        Some((operands[0][1], operands[0][0]))
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    pub fn params(&self) -> &ParsedParameters {
        &self.params
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// The first bare word of a definition
pub fn operator_name(definition: &str) -> String {
    split_into_parameters(definition)
        .get("name")
        .cloned()
        .unwrap_or_default()
}

/// Split a definition into its `key=value` elements. The first key without
/// a value is the name of the operator. Other keys without values are flags,
/// and get the value "true".
pub fn split_into_parameters(step: &str) -> BTreeMap<String, String> {
    // Conflate contiguous whitespace, then remove whitespace around {"=", ","}
    let step = step.trim().to_string();
    let elements: Vec<_> = step.split_whitespace().collect();
    let step = elements
        .join(" ")
        .replace("= ", "=")
        .replace(", ", ",")
        .replace(" =", "=")
        .replace(" ,", ",");

    let mut params = BTreeMap::new();
    for element in step.split_whitespace() {
        // Split a key=value-pair into key and value parts
        let mut parts: Vec<&str> = element.trim().split('=').collect();
        // Add a boolean true part, to make sure we have a value, even for flags
        parts.push("true");

        // If the first arg is a key-without-value, it is the name of the operator
        if params.is_empty() && parts.len() == 2 {
            params.insert(String::from("name"), String::from(parts[0]));
            continue;
        }

        params.insert(String::from(parts[0]), String::from(parts[1]));
    }

    params
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split() {
        let p = split_into_parameters("stere  lat_0 = 90 lat_ts=60   lon_0=-105 R=6371.2 inv");
        assert_eq!(p["name"], "stere");
        assert_eq!(p["lat_0"], "90");
        assert_eq!(p["lat_ts"], "60");
        assert_eq!(p["lon_0"], "-105");
        assert_eq!(p["R"], "6371.2");
        assert_eq!(p["inv"], "true");
        assert_eq!(operator_name(" laea lat_0=45"), "laea");
    }

    #[test]
    fn unknown_projection() {
        let p = Projection::new("cucumber lat_0=45");
        assert!(matches!(p, Err(Error::NotFound(name, _)) if name == "cucumber"));
        assert!(matches!(Projection::new("  "), Err(Error::Syntax(_))));
    }

    #[test]
    fn identity() -> Result<(), Error> {
        let op = Projection::new("latlon")?;
        assert_eq!(op.name(), "latlon");
        assert_eq!(op.fwd(0.5, -1.5), Some((-1.5, 0.5)));
        assert_eq!(op.inv(-1.5, 0.5), Some((0.5, -1.5)));

        let mut operands = [Coor2D::geo(55., 12.), Coor2D::geo(-33., 151.)];
        assert_eq!(op.apply(&mut operands, Fwd), 2);
        assert_eq!(operands[0], Coor2D::geo(55., 12.));
        Ok(())
    }
}
