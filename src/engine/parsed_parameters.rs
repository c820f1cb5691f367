#![allow(clippy::needless_range_loop)]
use crate::authoring::*;

/// Keys describing the size and shape of the earth. These are handled by
/// [`ParsedParameters`] for all projections, so they need not (and should
/// not) appear in the gamut of the individual projections.
const ELLIPSOID_KEYS: [&str; 5] = ["ellps", "R", "a", "b", "rf"];

#[derive(Debug)]
pub struct ParsedParameters {
    pub name: String,

    // Commonly used options have hard-coded slots
    pub ellps: GeoidParameters,
    pub lat: [f64; 4],
    pub lon: [f64; 4],
    pub x: [f64; 4],
    pub y: [f64; 4],
    pub k: [f64; 4],

    // Projection specific values, given or derived at construction.
    // `boolean` holds the mode flags set by the constructors
    pub boolean: BTreeSet<&'static str>,
    pub real: BTreeMap<&'static str, f64>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ellps(&self) -> &GeoidParameters {
        &self.ellps
    }
    pub fn x(&self, index: usize) -> f64 {
        self.x[index]
    }
    pub fn y(&self, index: usize) -> f64 {
        self.y[index]
    }
    pub fn lat(&self, index: usize) -> f64 {
        self.lat[index]
    }
    pub fn lon(&self, index: usize) -> f64 {
        self.lon[index]
    }
    pub fn k(&self, index: usize) -> f64 {
        self.k[index]
    }
}

impl ParsedParameters {
    pub fn new(
        parameters: &RawParameters,
        gamut: &[OpParameter],
    ) -> Result<ParsedParameters, Error> {
        let locals = super::split_into_parameters(&parameters.definition);
        let mut real = BTreeMap::<&'static str, f64>::new();

        // Try to locate all accepted parameters, type check, and place them
        // into their proper bins
        for p in gamut {
            match *p {
                OpParameter::Real { key, default } => {
                    if let Some(value) = locals.get(key) {
                        if let Ok(v) = value.parse::<f64>() {
                            real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value.clone()));
                    }

                    // Key not found - default given?
                    if let Some(value) = default {
                        real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        // Now handle the commonly used options with the hard-coded slots

        let ellps = ellipsoid(&locals)?;
        let mut lat = [0.; 4];
        let mut lon = [0.; 4];
        let mut x = [0.; 4];
        let mut y = [0.; 4];
        let mut k = [0.; 4];

        // Angular slots are converted to radians. Missing ones stay at 0,
        // unless the gamut provides a (possibly NaN) default.
        for i in 0..4 {
            lat[i] = real
                .get(format!("lat_{i}").as_str())
                .map_or(0., |v| v.to_radians());
            lon[i] = real
                .get(format!("lon_{i}").as_str())
                .map_or(0., |v| v.to_radians());
            x[i] = *real.get(format!("x_{i}").as_str()).unwrap_or(&0.);
            y[i] = *real.get(format!("y_{i}").as_str()).unwrap_or(&0.);
            k[i] = *real.get(format!("k_{i}").as_str()).unwrap_or(&0.);
        }

        let name = locals
            .get("name")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        // Params specified, but not used
        let ignored = locals.keys().filter(|key| {
            key.as_str() != "name"
                && !ELLIPSOID_KEYS.contains(&key.as_str())
                && !gamut.iter().any(|p| p.key() == key.as_str())
        });
        for key in ignored {
            trace!("{name}: ignoring unknown parameter '{key}'");
        }

        Ok(ParsedParameters {
            name,
            ellps,
            lat,
            lon,
            x,
            y,
            k,
            boolean: BTreeSet::new(),
            real,
        })
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

fn real_value(locals: &BTreeMap<String, String>, key: &str) -> Result<Option<f64>, Error> {
    let Some(value) = locals.get(key) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(v) => Ok(Some(v)),
        Err(_) => {
            warn!("Cannot parse {key}:{value} as a real number");
            Err(Error::BadParam(key.to_string(), value.clone()))
        }
    }
}

/// The earth model given by a definition: `R=` (sphere), `a=` with
/// either `b=` or `rf=`, or a named `ellps=`. GRS80 if nothing is given.
fn ellipsoid(locals: &BTreeMap<String, String>) -> Result<GeoidParameters, Error> {
    if let Some(r) = real_value(locals, "R")? {
        if r <= 0.0 {
            return Err(Error::BadParam("R".to_string(), r.to_string()));
        }
        return Ok(GeoidParameters::sphere(r));
    }

    if let Some(a) = real_value(locals, "a")? {
        if a <= 0.0 {
            return Err(Error::BadParam("a".to_string(), a.to_string()));
        }
        if let Some(b) = real_value(locals, "b")? {
            if b <= 0.0 || b > a {
                return Err(Error::BadParam("b".to_string(), b.to_string()));
            }
            return Ok(GeoidParameters::new(a, b));
        }
        if let Some(rf) = real_value(locals, "rf")? {
            let f = if rf == 0.0 { 0.0 } else { 1.0 / rf };
            return Ok(GeoidParameters::from_flattening(a, f));
        }
        return Ok(GeoidParameters::sphere(a));
    }

    match locals.get("ellps") {
        Some(name) => GeoidParameters::named(name),
        None => Ok(GeoidParameters::default()),
    }
}

// ----- T E S T S ------------------------------------------------------------------
