//! Mercator
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(op: &Projection, operands: &mut [Coor2D]) -> usize {
    let ellps = op.params.ellps();
    let a = ellps.a_km();
    let e = ellps.eccentricity();
    let k_0 = op.params.k(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let lon_0 = op.params.lon(0);

    let mut successes = 0_usize;
    for coord in operands {
        let (lon, lat) = (coord[0], coord[1]);

        // The poles are at infinity
        if (lat.abs() - FRAC_PI_2).abs() < 1e-10 {
            *coord = Coor2D::nan();
            continue;
        }

        // The isometric latitude, 𝜓 = -ln ts(𝜙)
        let isometric = -ts(lat.sin_cos(), e).ln();
        coord[0] = a * k_0 * (lon - lon_0) + x_0;
        coord[1] = a * k_0 * isometric + y_0;
        successes += 1;
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(op: &Projection, operands: &mut [Coor2D]) -> usize {
    let ellps = op.params.ellps();
    let a = ellps.a_km();
    let e = ellps.eccentricity();
    let k_0 = op.params.k(0);
    let x_0 = op.params.x(0);
    let y_0 = op.params.y(0);
    let lon_0 = op.params.lon(0);

    let mut successes = 0_usize;
    for coord in operands {
        let lon = (coord[0] - x_0) / (a * k_0) + lon_0;
        let psi = (coord[1] - y_0) / (a * k_0);
        let lat = sinhpsi_to_tanphi(psi.sinh(), e).atan();
        if lat.is_nan() {
            *coord = Coor2D::nan();
            continue;
        }
        coord[0] = lon;
        coord[1] = lat;
        successes += 1;
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 5] = [
    OpParameter::Real { key: "lon_0",  default: Some(0_f64) },
    OpParameter::Real { key: "x_0",    default: Some(0_f64) },
    OpParameter::Real { key: "y_0",    default: Some(0_f64) },

    OpParameter::Real { key: "k_0",    default: Some(1_f64) },
    OpParameter::Real { key: "lat_ts", default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters) -> Result<Projection, Error> {
    let def = &parameters.definition;
    let mut params = ParsedParameters::new(parameters, &GAMUT)?;

    let lat_ts = params.real("lat_ts")?;
    if lat_ts.abs() >= 90. {
        return Err(Error::General(
            "Merc: Invalid value for lat_ts: |lat_ts| should be < 90°",
        ));
    }

    // lat_ts trumps k_0
    if lat_ts != 0.0 {
        let sc = lat_ts.to_radians().sin_cos();
        params.k[0] = pj_msfn(sc, params.ellps().eccentricity_squared());
    }

    Ok(Projection {
        definition: def.clone(),
        params,
        fwd: InnerOp(fwd),
        inv: InnerOp(inv),
    })
}

// ----- T E S T S ---------------------------------------------------------------------
