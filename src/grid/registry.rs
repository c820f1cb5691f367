//! Named grids: the standard NCEP grids, and a few others in common use
use super::*;
use crate::geoid::{NCEP_EARTH_RADIUS_KM, WRF_EARTH_RADIUS_KM};
use once_cell::sync::Lazy;

// ----- L A M B E R T -----------------------------------------------------------------

// name, scale_lat_1, scale_lat_2, lat_pin, lon_pin, lon_orient, d_km, nx, ny.
// Pinned at pixel (0, 0).
type LambertEntry = (&'static str, f64, f64, f64, f64, f64, f64, usize, usize);

// WRF and RUC domains, on the WRF sphere
#[rustfmt::skip]
const DTC_LAMBERT: &[LambertEntry] = &[
    ("wrf8",      35., 35., 22.98,    110.84,   98.,  8.,     336, 372),
    ("wrf10",     30., 60., 31.29359, 109.2074, 98.,  10.,    180, 150),
    ("wrf22",     30., 60., 19.86599, 124.1012, 98.,  22.,    259, 163),
    ("ruc40",     25., 25., 16.281,   126.138,  95.,  40.635, 151, 113),
    ("ruc20",     25., 25., 16.281,   126.138,  95.,  20.3175, 301, 225),
    ("ruc13",     25., 25., 16.281,   126.138,  95.,  13.545, 451, 337),
    ("afwa2",     60., 30., 20.583,   122.247,  96.,  15.,    342, 210),
    ("bamex_wrf", 45., 30., 30.4623,  105.444,  95.,  4.,     500, 500),
    ("DTC164",    30., 48., 20.47,    122.042,  98.8, 13.3,   376, 280),
    ("DTC165",    30., 48., 20.653,   121.907,  98.8, 13.3,   168, 280),
    ("DTC166",    30., 48., 23.114,   100.997,  98.8, 13.3,   208, 280),
];

#[rustfmt::skip]
const NCEP_LAMBERT: &[LambertEntry] = &[
    ("G130", 25., 25., 16.281,  126.138,  95.,  13.545087, 451,  337),
    ("G145", 36., 46., 32.174,  90.159,   79.5, 12.,       169,  145),
    ("G146", 36., 46., 32.353,  89.994,   79.5, 12.,       166,  142),
    ("G163", 38., 38., 20.6,    118.3,    95.,  5.,        1008, 722),
    ("G206", 25., 25., 22.289,  117.991,  95.,  81.271,    51,   41),
    ("G209", 45., 45., -4.85,   151.1,    111., 44.,       275,  223),
    ("G211", 25., 25., 12.19,   133.459,  95.,  81.271,    93,   65),
    ("G212", 25., 25., 12.19,   133.459,  95.,  40.635,    185,  129),
    ("G215", 25., 25., 12.19,   133.459,  95.,  20.318,    369,  257),
    ("G218", 25., 25., 12.19,   133.459,  95.,  12.191,    614,  428),
    ("G221", 50., 50., 1.0,     145.5,    107., 32.463,    349,  277),
    ("G222", 45., 45., -4.85,   151.1,    111., 88.,       138,  112),
    ("G226", 25., 25., 12.19,   133.459,  95.,  10.159,    737,  513),
    ("G227", 25., 25., 12.19,   133.459,  95.,  5.079,     1473, 1025),
    ("G236", 25., 25., 16.281,  -233.862, 95.,  40.635,    151,  113),
    ("G237", 50., 50., 16.201,  -285.72,  107., 32.463,    54,   47),
    ("G241", 45., 45., -4.85,   151.1,    111., 22.,       549,  445),
    ("G245", 35., 35., 22.98,   92.84,    80.,  8.,        336,  372),
    ("G246", 40., 40., 25.97,   127.973,  115., 8.,        332,  371),
    ("G247", 35., 35., 22.98,   110.84,   98.,  8.,        336,  372),
    ("G252", 25., 25., 16.281,  126.138,  95.,  20.317,    301,  225),
];

fn lambert(e: &LambertEntry, r_km: f64) -> GridInfo {
    GridInfo::Lambert(LambertData {
        name: e.0.to_string(),
        scale_lat_1: e.1,
        scale_lat_2: e.2,
        lat_pin: e.3,
        lon_pin: e.4,
        x_pin: 0.,
        y_pin: 0.,
        lon_orient: e.5,
        d_km: e.6,
        r_km,
        nx: e.7,
        ny: e.8,
    })
}

// ----- S T E R E O G R A P H I C -----------------------------------------------------

// name, hemisphere, scale_lat, lat_pin, lon_pin, x_pin, y_pin, lon_orient, d_km, r_km, nx, ny
type StereoEntry = (&'static str, char, f64, f64, f64, f64, f64, f64, f64, f64, usize, usize);

const R: f64 = NCEP_EARTH_RADIUS_KM;
const W: f64 = WRF_EARTH_RADIUS_KM;

#[rustfmt::skip]
const NCEP_STEREO: &[StereoEntry] = &[
    ("G005", 'N', 60.,  7.647,   133.443, 0.,  0.,  105., 190.5,   R, 53,   57),
    ("G006", 'N', 60.,  7.647,   133.443, 0.,  0.,  105., 190.5,   R, 53,   45),
    ("G027", 'N', 60.,  -20.826, 125.,    0.,  0.,  80.,  381.,    R, 65,   65),
    ("G055", 'N', 60.,  -10.947, 154.289, 0.,  0.,  105., 254.,    R, 87,   71),
    ("G056", 'N', 60.,  7.647,   133.443, 0.,  0.,  105., 127.,    R, 87,   71),
    ("G087", 'N', 60.,  22.876,  120.491, 0.,  0.,  105., 68.153,  R, 81,   62),
    ("G088", 'N', 60.,  10.,     128.,    0.,  0.,  105., 15.,     R, 580,  548),
    ("G100", 'N', 60.,  17.108,  129.296, 0.,  0.,  105., 91.452,  R, 83,   83),
    ("G101", 'N', 60.,  10.528,  137.146, 0.,  0.,  105., 91.452,  R, 113,  91),
    ("G103", 'N', 60.,  22.405,  121.352, 0.,  0.,  105., 91.452,  R, 65,   56),
    ("G104", 'N', 60.,  -0.268,  139.475, 0.,  0.,  105., 90.755,  R, 147,  110),
    ("G105", 'N', 60.,  17.529,  129.296, 0.,  0.,  105., 90.755,  R, 83,   83),
    ("G106", 'N', 60.,  17.533,  129.296, 0.,  0.,  105., 45.373,  R, 165,  117),
    ("G107", 'N', 60.,  23.438,  120.168, 0.,  0.,  105., 45.373,  R, 120,  92),
    ("G201", 'N', 60.,  -20.826, 150.,    0.,  0.,  105., 381.,    R, 65,   65),
    ("G202", 'N', 60.,  7.838,   141.028, 0.,  0.,  105., 190.5,   R, 65,   43),
    ("G203", 'N', 60.,  19.132,  185.837, 0.,  0.,  150., 190.5,   R, 45,   39),
    ("G205", 'N', 60.,  0.616,   84.904,  0.,  0.,  60.,  190.5,   R, 45,   39),
    ("G207", 'N', 60.,  42.085,  175.641, 0.,  0.,  150., 95.25,   R, 49,   35),
    ("G213", 'N', 60.,  7.838,   141.028, 0.,  0.,  105., 95.25,   R, 129,  85),
    ("G214", 'N', 60.,  42.085,  175.641, 0.,  0.,  150., 47.625,  R, 97,   69),
    ("G216", 'N', 60.,  30.,     173.,    0.,  0.,  135., 45.,     R, 139,  107),
    ("G217", 'N', 60.,  30.,     173.,    0.,  0.,  135., 22.5,    R, 277,  213),
    ("G223", 'N', 60.,  -20.826, 150.,    0.,  0.,  105., 190.5,   R, 129,  129),
    ("G240", 'N', 60.,  23.098,  119.036, 0.,  0.,  105., 4.7625,  R, 1121, 881),
    ("G242", 'N', 60.,  30.,     173.,    0.,  0.,  135., 11.25,   R, 553,  425),
    ("G249", 'N', 60.,  45.4,    171.6,   0.,  0.,  150., 9.868,   R, 367,  343),
    ("G224", 'S', -60., -90.,    0.,      32., 32., -75., 381.,    R, 65,   65),
];

#[rustfmt::skip]
const MISC_STEREO: &[StereoEntry] = &[
    ("wwmca_north",  'N', 60.,  90.,    0.,      511., 511., 80.,   23.79848, R, 1024, 1024),
    ("wwmca_south",  'S', -60., -90.,   0.,      511., 511., -100., 23.79848, R, 1024, 1024),
    ("stage4",       'N', 60.,  22.774, 120.376, 0.,   0.,   105.,  4.763,    W, 1160, 880),
    ("stage4_2002",  'N', 60.,  23.117, 119.017, 0.,   0.,   105.,  4.762,    W, 1121, 881),
    ("alaska",       'N', 60.,  30.,    173.,    0.,   0.,   135.,  45.,      W, 139,  107),
    ("hires_alaska", 'N', 60.,  30.,    173.,    0.,   0.,   135.,  11.25,    W, 553,  425),
];

fn stereographic(e: &StereoEntry) -> GridInfo {
    GridInfo::Stereographic(StereographicData {
        name: e.0.to_string(),
        hemisphere: e.1,
        scale_lat: e.2,
        lat_pin: e.3,
        lon_pin: e.4,
        x_pin: e.5,
        y_pin: e.6,
        lon_orient: e.7,
        d_km: e.8,
        r_km: e.9,
        nx: e.10,
        ny: e.11,
    })
}

// ----- L A T / L O N -----------------------------------------------------------------

// name, lat_ll, lon_ll, delta_lat, delta_lon, nlat, nlon
type LatLonEntry = (&'static str, f64, f64, f64, f64, usize, usize);

#[rustfmt::skip]
const NCEP_LATLON: &[LatLonEntry] = &[
    ("G002", -90.,   0.,      2.5,   2.5,   73,  144),
    ("G003", -90.,   0.,      1.,    1.,    181, 360),
    ("G004", -90.,   0.,      0.5,   0.5,   361, 720),
    ("G029", 0.,     0.,      2.5,   2.5,   37,  145),
    ("G030", -90.,   0.,      2.5,   2.5,   37,  145),
    ("G033", 0.,     0.,      2.,    2.,    46,  181),
    ("G034", -90.,   0.,      2.,    2.,    46,  181),
    ("G045", -90.,   0.,      1.25,  1.25,  145, 288),
    ("G085", 0.5,    -0.5,    1.,    1.,    90,  360),
    ("G086", -89.5,  -0.5,    1.,    1.,    90,  360),
    ("G110", 25.063, 124.938, 0.125, 0.125, 224, 464),
    ("G175", 0.,     -130.,   0.09,  0.09,  334, 556),
    ("G228", -90.,   0.,      2.5,   2.5,   73,  144),
    ("G229", -90.,   0.,      1.,    1.,    181, 360),
    ("G230", -90.,   0.,      0.5,   0.5,   361, 720),
    ("G231", 0.,     0.,      0.5,   0.5,   181, 720),
    ("G232", 0.,     0.,      1.,    1.,    91,  360),
    ("G233", -78.,   0.,      1.,    1.25,  157, 288),
    ("G234", -45.,   98.,     0.25,  0.25,  241, 133),
    ("G243", 10.,    170.,    0.4,   0.4,   101, 126),
    ("G248", 14.5,   71.5,    0.075, 0.075, 101, 135),
    ("G250", 16.5,   162.,    0.075, 0.075, 101, 135),
    ("G251", 26.35,  83.05,   0.1,   0.1,   210, 332),
];

fn latlon(e: &LatLonEntry) -> GridInfo {
    GridInfo::LatLon(LatLonData {
        name: e.0.to_string(),
        lat_ll: e.1,
        lon_ll: e.2,
        delta_lat: e.3,
        delta_lon: e.4,
        nlat: e.5,
        nlon: e.6,
    })
}

// ----- M E R C A T O R ---------------------------------------------------------------

// name, lat_ll, lon_ll, lat_ur, lon_ur, nx, ny
type MercatorEntry = (&'static str, f64, f64, f64, f64, usize, usize);

#[rustfmt::skip]
const NCEP_MERCATOR: &[MercatorEntry] = &[
    ("G001", -48.09, 0.,      48.09,  0.,      73,  23),
    ("G053", -61.05, 0.,      61.05,  0.,      117, 51),
    ("G195", 16.829, 68.196,  19.747, 63.972,  177, 129),
    ("G196", 18.067, 161.626, 23.082, 153.969, 321, 225),
    ("G199", 12.35,  216.314, 16.794, 179.96,  193, 193),
    ("G204", -25.,   -110.,   60.644, 109.129, 93,  68),
    ("G208", 9.343,  167.315, 28.092, 145.878, 29,  27),
    ("G210", 9.,     77.,     26.422, 58.625,  25,  25),
    ("G225", -25.,   250.,    60.64,  109.129, 185, 135),
    ("G254", -35.,   250.,    60.789, 109.129, 369, 300),
];

fn mercator(e: &MercatorEntry) -> GridInfo {
    GridInfo::Mercator(MercatorData {
        name: e.0.to_string(),
        lat_ll: e.1,
        lon_ll: e.2,
        lat_ur: e.3,
        lon_ur: e.4,
        nx: e.5,
        ny: e.6,
    })
}

// ----- G A U S S I A N ---------------------------------------------------------------

// name, lon_zero, nx, ny
#[rustfmt::skip]
const NCEP_GAUSSIAN: &[(&str, f64, usize, usize)] = &[
    ("G098", 0., 192, 94),
    ("G126", 0., 384, 190),
    ("G127", 0., 768, 384),
];

// ----- R E G I S T R Y ---------------------------------------------------------------

/// All named grids, in lookup order
static REGISTRY: Lazy<Vec<GridInfo>> = Lazy::new(|| {
    let mut grids = Vec::new();
    grids.extend(DTC_LAMBERT.iter().map(|e| lambert(e, WRF_EARTH_RADIUS_KM)));
    grids.extend(NCEP_LATLON.iter().map(latlon));
    grids.extend(NCEP_STEREO.iter().map(stereographic));
    grids.extend(MISC_STEREO.iter().map(stereographic));
    grids.extend(NCEP_LAMBERT.iter().map(|e| lambert(e, NCEP_EARTH_RADIUS_KM)));
    grids.extend(NCEP_MERCATOR.iter().map(mercator));
    grids.extend(NCEP_GAUSSIAN.iter().map(|e| {
        GridInfo::Gaussian(GaussianData {
            name: e.0.to_string(),
            lon_zero: e.1,
            nx: e.2,
            ny: e.3,
        })
    }));
    grids
});

/// Look up a named grid. Names are case sensitive, and the first match
/// wins. A miss is `None`, leaving the fallback to the caller.
pub fn find_grid_by_name(name: &str) -> Option<GridInfo> {
    let found = REGISTRY.iter().find(|info| info.name() == name).cloned();
    match &found {
        Some(info) => log::trace!("Found {} grid '{name}'", info.family()),
        None => log::trace!("No grid named '{name}'"),
    }
    found
}

/// Look up and build a named grid
pub fn find_grid(name: &str) -> Result<Grid, Error> {
    let Some(info) = find_grid_by_name(name) else {
        return Err(Error::NotFound(name.to_string(), ": no such grid".to_string()));
    };
    info.create_grid()
}

/// The names of all registered grids, in lookup order
pub fn grid_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|info| info.name()).collect()
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn lookup() -> Result<(), Error> {
        let a = find_grid("wrf8")?;
        let b = find_grid("wrf8")?;
        assert_eq!(a.serialize(" "), b.serialize(" "));
        assert_eq!(a, b);

        assert!(find_grid_by_name("G999").is_none());
        assert!(find_grid_by_name("WRF8").is_none());
        assert!(matches!(find_grid("G999"), Err(Error::NotFound(..))));

        // First match wins: the DTC tables come first
        let names = grid_names();
        assert_eq!(names[0], "wrf8");
        assert_eq!(names.last(), Some(&"G127"));
        Ok(())
    }

    #[test]
    fn wrf10() -> Result<(), Error> {
        let grid = find_grid("wrf10")?;
        assert_eq!((grid.nx(), grid.ny()), (180, 150));
        let (lat, lon) = grid.xy_to_latlon(0., 0.);
        assert_float_eq!(lat, 31.29359, abs <= 1e-3);
        assert_float_eq!(lon, 109.2074, abs <= 1e-3);
        Ok(())
    }

    #[test]
    fn every_grid_builds() -> Result<(), Error> {
        for name in grid_names() {
            let grid = find_grid(name)?;
            assert_eq!(grid.name(), name);
            // Round trip through a central point
            let (x, y) = (grid.nx() as f64 / 2., grid.ny() as f64 / 2.);
            let (lat, lon) = grid.xy_to_latlon(x, y);
            let (xx, yy) = grid.latlon_to_xy(lat, lon);
            assert!((xx - x).abs() < 1e-6, "{name}: x {x} -> {xx}");
            assert!((yy - y).abs() < 1e-6, "{name}: y {y} -> {yy}");
        }
        Ok(())
    }

    #[test]
    fn same_parameters_same_grid() -> Result<(), Error> {
        // G228 repeats G002 under another name
        let a = find_grid("G002")?;
        let b = find_grid("G228")?;
        assert_eq!(a, b);
        assert_eq!(a.serialize(" "), b.serialize(" "));
        assert_ne!(a, find_grid("G003")?);
        Ok(())
    }

    // Grids compare by their parameters, not by their serialized text,
    // which rounds some parameters and keeps the longitude representation
    #[test]
    fn equality_is_structural_not_textual() -> Result<(), Error> {
        let a = find_grid("G002")?;
        let Some(GridInfo::LatLon(g002)) = find_grid_by_name("G002") else {
            return Err(Error::General("G002 is a lat/lon grid"));
        };

        // Same grid, different text
        let b = Grid::new(&GridInfo::LatLon(LatLonData {
            lon_ll: 360.,
            ..g002.clone()
        }))?;
        assert_ne!(a.serialize(" "), b.serialize(" "));
        assert_eq!(a, b);

        // Same text, different grid
        let c = Grid::new(&GridInfo::LatLon(LatLonData {
            lon_ll: 2e-4,
            ..g002
        }))?;
        assert_eq!(a.serialize(" "), c.serialize(" "));
        assert_ne!(a, c);
        Ok(())
    }
}
