use float_eq::assert_float_eq;
use vxgrid::prelude::*;

// One grid of each family
fn one_of_each() -> Result<Vec<Grid>, Error> {
    let mut grids = Vec::new();
    for name in ["wrf10", "G212", "G005", "G224", "G003", "G175", "G204", "G098"] {
        grids.push(find_grid(name)?);
    }
    grids.push(parse_grid("laea 200 150 30 20 50 -10 10 6378.137 6356.752314245")?);
    grids.push(parse_grid("rotlatlon 121 81 -10 15 0.25 0.25 -40 -10 5")?);
    Ok(grids)
}

#[test]
fn round_trip() -> Result<(), Error> {
    for grid in one_of_each()? {
        let (nx, ny) = (grid.nx() as f64, grid.ny() as f64);
        for (fx, fy) in [(0., 0.), (0.5, 0.5), (0.99, 0.01), (0.25, 0.8)] {
            let (x, y) = (fx * (nx - 1.), fy * (ny - 1.));
            let (lat, lon) = grid.xy_to_latlon(x, y);
            let (xx, yy) = grid.latlon_to_xy(lat, lon);
            assert!(
                (xx - x).abs() < 1e-6 && (yy - y).abs() < 1e-6,
                "{}: ({x}, {y}) -> ({lat}, {lon}) -> ({xx}, {yy})",
                grid.name()
            );
        }
    }
    Ok(())
}

#[test]
fn areas_are_positive() -> Result<(), Error> {
    for grid in one_of_each()? {
        let (nx, ny) = (grid.nx() as i64, grid.ny() as i64);
        for (x, y) in [(0, 0), (nx / 2, ny / 2), (nx - 1, ny - 1)] {
            let area = grid.calc_area(x, y)?;
            assert!(area > 0., "{}: area {area} at ({x}, {y})", grid.name());
        }
    }
    Ok(())
}

#[test]
fn lambert_area_scales_with_radius() -> Result<(), Error> {
    let Some(GridInfo::Lambert(data)) = find_grid_by_name("G212") else {
        return Err(Error::General("G212 is not a Lambert grid"));
    };
    let small = Grid::new(&data.clone().into())?;
    let k = 1.7;
    let big = Grid::new(
        &LambertData {
            r_km: k * data.r_km,
            ..data
        }
        .into(),
    )?;

    for (x, y) in [(0, 0), (92, 64), (184, 128), (3, 120)] {
        let a = small.calc_area(x, y)?;
        assert_float_eq!(big.calc_area(x, y)?, k * k * a, r2nd <= 1e-6);
    }
    Ok(())
}

#[test]
fn tangent_cone() -> Result<(), Error> {
    let grid = vxgrid::grid::LambertGrid::new(&LambertData {
        name: "tangent".to_string(),
        scale_lat_1: 42.,
        scale_lat_2: 42.,
        lat_pin: 30.,
        lon_pin: 100.,
        lon_orient: 95.,
        d_km: 12.,
        r_km: 6371.2,
        nx: 100,
        ny: 100,
        ..Default::default()
    })?;
    assert_float_eq!(grid.cone(), 42_f64.to_radians().sin(), abs <= 1e-10);
    Ok(())
}

#[test]
fn registry_determinism() -> Result<(), Error> {
    let a = find_grid_by_name("wrf8").ok_or(Error::General("wrf8"))?;
    let b = find_grid_by_name("wrf8").ok_or(Error::General("wrf8"))?;
    assert_eq!(a.create_grid()?.serialize(" "), b.create_grid()?.serialize(" "));
    assert!(find_grid_by_name("wrf9").is_none());
    Ok(())
}

#[test]
fn shared_ownership() -> Result<(), Error> {
    let grid = find_grid("G218")?;
    let copies: Vec<Grid> = std::iter::repeat(grid.clone()).take(10).collect();
    assert_eq!(grid.ref_count(), 11);

    let survivor = copies[3].clone();
    drop(copies);
    drop(grid);
    assert_eq!(survivor.ref_count(), 1);
    assert_eq!((survivor.nx(), survivor.ny()), (614, 428));
    Ok(())
}

#[test]
fn unstructured_rejection() -> Result<(), Error> {
    let data = UnstructuredData {
        name: "buoys".to_string(),
        lat: vec![60.1, 59.8, 58.3, 61.0],
        lon: vec![-5.2, -4.1, -10.6, 2.3],
        max_distance_km: Some(50.),
    };
    let grid = Grid::new(&data.into())?;
    assert_eq!((grid.nx(), grid.ny()), (4, 1));

    assert_eq!(grid.latlon_to_xy(58.3, -10.6), (2., 0.));
    assert_eq!(grid.xy_to_latlon(2., 0.), (58.3, -10.6));
    assert_eq!(grid.latlon_to_xy(58.5, -10.5), (2., 0.));
    assert_eq!(grid.latlon_to_xy(45., 0.).0, -1.);
    Ok(())
}

#[test]
fn wrf10() -> Result<(), Error> {
    let grid = Grid::new(&GridInfo::Lambert(LambertData {
        name: "wrf10".to_string(),
        scale_lat_1: 30.,
        scale_lat_2: 60.,
        lat_pin: 31.29359,
        lon_pin: 109.2074,
        x_pin: 0.,
        y_pin: 0.,
        lon_orient: 98.,
        d_km: 10.,
        r_km: 6367.47,
        nx: 180,
        ny: 150,
    }))?;
    assert_eq!(grid.nx(), 180);
    assert_eq!(grid.ny(), 150);
    let (lat, lon) = grid.xy_to_latlon(0., 0.);
    assert_float_eq!(lat, 31.29359, abs <= 1e-3);
    assert_float_eq!(lon, 109.2074, abs <= 1e-3);
    assert_eq!(grid, find_grid("wrf10")?);
    Ok(())
}
