//! Unstructured grids: a cloud of arbitrarily placed points, located by
//! nearest neighbour search
use super::*;
use crate::geoid::NCEP_EARTH_RADIUS_KM;
use kdtree::distance::squared_euclidean;
use kdtree::KdTree;

/// Sentinel `x` for queries rejected by the maximum match distance
pub const REJECTED: f64 = -1.;

/// A point cloud, seen as a single row of `n` points: `nx() == n`,
/// `ny() == 1`. The search index is built once, at construction.
pub struct UnstructuredGrid {
    data: UnstructuredData,
    tree: KdTree<f64, usize, [f64; 3]>,
}

// The tree is large and its Debug output useless
impl Debug for UnstructuredGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnstructuredGrid")
            .field("name", &self.data.name)
            .field("n_face", &self.data.lat.len())
            .field("max_distance_km", &self.data.max_distance_km)
            .finish()
    }
}

// Geographic (degrees) to unit sphere cartesian
fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let (sinphi, cosphi) = lat.to_radians().sin_cos();
    let (sinlam, coslam) = lon.to_radians().sin_cos();
    [cosphi * coslam, cosphi * sinlam, sinphi]
}

/// Great circle distance, in km, for a squared chord on the unit sphere
fn chord_to_km(chord2: f64) -> f64 {
    let half = (0.5 * chord2.sqrt()).min(1.);
    2. * half.asin() * NCEP_EARTH_RADIUS_KM
}

impl UnstructuredGrid {
    pub fn new(data: &UnstructuredData) -> Result<UnstructuredGrid, Error> {
        data.validate()?;
        let mut tree = KdTree::new(3);
        for (index, (&lat, &lon)) in data.lat.iter().zip(data.lon.iter()).enumerate() {
            tree.add(unit_vector(lat, lon), index)
                .map_err(|e| Error::Index(format!("{e:?}")))?;
        }
        log::debug!(
            "unstructured grid '{}': {} points indexed",
            data.name,
            data.lat.len()
        );
        Ok(UnstructuredGrid {
            data: data.clone(),
            tree,
        })
    }

    pub fn data(&self) -> &UnstructuredData {
        &self.data
    }

    /// Index of, and great circle distance (km) to, the point nearest to
    /// `(lat, lon)`
    pub fn nearest(&self, lat: f64, lon: f64) -> Result<(usize, f64), Error> {
        let p = unit_vector(lat, lon);
        let found = self
            .tree
            .nearest(&p, 1, &squared_euclidean)
            .map_err(|e| Error::Index(format!("{e:?}")))?;
        let Some(&(chord2, &index)) = found.first() else {
            return Err(Error::Index("empty search result".to_string()));
        };
        Ok((index, chord_to_km(chord2)))
    }
}

impl GridRep for UnstructuredGrid {
    fn name(&self) -> &str {
        &self.data.name
    }

    fn nx(&self) -> usize {
        self.data.lat.len()
    }

    fn ny(&self) -> usize {
        1
    }

    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (index, km) = match self.nearest(lat, lon) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("unstructured grid '{}': {e}", self.data.name);
                return (REJECTED, 0.);
            }
        };
        if let Some(max) = self.data.max_distance_km {
            if km > max {
                log::trace!("({lat}, {lon}) rejected: {km:.3} km from nearest point");
                return (REJECTED, 0.);
            }
        }
        (index as f64, 0.)
    }

    fn xy_to_latlon(&self, x: f64, _y: f64) -> (f64, f64) {
        let i = x.round();
        if !(0. ..self.nx() as f64).contains(&i) {
            return (f64::NAN, f64::NAN);
        }
        let i = i as usize;
        (self.data.lat[i], self.data.lon[i])
    }

    // Points carry no cell geometry
    fn calc_area(&self, _x: i64, _y: i64) -> Result<f64, Error> {
        Ok(0.)
    }

    fn rot_grid_to_earth(&self, _x: i64, _y: i64) -> f64 {
        0.
    }

    fn serialize(&self, sep: &str) -> String {
        let d = &self.data;
        let mut items = vec![
            "Projection: Unstructured".to_string(),
            format!("n_face: {}", d.lat.len()),
            format!("lat_checksum: {:.4}", d.lat_checksum()),
            format!("lon_checksum: {:.4}", d.lon_checksum()),
        ];
        if let Some(max) = d.max_distance_km {
            items.push(format!("max_distance_km: {max:.3}"));
        }
        items.join(sep)
    }

    fn dump(&self, out: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        let p = indent(depth);
        let d = &self.data;
        writeln!(out, "{p}Projection      = Unstructured")?;
        writeln!(out, "{p}Name            = \"{}\"", d.name)?;
        writeln!(out, "{p}n_face          = {}", d.lat.len())?;
        writeln!(out, "{p}lat_checksum    = {:.4}", d.lat_checksum())?;
        writeln!(out, "{p}lon_checksum    = {:.4}", d.lon_checksum())?;
        match d.max_distance_km {
            Some(max) => writeln!(out, "{p}max_distance_km = {max:.3}"),
            None => writeln!(out, "{p}max_distance_km = (none)"),
        }
    }

    fn info(&self) -> GridInfo {
        GridInfo::Unstructured(self.data.clone())
    }

    fn wrap_lon(&self) -> bool {
        false
    }

    fn is_global(&self) -> bool {
        false
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn stations(max_distance_km: Option<f64>) -> UnstructuredData {
        UnstructuredData {
            name: "stations".to_string(),
            lat: vec![40.0, 40.5, 55.7, -33.9, 0.1],
            lon: vec![105.0, 104.2, -12.6, -18.4, 179.9],
            max_distance_km,
        }
    }

    #[test]
    fn nearest_neighbour() -> Result<(), Error> {
        let grid = UnstructuredGrid::new(&stations(None))?;
        assert_eq!((grid.nx(), grid.ny()), (5, 1));

        assert_eq!(grid.latlon_to_xy(40.45, 104.3), (1., 0.));
        assert_eq!(grid.latlon_to_xy(56., -12.), (2., 0.));
        // Across the date line
        assert_eq!(grid.latlon_to_xy(0., -179.9), (4., 0.));
        // Without a limit, everything has a match
        assert_eq!(grid.latlon_to_xy(-80., 60.), (3., 0.));

        // Exact lookup by index
        assert_eq!(grid.xy_to_latlon(2., 0.), (55.7, -12.6));
        assert!(grid.xy_to_latlon(5., 0.).0.is_nan());
        assert!(grid.xy_to_latlon(-1., 0.).0.is_nan());
        Ok(())
    }

    #[test]
    fn rejection() -> Result<(), Error> {
        let grid = UnstructuredGrid::new(&stations(Some(100.)))?;

        // Half a degree north of point 0, and 68 km east of point 1
        assert_eq!(grid.latlon_to_xy(40.5, 105.0), (0., 0.));
        let (index, km) = grid.nearest(40.5, 105.)?;
        assert_eq!(index, 0);
        assert_float_eq!(km, 55.6, abs <= 0.1);

        // Far from everything
        assert_eq!(grid.latlon_to_xy(-80., 60.), (REJECTED, 0.));

        // Query exactly at a point
        let (x, y) = grid.latlon_to_xy(-33.9, -18.4);
        assert_eq!((x, y), (3., 0.));
        assert_eq!(grid.xy_to_latlon(x, y), (-33.9, -18.4));
        Ok(())
    }

    #[test]
    fn bad_input() {
        let mut data = stations(None);
        data.lon.pop();
        assert!(UnstructuredGrid::new(&data).is_err());
        assert!(UnstructuredGrid::new(&UnstructuredData::default()).is_err());
        data = stations(Some(-1.));
        assert!(UnstructuredGrid::new(&data).is_err());
    }

    #[test]
    fn serialization() -> Result<(), Error> {
        let grid = UnstructuredGrid::new(&stations(None))?;
        let s = grid.serialize(" ");
        assert!(s.starts_with("Projection: Unstructured n_face: 5 lat_checksum: 102.4000"));
        assert_eq!(grid.calc_area(1, 0)?, 0.);
        Ok(())
    }
}
