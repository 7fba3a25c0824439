use geo::{Coord, MapCoords, Point};

/// Mean earth radius in meters (IUGG)
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Local equirectangular projection centred on a reference point
///
/// Maps WGS84 longitude/latitude to planar meters east/north of the origin.
/// Distortion stays well below a percent within tens of kilometers of the
/// origin, which covers the walk networks this crate works on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    origin: Coord<f64>,
    cos_lat: f64,
}

impl LocalProjection {
    pub fn new(origin: Point<f64>) -> Self {
        Self {
            origin: origin.into(),
            cos_lat: origin.y().to_radians().cos(),
        }
    }

    /// Projection centred on the mean of the given points
    ///
    /// Falls back to the null island origin for an empty input.
    pub fn centered_on<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<f64>>,
    {
        let (sum, count) = points
            .into_iter()
            .fold((Coord { x: 0.0, y: 0.0 }, 0usize), |(sum, count), point| {
                (sum + point.0, count + 1)
            });

        if count == 0 {
            return Self::new(Point::new(0.0, 0.0));
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = sum / count as f64;
        Self::new(mean.into())
    }

    pub fn origin(&self) -> Point<f64> {
        self.origin.into()
    }

    /// Longitude/latitude to meters
    pub fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (coord.x - self.origin.x).to_radians() * EARTH_RADIUS_M * self.cos_lat,
            y: (coord.y - self.origin.y).to_radians() * EARTH_RADIUS_M,
        }
    }

    /// Meters to longitude/latitude
    pub fn unproject(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.origin.x + (coord.x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees(),
            y: self.origin.y + (coord.y / EARTH_RADIUS_M).to_degrees(),
        }
    }

    pub fn project_geometry<G>(&self, geometry: &G) -> G::Output
    where
        G: MapCoords<f64, f64>,
    {
        geometry.map_coords(|c| self.project(c))
    }

    pub fn unproject_geometry<G>(&self, geometry: &G) -> G::Output
    where
        G: MapCoords<f64, f64>,
    {
        geometry.map_coords(|c| self.unproject(c))
    }
}
