use geo_types::{Coord, LineString};
use crate::{traits::ContourSimplifier, types::Contour};

/// Fraction of the closed perimeter used as the Douglas-Peucker tolerance
pub const RELATIVE_TOLERANCE: f64 = 1e-6;

/// Douglas-Peucker simplifier using geo crate's implementation.
///
/// The tolerance scales with the contour's closed perimeter, so at the
/// default ratio only exactly collinear vertices are removed.
#[derive(Debug, Clone)]
pub struct DouglasPeuckerSimplifier {
    pub relative_tolerance: f64,
}

impl Default for DouglasPeuckerSimplifier {
    fn default() -> Self {
        Self { relative_tolerance: RELATIVE_TOLERANCE }
    }
}

impl ContourSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, contour: &[[i32; 2]]) -> Contour {
        use geo::Simplify;

        if contour.len() < 3 {
            return contour.to_vec();
        }

        let ring = closed_ring(contour);
        let tolerance = self.relative_tolerance * perimeter_of(&ring);
        let simplified = ring.simplify(&tolerance);

        let mut points: Contour = simplified
            .coords()
            .map(|coord| [coord.x.round() as i32, coord.y.round() as i32])
            .collect();
        // drop the closing duplicate of the first vertex
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }
}

/// Closed perimeter length of a contour
pub fn closed_perimeter(contour: &[[i32; 2]]) -> f64 {
    perimeter_of(&closed_ring(contour))
}

fn perimeter_of(ring: &LineString<f64>) -> f64 {
    use geo::EuclideanLength;
    ring.euclidean_length()
}

fn closed_ring(contour: &[[i32; 2]]) -> LineString<f64> {
    let coords: Vec<Coord<f64>> = contour
        .iter()
        .map(|&[x, y]| Coord { x: x as f64, y: y as f64 })
        .collect();
    let mut ring = LineString::new(coords);
    ring.close();
    ring
}
