use image::GrayImage;
use imageproc::{contours::BorderType, point::Point};
use crate::{error::Result, traits::ContourExtractor, types::Contour};

/// Imageproc-based extractor returning only the outermost borders.
///
/// Hole borders and the borders of regions nested inside holes are dropped.
/// Each border is compressed so that only the points where the step
/// direction changes survive; straight runs collapse to their end points.
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor;

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        let contours = imageproc::contours::find_contours::<i32>(binary_image);

        let result: Vec<Contour> = contours
            .into_iter()
            .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
            .map(|contour| compress_chain(&contour.points))
            .collect();

        tracing::debug!(count = result.len(), "traced external contours");
        Ok(result)
    }
}

/// Drop every point of a closed chain whose incoming and outgoing steps match.
pub fn compress_chain(points: &[Point<i32>]) -> Contour {
    let n = points.len();
    if n < 3 {
        return points.iter().map(|p| [p.x, p.y]).collect();
    }

    let step = |from: &Point<i32>, to: &Point<i32>| (to.x - from.x, to.y - from.y);

    let compressed: Contour = (0..n)
        .filter(|&i| {
            let prev = &points[(i + n - 1) % n];
            let next = &points[(i + 1) % n];
            step(prev, &points[i]) != step(&points[i], next)
        })
        .map(|i| [points[i].x, points[i].y])
        .collect();

    // only reachable when every step is zero
    if compressed.is_empty() {
        return points.iter().map(|p| [p.x, p.y]).collect();
    }

    compressed
}
