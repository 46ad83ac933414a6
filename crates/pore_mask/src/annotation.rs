use crate::{
    algorithms::DouglasPeuckerSimplifier,
    traits::ContourSimplifier,
    types::{AnnotationRecord, Contour, Shape},
};

/// Simplified contours with fewer vertices than this are dropped
pub const MIN_POLYGON_VERTICES: usize = 15;

/// Turns traced contours into a LabelMe record.
///
/// Contours are visited in extraction order. A contour's group id is its
/// position in that order plus one, so dropped contours leave gaps.
pub struct AnnotationBuilder {
    simplifier: Box<dyn ContourSimplifier>,
    min_vertices: usize,
}

impl AnnotationBuilder {
    pub fn new(simplifier: Box<dyn ContourSimplifier>, min_vertices: usize) -> Self {
        Self { simplifier, min_vertices }
    }

    pub fn build(
        &self,
        contours: &[Contour],
        image_path: impl Into<String>,
        image_width: u32,
        image_height: u32,
    ) -> AnnotationRecord {
        let mut record = AnnotationRecord::new(image_path, image_width, image_height);

        for (i, contour) in contours.iter().enumerate() {
            let points = self.simplifier.simplify(contour);
            if points.len() < self.min_vertices {
                tracing::trace!(index = i, vertices = points.len(), "dropping contour");
                continue;
            }
            record.shapes.push(Shape::pore(points, i as u32 + 1));
        }

        tracing::debug!(
            image = %record.image_path,
            contours = contours.len(),
            shapes = record.shapes.len(),
            "assembled annotation"
        );
        record
    }
}

impl Default for AnnotationBuilder {
    fn default() -> Self {
        Self::new(Box::new(DouglasPeuckerSimplifier::default()), MIN_POLYGON_VERTICES)
    }
}
