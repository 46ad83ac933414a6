use image::GrayImage;
use crate::{error::Result, types::Contour};

/// Trait for image preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image (e.g., threshold, morphological opening)
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract contours from a binary image
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for contour simplification algorithms
pub trait ContourSimplifier: Send + Sync {
    /// Reduce the vertex count of a closed contour
    fn simplify(&self, contour: &[[i32; 2]]) -> Contour;
}
