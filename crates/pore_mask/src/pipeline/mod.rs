use image::{DynamicImage, GrayImage};
use crate::{
    algorithms::{binarize, ExternalContourExtractor, OpeningPreprocessor},
    annotation::AnnotationBuilder,
    error::Result,
    traits::{ContourExtractor, ImagePreprocessor},
    types::{AnnotationRecord, Contour},
};

/// Mask to annotation pipeline: binarize, open, trace, annotate.
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
    annotation_builder: AnnotationBuilder,
}

impl Pipeline {
    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
        annotation_builder: AnnotationBuilder,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
            annotation_builder,
        }
    }

    /// Binarize the mask, then run every preprocessor in order
    pub fn binary_mask(&self, image: &DynamicImage) -> Result<GrayImage> {
        let mut processed_image = binarize(image);
        for preprocessor in &self.preprocessors {
            processed_image = preprocessor.preprocess(&processed_image)?;
        }
        Ok(processed_image)
    }

    /// Trace the external contours of a decoded mask
    pub fn extract_contours(&self, image: &DynamicImage) -> Result<Vec<Contour>> {
        let mask = self.binary_mask(image)?;
        self.contour_extractor.extract_contours(&mask)
    }

    /// Process a decoded mask into its annotation record.
    ///
    /// `image_path` is stored verbatim, so pass the file name rather than a
    /// full path.
    pub fn process(&self, image: &DynamicImage, image_path: &str) -> Result<AnnotationRecord> {
        let contours = self.extract_contours(image)?;
        Ok(self
            .annotation_builder
            .build(&contours, image_path, image.width(), image.height()))
    }
}

impl Default for Pipeline {
    /// Threshold at intensity 1, open with a 5x5 square, keep external
    /// borders, drop polygons under 15 vertices.
    fn default() -> Self {
        Self::new(
            vec![Box::new(OpeningPreprocessor::default())],
            Box::new(ExternalContourExtractor),
            AnnotationBuilder::default(),
        )
    }
}
