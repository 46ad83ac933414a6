//! # Pore Mask to LabelMe Conversion Library
//!
//! Turns binary segmentation masks into LabelMe polygon annotations. Every
//! connected foreground region ("pore") becomes one `polygon` shape.
//!
//! ## Stages
//!
//! - **Binarize**: luminance conversion, then intensity `> 1` is foreground
//! - **Extract**: 5x5 morphological opening, external border tracing with
//!   direction-change compression
//! - **Annotate**: Douglas-Peucker simplification, a 15-vertex filter and
//!   1-based group ids that keep their extraction position
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pore_mask::{ConverterConfig, MaskConverter};
//!
//! let report = MaskConverter::new(ConverterConfig::new("prompt_mask", "json")).run()?;
//! println!("{} written, {} failed", report.written.len(), report.failures.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Single Image
//!
//! ```rust,no_run
//! use pore_mask::Pipeline;
//!
//! let image = image::open("mask.png")?;
//! let record = Pipeline::default().process(&image, "mask.png")?;
//! record.save_labelme("mask.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod annotation;
pub mod pipeline;
pub mod io;
pub mod config;
pub mod converter;

// Re-exports for convenience
pub use error::{MaskError, Result};
pub use types::{AnnotationRecord, Contour, Shape, ShapeType};
pub use traits::*;
pub use algorithms::*;
pub use annotation::{AnnotationBuilder, MIN_POLYGON_VERTICES};
pub use pipeline::Pipeline;
pub use io::*;
pub use config::ConverterConfig;
pub use converter::{convert_directory, ConversionReport, FileFailure, MaskConverter};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
    use imageproc::{
        drawing::{draw_filled_circle_mut, draw_filled_rect_mut},
        rect::Rect,
    };

    fn blank() -> GrayImage {
        GrayImage::new(160, 160)
    }

    fn with_disk(mut img: GrayImage, center: (i32, i32), radius: i32) -> GrayImage {
        draw_filled_circle_mut(&mut img, center, radius, Luma([255u8]));
        img
    }

    fn process(img: GrayImage) -> AnnotationRecord {
        Pipeline::default()
            .process(&DynamicImage::ImageLuma8(img), "mask.png")
            .expect("Should process successfully")
    }

    #[test]
    fn test_empty_mask_has_no_shapes() {
        let record = process(blank());
        assert!(record.shapes.is_empty());
        assert_eq!(record.image_width, 160);
        assert_eq!(record.image_height, 160);
    }

    #[test]
    fn test_single_blob() {
        let record = process(with_disk(blank(), (80, 80), 25));

        assert_eq!(record.shapes.len(), 1);
        let shape = &record.shapes[0];
        assert_eq!(shape.group_id, Some(1));
        assert_eq!(shape.label, "pore");
        assert_eq!(shape.shape_type, ShapeType::Polygon);
        assert!(shape.points.len() >= MIN_POLYGON_VERTICES);
    }

    #[test]
    fn test_two_disjoint_blobs() {
        let img = with_disk(with_disk(blank(), (40, 40), 20), (110, 110), 20);
        let record = process(img);

        let ids: Vec<_> = record.shapes.iter().map(|s| s.group_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);

        let (min, max) = record.shapes[0].bounding_box();
        assert!(min[0] >= 20 && min[1] >= 20 && max[0] <= 60 && max[1] <= 60);
        let (min, max) = record.shapes[1].bounding_box();
        assert!(min[0] >= 90 && min[1] >= 90 && max[0] <= 130 && max[1] <= 130);
    }

    #[test]
    fn test_speck_removed_by_opening() {
        let mut img = with_disk(blank(), (80, 100), 22);
        draw_filled_rect_mut(&mut img, Rect::at(130, 10).of_size(3, 3), Luma([255u8]));

        let record = process(img);
        assert_eq!(record.shapes.len(), 1);
        assert_eq!(record.shapes[0].group_id, Some(1));
    }

    #[test]
    fn test_points_stay_inside_image() {
        let mut img = with_disk(blank(), (30, 30), 20);
        img = with_disk(img, (120, 50), 18);
        img = with_disk(img, (70, 125), 24);

        let record = process(img);
        assert_eq!(record.shapes.len(), 3);
        for shape in &record.shapes {
            for &[x, y] in &shape.points {
                assert!((0..160).contains(&x) && (0..160).contains(&y));
            }
        }
    }

    #[test]
    fn test_axis_aligned_square_is_dropped() {
        let mut img = blank();
        draw_filled_rect_mut(&mut img, Rect::at(40, 40).of_size(60, 60), Luma([255u8]));

        let pipeline = Pipeline::default();
        let image = DynamicImage::ImageLuma8(img);
        let contours = pipeline.extract_contours(&image).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 4);

        let record = pipeline.process(&image, "square.png").unwrap();
        assert!(record.shapes.is_empty());
    }

    #[test]
    fn test_group_ids_not_renumbered_after_filtering() {
        let mut img = blank();
        draw_filled_rect_mut(&mut img, Rect::at(10, 10).of_size(40, 40), Luma([255u8]));
        let img = with_disk(img, (100, 110), 22);

        let record = process(img);
        assert_eq!(record.shapes.len(), 1);
        assert_eq!(record.shapes[0].group_id, Some(2));
    }

    #[test]
    fn test_color_mask_matches_gray_mask() {
        let gray = with_disk(blank(), (80, 80), 25);
        let mut rgb = RgbImage::new(160, 160);
        for (x, y, pixel) in gray.enumerate_pixels() {
            rgb.put_pixel(x, y, Rgb([pixel[0]; 3]));
        }

        let pipeline = Pipeline::default();
        let from_gray = pipeline.process(&DynamicImage::ImageLuma8(gray), "m.png").unwrap();
        let from_rgb = pipeline.process(&DynamicImage::ImageRgb8(rgb), "m.png").unwrap();
        assert_eq!(from_gray, from_rgb);
    }

    #[test]
    fn test_faint_color_blobs_are_kept() {
        let pipeline = Pipeline::default();
        for color in [Rgb([0u8, 0, 20]), Rgb([7, 0, 0])] {
            let mut rgb = RgbImage::new(160, 160);
            draw_filled_circle_mut(&mut rgb, (80, 80), 25, color);

            let record = pipeline.process(&DynamicImage::ImageRgb8(rgb), "m.png").unwrap();
            assert_eq!(record.shapes.len(), 1, "blob of {color:?} was lost");
            assert_eq!(record.shapes[0].group_id, Some(1));
        }
    }

    #[test]
    fn test_intensity_one_is_background() {
        let mut img = blank();
        draw_filled_circle_mut(&mut img, (80, 80), 25, Luma([1u8]));
        assert!(process(img).shapes.is_empty());
    }

    #[test]
    fn test_processing_is_deterministic() {
        let img = with_disk(with_disk(blank(), (40, 40), 20), (110, 110), 20);
        let first = process(img.clone()).to_labelme_string().unwrap();
        let second = process(img).to_labelme_string().unwrap();
        assert_eq!(first, second);
    }
}
