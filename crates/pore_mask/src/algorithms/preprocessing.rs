use image::{DynamicImage, GrayImage, Luma, Rgb};
use imageproc::distance_transform::Norm;
use crate::{error::Result, traits::ImagePreprocessor};

/// Highest intensity still counted as background
pub const FOREGROUND_THRESHOLD: u8 = 1;

/// Chebyshev radius of the opening element; radius 2 is a 5x5 square
pub const OPENING_RADIUS: u8 = 2;

/// Fixed-point BT.601 weights for R, G and B, scaled by `1 << 14`
const BT601_WEIGHTS: [u32; 3] = [4899, 9617, 1868];
const BT601_SHIFT: u32 = 14;

/// BT.601 luma of one pixel, rounded half up in 14-bit fixed point
pub fn bt601_luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let [wr, wg, wb] = BT601_WEIGHTS;
    let sum = r as u32 * wr + g as u32 * wg + b as u32 * wb + (1 << (BT601_SHIFT - 1));
    (sum >> BT601_SHIFT) as u8
}

/// Flatten any channel layout to single-channel intensity.
///
/// Grayscale inputs keep their intensity; colour inputs are weighted with
/// BT.601 coefficients. Alpha is ignored.
pub fn luminance(image: &DynamicImage) -> GrayImage {
    if !image.color().has_color() {
        return image.to_luma8();
    }
    imageproc::map::map_colors(&image.to_rgb8(), |pixel| Luma([bt601_luma(pixel)]))
}

/// Flatten any channel layout to luminance and binarize it.
///
/// Pixels brighter than [`FOREGROUND_THRESHOLD`] become 255, everything else 0.
pub fn binarize(image: &DynamicImage) -> GrayImage {
    imageproc::contrast::threshold(&luminance(image), FOREGROUND_THRESHOLD)
}

/// Morphological opening (erosion then dilation) with a square element.
///
/// Removes foreground specks that cannot hold the element and smooths
/// region boundaries without growing them.
#[derive(Debug, Clone)]
pub struct OpeningPreprocessor {
    pub radius: u8,
}

impl Default for OpeningPreprocessor {
    fn default() -> Self {
        Self { radius: OPENING_RADIUS }
    }
}

impl ImagePreprocessor for OpeningPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::morphology::open(image, Norm::LInf, self.radius))
    }
}
