use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageEncoder, imageops};

use crate::error::OcrError;

/// Grayscale, inverse binary threshold, then a light Gaussian blur.
/// Pixels brighter than `threshold` turn black, the rest white.
pub fn preprocess(image: &DynamicImage, threshold: u8, blur_sigma: f32) -> GrayImage {
    let mut gray = image.to_luma8();
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 0 } else { 255 };
    }

    if blur_sigma > 0.0 {
        imageops::blur(&gray, blur_sigma)
    } else {
        gray
    }
}

pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::L8,
    )?;
    Ok(buffer)
}
