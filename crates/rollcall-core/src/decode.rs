//! Photo decoding to the canonical pixel form.

use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Decode raw photo bytes into a 3-channel 8-bit RGB image.
///
/// Source format and channel layout are normalised away: grayscale and
/// RGBA inputs come back as plain RGB, which is what the detection
/// backend expects.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgb8())
}
