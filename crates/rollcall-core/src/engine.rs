//! Face detection and embedding backend interface.
//!
//! The engine does not ship a detector or embedder of its own; an ONNX
//! model pair, a dlib binding, or a remote service plugs in here.

use crate::types::{Embedding, FaceRegion};
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("embedding extraction failed: {0}")]
pub struct EmbedError(pub String);

/// Detection and embedding capability consumed by the cache and recognizer.
pub trait FaceEngine: Send + Sync {
    /// Detect face regions in an RGB image.
    ///
    /// Region order is preserved downstream; the first region is the one
    /// cached for reference photos.
    fn detect_faces(&self, image: &RgbImage) -> Vec<FaceRegion>;

    /// Compute one embedding per region, in region order.
    ///
    /// A failed region yields an `Err` in its slot rather than aborting
    /// the batch; callers skip or count it as unknown.
    fn embed(&self, image: &RgbImage, regions: &[FaceRegion])
        -> Vec<Result<Embedding, EmbedError>>;
}
