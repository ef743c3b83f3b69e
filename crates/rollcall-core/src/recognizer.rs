//! Group-photo recognition against the encoding cache.
//!
//! One pass: decode the photo, force-refresh the cache, detect and embed
//! every face, match each embedding to its nearest cached entry, and
//! return the deduplicated identifiers plus the unmatched-face count.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::EncodingCache;
use crate::decode::{self, DecodeError};
use crate::engine::FaceEngine;
use crate::types::{MatchOutcome, Matcher, NearestMatcher};

/// Default maximum embedding distance for a positive match.
pub const DEFAULT_TOLERANCE: f32 = 0.50;

#[derive(Error, Debug)]
pub enum RecognizeError {
    /// The query photo could not be decoded. The one hard failure a
    /// caller must handle (e.g., a corrupted upload).
    #[error("unsupported image: {0}")]
    UnsupportedImage(#[from] DecodeError),
}

/// Outcome of one recognition pass over a group photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionOutcome {
    /// Identifiers judged present, in first-match order, duplicate-free.
    pub present: Vec<String>,
    /// Detected faces that matched no cached entry within tolerance.
    pub unknown_count: usize,
}

/// Turns one query photo into the set of recognized identifiers.
pub struct Recognizer {
    cache: Arc<EncodingCache>,
    engine: Arc<dyn FaceEngine>,
}

impl Recognizer {
    pub fn new(cache: Arc<EncodingCache>, engine: Arc<dyn FaceEngine>) -> Self {
        Self { cache, engine }
    }

    /// Recognize enrolled students in a group photo.
    ///
    /// The cache is force-refreshed first: attendance is marked against
    /// the latest reference photos, never a stale set. A store failure
    /// during that refresh downgrades to the previous cache contents
    /// rather than failing the pass. An empty cache is a valid degenerate
    /// state in which every detected face comes back unknown.
    pub fn recognize(
        &self,
        photo_bytes: &[u8],
        tolerance: f32,
    ) -> Result<RecognitionOutcome, RecognizeError> {
        let image = decode::decode_rgb(photo_bytes)?;

        if let Err(err) = self.cache.refresh(true) {
            tracing::warn!(
                error = %err,
                "cache refresh failed, matching against previous entries"
            );
        }

        let regions = self.engine.detect_faces(&image);
        tracing::debug!(faces = regions.len(), "faces detected in group photo");

        let gallery = self.cache.snapshot();
        if gallery.is_empty() {
            tracing::warn!("encoding cache is empty, no students can be recognized");
            return Ok(RecognitionOutcome {
                present: Vec::new(),
                unknown_count: regions.len(),
            });
        }

        let matcher = NearestMatcher;
        let mut present: Vec<String> = Vec::new();
        let mut unknown_count = 0usize;

        for (i, result) in self.engine.embed(&image, &regions).into_iter().enumerate() {
            let query = match result {
                Ok(embedding) => embedding,
                Err(err) => {
                    tracing::warn!(
                        region = i,
                        error = %err,
                        "embedding failed, counting face as unknown"
                    );
                    unknown_count += 1;
                    continue;
                }
            };

            match matcher.best_match(&query, &gallery, tolerance) {
                MatchOutcome {
                    matched: true,
                    identifier: Some(identifier),
                    distance,
                } => {
                    tracing::debug!(%identifier, distance, "face matched");
                    // One student may show up as several detections; an
                    // attendance mark counts once.
                    if !present.contains(&identifier) {
                        present.push(identifier);
                    }
                }
                MatchOutcome { distance, .. } => {
                    tracing::debug!(distance, "face matched nothing within tolerance");
                    unknown_count += 1;
                }
            }
        }

        Ok(RecognitionOutcome {
            present,
            unknown_count,
        })
    }
}
