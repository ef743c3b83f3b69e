use serde::{Deserialize, Serialize};

/// Region of a detected face within a photo, in pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

/// Face embedding vector produced by the recognition backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    /// Compute Euclidean distance between two embeddings.
    ///
    /// Lower = more similar. Attendance matching classifies on this
    /// distance against a tolerance.
    pub fn euclidean_distance(&self, other: &Embedding) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

/// A cached (identifier, embedding) pair for one enrolled student.
///
/// Cache order is enrollment order and breaks exact distance ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub identifier: String,
    pub embedding: Embedding,
}

/// Result of matching one query embedding against the cache.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matched: bool,
    /// Euclidean distance of the nearest cached entry (0.0 when the cache
    /// was empty).
    pub distance: f32,
    /// Identifier of the matched entry (if any).
    pub identifier: Option<String>,
}

/// Strategy for matching a query embedding against the cached gallery.
pub trait Matcher {
    fn best_match(&self, query: &Embedding, cache: &[CacheEntry], tolerance: f32) -> MatchOutcome;
}

/// Nearest-neighbour matcher over Euclidean distance.
///
/// Scans the full cache, classifies as matched iff the minimum distance is
/// within tolerance (boundary inclusive). Equidistant candidates resolve
/// to the earliest cache entry.
pub struct NearestMatcher;

impl Matcher for NearestMatcher {
    fn best_match(&self, query: &Embedding, cache: &[CacheEntry], tolerance: f32) -> MatchOutcome {
        let mut best_dist = f32::INFINITY;
        let mut best_idx: Option<usize> = None;

        for (i, entry) in cache.iter().enumerate() {
            let dist = query.euclidean_distance(&entry.embedding);
            // Strict comparison: the first entry at the minimum wins.
            if dist < best_dist {
                best_dist = dist;
                best_idx = Some(i);
            }
        }

        match best_idx {
            Some(idx) if best_dist <= tolerance => MatchOutcome {
                matched: true,
                distance: best_dist,
                identifier: Some(cache[idx].identifier.clone()),
            },
            _ => MatchOutcome {
                matched: false,
                distance: if best_dist.is_finite() { best_dist } else { 0.0 },
                identifier: None,
            },
        }
    }
}
