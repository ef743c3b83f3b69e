//! Encoding cache: face embeddings for every enrolled student with a
//! usable reference photo.
//!
//! The cache is rebuilt wholesale: reference photos can be re-uploaded
//! at any time, so a rebuild recomputes every embedding rather than
//! patching entries in place. Rebuild work runs without the lock; only
//! the final swap and snapshot copies take it.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::decode;
use crate::engine::FaceEngine;
use crate::store::{EnrollmentStore, StoreError};
use crate::types::CacheEntry;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache refresh failed: {0}")]
    Store(#[from] StoreError),
}

/// Cache of (identifier, embedding) pairs, safe under concurrent
/// refresh and matching.
pub struct EncodingCache {
    store: Arc<dyn EnrollmentStore>,
    engine: Arc<dyn FaceEngine>,
    entries: RwLock<Vec<CacheEntry>>,
}

impl EncodingCache {
    pub fn new(store: Arc<dyn EnrollmentStore>, engine: Arc<dyn FaceEngine>) -> Self {
        Self {
            store,
            engine,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild the cache from the enrollment store.
    ///
    /// When `force` is false and entries are already present, returns the
    /// current count without touching the store. Otherwise every enrolled
    /// record is re-read and re-embedded, and the entries are replaced in
    /// one swap. Records whose photo is missing, undecodable, faceless,
    /// or fails to embed are skipped with a warning, never fatal.
    ///
    /// On a store failure the previous entries are kept as-is, so stale
    /// matching can continue while the store is down.
    pub fn refresh(&self, force: bool) -> Result<usize, CacheError> {
        if !force {
            let entries = self.entries.read().expect("cache lock poisoned");
            if !entries.is_empty() {
                return Ok(entries.len());
            }
        }

        let records = self.store.list_enrolled()?;
        tracing::debug!(records = records.len(), "rebuilding encoding cache");

        let mut rebuilt: Vec<CacheEntry> = Vec::new();

        for record in &records {
            let Some(photo) = record.reference_photo.as_deref() else {
                continue;
            };

            let image = match decode::decode_rgb(photo) {
                Ok(image) => image,
                Err(err) => {
                    tracing::warn!(
                        identifier = %record.identifier,
                        error = %err,
                        "reference photo not decodable, skipping"
                    );
                    continue;
                }
            };

            let regions = self.engine.detect_faces(&image);
            if regions.is_empty() {
                tracing::warn!(
                    identifier = %record.identifier,
                    "no face found in reference photo, skipping"
                );
                continue;
            }
            if regions.len() > 1 {
                tracing::debug!(
                    identifier = %record.identifier,
                    faces = regions.len(),
                    "reference photo has multiple faces, using the first"
                );
            }

            match self.engine.embed(&image, &regions[..1]).pop() {
                Some(Ok(embedding)) => rebuilt.push(CacheEntry {
                    identifier: record.identifier.clone(),
                    embedding,
                }),
                Some(Err(err)) => {
                    tracing::warn!(
                        identifier = %record.identifier,
                        error = %err,
                        "reference embedding failed, skipping"
                    );
                }
                None => {
                    tracing::warn!(
                        identifier = %record.identifier,
                        "backend returned no embedding for reference face, skipping"
                    );
                }
            }
        }

        let count = rebuilt.len();
        *self.entries.write().expect("cache lock poisoned") = rebuilt;
        tracing::info!(entries = count, "encoding cache rebuilt");

        Ok(count)
    }

    /// Owned copy of the current entries for one matching pass.
    ///
    /// A refresh triggered concurrently by another caller swaps the
    /// shared vector but cannot mutate a snapshot already taken.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        self.entries.read().expect("cache lock poisoned").clone()
    }
}
