//! Shared test fixtures: stub collaborators and in-memory photos.

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::Mutex;

use image::RgbImage;

use crate::engine::{EmbedError, FaceEngine};
use crate::store::{EnrollmentRecord, EnrollmentStore, StoreError};
use crate::types::{Embedding, FaceRegion};

/// Encode a solid-colour RGB image as PNG bytes.
///
/// The dimensions double as the photo's identity: `StubEngine` keys the
/// faces it "sees" on them.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, image::Rgb([90, 90, 90]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encode");
    bytes
}

pub fn embedding(values: &[f32]) -> Embedding {
    Embedding {
        values: values.to_vec(),
    }
}

pub fn record(identifier: &str, photo: Option<Vec<u8>>) -> EnrollmentRecord {
    EnrollmentRecord {
        identifier: identifier.into(),
        display_name: format!("Student {identifier}"),
        reference_photo: photo,
    }
}

/// Store serving a fixed roster.
pub struct StubStore {
    pub records: Vec<EnrollmentRecord>,
}

impl EnrollmentStore for StubStore {
    fn list_enrolled(&self) -> Result<Vec<EnrollmentRecord>, StoreError> {
        Ok(self.records.clone())
    }
}

/// Store that is always unreachable.
pub struct UnreachableStore;

impl EnrollmentStore for UnreachableStore {
    fn list_enrolled(&self) -> Result<Vec<EnrollmentRecord>, StoreError> {
        Err(StoreError::Unreachable("connection refused".into()))
    }
}

/// Store serving each queued roster once, then turning unreachable.
pub struct ScriptedStore {
    responses: Mutex<VecDeque<Vec<EnrollmentRecord>>>,
}

impl ScriptedStore {
    pub fn new(responses: Vec<Vec<EnrollmentRecord>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

impl EnrollmentStore for ScriptedStore {
    fn list_enrolled(&self) -> Result<Vec<EnrollmentRecord>, StoreError> {
        self.responses
            .lock()
            .expect("scripted store lock poisoned")
            .pop_front()
            .ok_or_else(|| StoreError::Unreachable("connection refused".into()))
    }
}

/// Engine stub keyed by image dimensions.
///
/// A photo of registered dimensions contains one face per configured
/// slot; an `Err` slot means detection succeeds but embedding fails for
/// that region. Unregistered dimensions contain no faces.
pub struct StubEngine {
    faces: HashMap<(u32, u32), Vec<Result<Embedding, String>>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            faces: HashMap::new(),
        }
    }

    pub fn with_faces(mut self, width: u32, height: u32, embeddings: Vec<Embedding>) -> Self {
        self.faces
            .insert((width, height), embeddings.into_iter().map(Ok).collect());
        self
    }

    pub fn with_results(
        mut self,
        width: u32,
        height: u32,
        results: Vec<Result<Embedding, String>>,
    ) -> Self {
        self.faces.insert((width, height), results);
        self
    }
}

impl FaceEngine for StubEngine {
    fn detect_faces(&self, image: &RgbImage) -> Vec<FaceRegion> {
        let count = self
            .faces
            .get(&image.dimensions())
            .map_or(0, |faces| faces.len());
        (0..count)
            .map(|i| FaceRegion {
                x: i as f32 * 10.0,
                y: 0.0,
                width: 8.0,
                height: 8.0,
                confidence: 0.9,
            })
            .collect()
    }

    fn embed(
        &self,
        image: &RgbImage,
        regions: &[FaceRegion],
    ) -> Vec<Result<Embedding, EmbedError>> {
        let Some(faces) = self.faces.get(&image.dimensions()) else {
            return Vec::new();
        };
        regions
            .iter()
            .enumerate()
            .map(|(i, _)| match faces.get(i) {
                Some(Ok(embedding)) => Ok(embedding.clone()),
                Some(Err(reason)) => Err(EmbedError(reason.clone())),
                None => Err(EmbedError(format!("no face slot for region {i}"))),
            })
            .collect()
    }
}
