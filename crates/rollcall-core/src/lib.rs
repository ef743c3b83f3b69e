//! rollcall-core — face-matching attendance engine.
//!
//! Keeps a cache of face embeddings for every enrolled student with a
//! usable reference photo, and recognizes which of them appear in a group
//! photo. The surrounding application supplies the roster and the
//! detection/embedding backend through traits and turns the recognition
//! outcome into attendance marks.

pub mod cache;
pub mod decode;
pub mod engine;
pub mod recognizer;
pub mod roster;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use cache::{CacheError, EncodingCache};
pub use engine::{EmbedError, FaceEngine};
pub use recognizer::{RecognitionOutcome, RecognizeError, Recognizer, DEFAULT_TOLERANCE};
pub use roster::{reconcile, AttendanceMark, AttendanceStatus};
pub use store::{EnrollmentRecord, EnrollmentStore, StoreError};
pub use types::{CacheEntry, Embedding, FaceRegion, MatchOutcome, Matcher, NearestMatcher};
