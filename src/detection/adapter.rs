use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::candidate::Candidate;
use crate::detection::detector::Detector;
use crate::detection::model_cache::ModelCache;
use crate::detection::yolov8::{Yolov8BinModel, Yolov8Config};
use image::RgbImage;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// What state the detected bin is in.
///
/// The pretrained model was trained with exactly two classes, class id 0 being
/// a full bin. Any other class id maps to `Empty`. That collapse is a contract
/// fixed by how the model was trained, not something inferred at runtime; a
/// model retrained with more classes would silently fold every non-zero class
/// into `Empty`. Kept as-is for fidelity with the deployed model.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinLabel {
    Full,
    Empty,
}

impl BinLabel {
    pub fn from_class_id(class_id: usize) -> Self {
        if class_id == 0 {
            BinLabel::Full
        } else {
            BinLabel::Empty
        }
    }
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinLabel::Full => write!(f, "full"),
            BinLabel::Empty => write!(f, "empty"),
        }
    }
}

/// One surfaced detection: where the bin is, what state it is in, and how sure
/// the model was. The confidence is the detector's score, untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BinDetection {
    pub bounding_box: BoundingBox,
    pub label: BinLabel,
    pub confidence: f32,
}

/// The outcome of one detection call.
///
/// Every possible outcome is a variant here; `BinDetector::detect` never
/// returns an `Err` and never panics on backend failure. A box, label, and
/// confidence exist exactly when the outcome is `Detected`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionResult {
    /// The detector found a bin.
    Detected(BinDetection),
    /// The detector ran but found no candidate object. A valid terminal
    /// outcome, not an error; the caller should suggest a clearer photo.
    None,
    /// The detector could not be loaded or invoked.
    Error,
}

impl DetectionResult {
    pub fn detection(&self) -> Option<&BinDetection> {
        match self {
            DetectionResult::Detected(detection) => Some(detection),
            _ => None,
        }
    }

    pub fn confidence(&self) -> f32 {
        self.detection().map_or(0.0, |d| d.confidence)
    }
}

enum Backend {
    /// Load once, reuse for the lifetime of the adapter.
    Cached(ModelCache<Yolov8BinModel>),
    /// Load fresh inside every call and release it afterward. Slower, but no
    /// shared state and no staleness if the artifact changes between calls.
    ReloadPerCall(Yolov8Config),
    /// A caller-supplied backend, used by tests and alternative runtimes.
    Provided(Box<dyn Detector + Send + Sync>),
}

/// Converts one decoded image into one [`DetectionResult`].
///
/// This is the boundary between the UI glue and the detection backend: it picks
/// the single detection to surface, maps the raw class id to a [`BinLabel`],
/// and converts any load or inference failure into `DetectionResult::Error`.
/// Nothing above this boundary needs to catch a fault from calling
/// [`BinDetector::detect`]. No retries happen here; a failed attempt yields one
/// `Error` result and retry policy belongs to the caller.
pub struct BinDetector {
    backend: Backend,
}

impl BinDetector {
    /// An adapter that loads the model lazily on first use and caches it for
    /// its own lifetime.
    pub fn cached(config: Yolov8Config) -> Self {
        let load_config = config.clone();
        BinDetector {
            backend: Backend::Cached(ModelCache::new(move || Yolov8BinModel::load(&load_config))),
        }
    }

    /// An adapter that pays the model deserialization cost on every call.
    pub fn reload_per_call(config: Yolov8Config) -> Self {
        BinDetector {
            backend: Backend::ReloadPerCall(config),
        }
    }

    /// An adapter over any [`Detector`] implementation.
    pub fn from_detector(detector: impl Detector + Send + Sync + 'static) -> Self {
        BinDetector {
            backend: Backend::Provided(Box::new(detector)),
        }
    }

    /// Drops a cached model so the next call reloads the artifact from disk.
    /// No-op for the other strategies.
    pub fn reset(&self) {
        if let Backend::Cached(cache) = &self.backend {
            cache.reset();
        }
    }

    /// Runs detection on one decoded image.
    ///
    /// Blocks the calling thread for the duration of the model load (unless
    /// already cached) plus one forward pass; there is no cancellation. If the
    /// backend reports several candidates, the first in its native order wins:
    /// the backend's output is already confidence-sorted by its own NMS and
    /// only one object of interest is expected per image, so no re-ranking
    /// happens here.
    pub fn detect(&self, image: &RgbImage) -> DetectionResult {
        let candidates = match &self.backend {
            Backend::Cached(cache) => cache
                .get_or_load()
                .and_then(|model| model.infer(image)),
            Backend::ReloadPerCall(config) => {
                Yolov8BinModel::load(config).and_then(|model| model.infer(image))
            }
            Backend::Provided(detector) => detector.infer(image),
        };
        let candidates = match candidates {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "detection failed");
                return DetectionResult::Error;
            }
        };
        let Some(candidate) = candidates.into_iter().next() else {
            return DetectionResult::None;
        };
        Self::surface(candidate)
    }

    fn surface(candidate: Candidate) -> DetectionResult {
        match BoundingBox::from_corners(candidate.x1, candidate.y1, candidate.x2, candidate.y2) {
            Ok(bounding_box) => DetectionResult::Detected(BinDetection {
                bounding_box,
                label: BinLabel::from_class_id(candidate.class_id),
                confidence: candidate.score,
            }),
            Err(err) => {
                warn!(error = %err, "detector produced an unusable box");
                DetectionResult::Error
            }
        }
    }
}
