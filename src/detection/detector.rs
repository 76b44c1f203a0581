use crate::annotations::candidate::Candidate;
use crate::detection::error::DetectError;
use image::RgbImage;

/// Defines a trait that all detection backends must follow.
///
/// A backend takes one decoded image and returns every candidate detection it
/// found, with boxes already mapped into pixel coordinates of that image. The
/// order of the returned candidates is the backend's native order; callers are
/// allowed to rely on it (the bundled YOLO backend returns candidates sorted by
/// descending confidence after non-maximum suppression, which is what the
/// pretrained model's own tooling does).
///
/// This seam is what keeps the bin adapter and its tests independent of the
/// concrete inference library.
pub trait Detector {
    fn infer(&self, image: &RgbImage) -> Result<Vec<Candidate>, DetectError>;
}
