//! Full/empty waste bin detection on top of a pretrained YOLOv8 ONNX model.
//!
//! The crate centers on one boundary: [`detection::BinDetector::detect`] takes
//! a decoded image and returns a [`detection::DetectionResult`] with every
//! possible outcome (detected, nothing found, backend failure) represented as
//! data. The ONNX backend, image plumbing, and box rendering around it exist to
//! feed and consume that boundary.

pub mod annotations;
pub mod detection;
pub mod image_utils;
pub mod rendering;
