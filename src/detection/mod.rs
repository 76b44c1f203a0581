pub mod adapter;
pub mod detector;
pub mod error;
pub mod model_cache;
pub mod postprocess;
pub mod yolov8;

pub use adapter::{BinDetection, BinDetector, BinLabel, DetectionResult};
pub use detector::Detector;
pub use error::DetectError;
pub use yolov8::{Yolov8BinModel, Yolov8Config};
