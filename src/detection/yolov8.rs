use crate::annotations::candidate::Candidate;
use crate::detection::detector::Detector;
use crate::detection::error::DetectError;
use crate::detection::postprocess::non_maximum_suppression;
use crate::image_utils::letterbox::letterbox_to_array;
use image::RgbImage;
use itertools::Itertools;
use ndarray::Axis;
use ort::{inputs, session::Session, session::SessionOutputs};
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything needed to bind a YOLOv8 bin model to an inference session.
///
/// The defaults match how the pretrained bin model was exported: 640x640 input,
/// and the thresholds its training tooling applies during prediction.
#[derive(Clone, Debug)]
pub struct Yolov8Config {
    pub model_path: PathBuf,
    pub input_width: u32,
    pub input_height: u32,
    pub confidence_threshold: f32,
    pub nms_iou_threshold: f32,
    pub model_name: String,
}

impl Yolov8Config {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Yolov8Config {
            model_path: model_path.into(),
            input_width: 640,
            input_height: 640,
            confidence_threshold: 0.25,
            nms_iou_threshold: 0.45,
            model_name: "smartbin yolov8".to_string(),
        }
    }
}

/// A YOLOv8 detection model running on an onnxruntime inference session.
///
/// This is just a wrapper around an ONNX inference session that handles running
/// the model on hardware, plus the pre/postprocessing the exported model
/// expects: letterboxed NCHW input, and an `output0` tensor of shape
/// (1, 4 + classes, anchors) holding center-format boxes and class scores.
pub struct Yolov8BinModel {
    session: Session,
    config: Yolov8Config,
}

impl Yolov8BinModel {
    pub fn load(config: &Yolov8Config) -> Result<Self, DetectError> {
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(&config.model_path))
            .map_err(DetectError::ModelLoad)?;
        info!(
            model = %config.model_name,
            path = %config.model_path.display(),
            "loaded detection model"
        );
        Ok(Yolov8BinModel {
            session,
            config: config.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

impl Detector for Yolov8BinModel {
    fn infer(&self, image: &RgbImage) -> Result<Vec<Candidate>, DetectError> {
        let (input, letterbox) =
            letterbox_to_array(image, self.config.input_width, self.config.input_height);
        let outputs: SessionOutputs = self
            .session
            .run(inputs!["images" => input.view()].map_err(DetectError::Inference)?)
            .map_err(DetectError::Inference)?;
        let output = outputs["output0"]
            .try_extract_tensor::<f32>()
            .map_err(DetectError::Inference)?;
        let output = output.t();

        let mut candidates: Vec<Candidate> = Vec::new();
        for row in output.axis_iter(Axis(0)) {
            let row: Vec<f32> = row.iter().copied().collect();
            if row.len() < 5 {
                return Err(DetectError::BadOutput(format!(
                    "expected at least 5 values per anchor, got {}",
                    row.len()
                )));
            }
            let class_id = row
                .iter()
                .skip(4) // skips bounding box coords.
                .copied()
                .position_max_by(|a, b| a.total_cmp(b))
                .expect("row has at least one class score");
            let score = row[4 + class_id];
            if score < self.config.confidence_threshold {
                continue;
            }
            let x = row[0];
            let y = row[1];
            let w = row[2];
            let h = row[3];
            let (x1, y1) = letterbox.to_original(x - (w / 2.0), y - (h / 2.0));
            let (x2, y2) = letterbox.to_original(x + (w / 2.0), y + (h / 2.0));
            candidates.push(Candidate {
                x1,
                y1,
                x2,
                y2,
                class_id,
                score,
            });
        }
        debug!(
            model = %self.config.model_name,
            raw = candidates.len(),
            "candidates above confidence threshold"
        );
        Ok(non_maximum_suppression(
            candidates,
            self.config.nms_iou_threshold,
        ))
    }
}
