use anyhow::{Context, Result, bail};
use clap::Parser;
use smartbin::detection::{BinDetector, DetectionResult, Yolov8Config};
use smartbin::image_utils::image_io::read_image_as_rgb8;
use smartbin::rendering::draw::draw_detection_box;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Classify photographed waste bins as full or empty.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image file, or a directory of images to process in one run
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path to the pretrained bin detection model (ONNX)
    #[arg(long, value_name = "FILE", default_value = "model/smartbin_yolov8.onnx")]
    model: PathBuf,

    /// Directory to write annotated copies of images with a detection
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Confidence threshold (0.0 - 1.0)
    #[arg(long, default_value_t = 0.25, value_name = "THRESHOLD")]
    confidence: f32,

    /// NMS IoU threshold (0.0 - 1.0)
    #[arg(long, default_value_t = 0.45, value_name = "THRESHOLD")]
    nms_threshold: f32,

    /// Load the model fresh for every image instead of caching it
    #[arg(long)]
    reload_per_call: bool,

    /// Emit one JSON object per image instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
    let args = Args::parse();

    let mut config = Yolov8Config::new(&args.model);
    config.confidence_threshold = args.confidence;
    config.nms_iou_threshold = args.nms_threshold;
    let detector = if args.reload_per_call {
        BinDetector::reload_per_call(config)
    } else {
        BinDetector::cached(config)
    };

    let images = collect_images(&args.input)?;
    if images.is_empty() {
        bail!("no images found under {:?}", args.input);
    }
    info!(count = images.len(), "processing images");

    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("cannot create output directory {:?}", output_dir))?;
    }

    for image_path in &images {
        let image = read_image_as_rgb8(image_path)
            .with_context(|| format!("cannot read image {:?}", image_path))?;
        let result = detector.detect(&image);
        report(image_path, &result, args.json)?;
        if let (Some(output_dir), Some(detection)) = (&args.output_dir, result.detection()) {
            let mut annotated = image;
            draw_detection_box(&mut annotated, &detection.bounding_box);
            let file_name = image_path
                .file_name()
                .context("input path has no file name")?;
            let out_path = output_dir.join(file_name);
            annotated
                .save(&out_path)
                .with_context(|| format!("cannot save annotated image {:?}", out_path))?;
            info!(path = %out_path.display(), "wrote annotated image");
        }
    }
    Ok(())
}

fn collect_images(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut images: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("jpg" | "jpeg" | "png")
            )
        })
        .collect();
    images.sort();
    Ok(images)
}

fn report(image_path: &Path, result: &DetectionResult, json: bool) -> Result<()> {
    if json {
        let mut value = serde_json::to_value(result)?;
        value["image"] = serde_json::Value::String(image_path.display().to_string());
        println!("{}", serde_json::to_string(&value)?);
        return Ok(());
    }
    match result {
        DetectionResult::Detected(detection) => println!(
            "{}: bin is {} ({:.1}% confidence) at {}",
            image_path.display(),
            detection.label,
            detection.confidence * 100.0,
            detection.bounding_box,
        ),
        DetectionResult::None => println!(
            "{}: no bin detected, try a clearer photo",
            image_path.display()
        ),
        DetectionResult::Error => println!(
            "{}: detection failed, the image was left unprocessed",
            image_path.display()
        ),
    }
    Ok(())
}
