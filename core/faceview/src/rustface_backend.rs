use std::path::Path;

use crate::detector::FaceDetector;
use crate::error::FaceViewError;
use crate::face::{Face, Point};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// Loads a SeetaFace model from disk on construction. The backend reports
/// bounding boxes with detection-order ids only: no landmarks and no
/// eye-open probabilities.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace frontal-face model from the given path.
    pub fn from_model_path<P: AsRef<Path>>(path: P) -> Result<Self, FaceViewError> {
        let data =
            std::fs::read(path.as_ref()).map_err(|e| FaceViewError::ModelError(e.to_string()))?;
        let model = rustface::read_model(std::io::Cursor::new(data))
            .map_err(|e| FaceViewError::ModelError(e.to_string()))?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Face> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .enumerate()
            .map(|(i, info)| {
                let bbox = info.bbox();
                Face::new(
                    i as i32,
                    Point::new(bbox.x() as f32, bbox.y() as f32),
                    bbox.width() as f32,
                    bbox.height() as f32,
                )
            })
            .collect()
    }
}
