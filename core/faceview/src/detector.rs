use crate::face::Face;

/// Pluggable face detection backend.
///
/// Implement this trait to feed detection results from any engine (ONNX,
/// dlib, a platform vision API) into [`crate::FaceAnnotator::face_detector`].
/// Backends fill in as much of [`Face`] as they support; landmarks and
/// eye-open probabilities may be absent.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Face>;
}
