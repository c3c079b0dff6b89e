//! Detection result data types.
//!
//! These values are produced by an external detection collaborator (see
//! [`crate::detector::FaceDetector`]) and are read-only to the renderer.

/// A 2D position in image coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point from its coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Facial feature types reported by detection backends.
///
/// Eye landmarks are defined as the midpoint between the detected eye corner
/// positions, which tends to place them at the lower eyelid rather than at
/// the pupil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkKind {
    /// Center of the bottom lip.
    BottomMouth,
    /// Midpoint between the subject's left mouth corner and the left ear tip.
    LeftCheek,
    /// Midpoint of the subject's left ear tip and ear lobe.
    LeftEar,
    /// Tip of the subject's left ear.
    LeftEarTip,
    /// Subject's left eye.
    LeftEye,
    /// Subject's left mouth corner.
    LeftMouth,
    /// Base of the nose.
    NoseBase,
    /// Midpoint between the subject's right mouth corner and the right ear tip.
    RightCheek,
    /// Midpoint of the subject's right ear tip and ear lobe.
    RightEar,
    /// Tip of the subject's right ear.
    RightEarTip,
    /// Subject's right eye.
    RightEye,
    /// Subject's right mouth corner.
    RightMouth,
}

impl LandmarkKind {
    /// Whether this is one of the two eye landmarks, which render with
    /// open/closed state instead of a plain marker.
    pub fn is_eye(self) -> bool {
        matches!(self, LandmarkKind::LeftEye | LandmarkKind::RightEye)
    }
}

/// A detected facial feature point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Feature type.
    pub kind: LandmarkKind,
    /// Position in image coordinates.
    pub position: Point,
}

/// A detected face within an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Tracking key assigned by the detector.
    pub id: i32,
    /// Top-left corner of the bounding box (image coordinates).
    pub position: Point,
    /// Width of the bounding box (pixels).
    pub width: f32,
    /// Height of the bounding box (pixels).
    pub height: f32,
    /// Probability that the subject's left eye is open, in [0, 1].
    /// `None` when the detector did not compute it; an uncomputed eye
    /// renders as closed.
    pub left_eye_open: Option<f32>,
    /// Probability that the subject's right eye is open, in [0, 1].
    /// Same `None` semantics as `left_eye_open`.
    pub right_eye_open: Option<f32>,
    /// Detected landmarks, in the order the detector reported them.
    pub landmarks: Vec<Landmark>,
}

impl Face {
    /// Create a face with the given bounding box, no landmarks, and
    /// uncomputed eye probabilities.
    pub fn new(id: i32, position: Point, width: f32, height: f32) -> Self {
        Self {
            id,
            position,
            width,
            height,
            left_eye_open: None,
            right_eye_open: None,
            landmarks: Vec::new(),
        }
    }

    /// Open probability for the given eye landmark kind.
    ///
    /// Returns `None` for non-eye kinds and for eyes whose probability was
    /// not computed.
    pub fn eye_open(&self, kind: LandmarkKind) -> Option<f32> {
        match kind {
            LandmarkKind::LeftEye => self.left_eye_open,
            LandmarkKind::RightEye => self.right_eye_open,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_kinds_are_eyes() {
        assert!(LandmarkKind::LeftEye.is_eye());
        assert!(LandmarkKind::RightEye.is_eye());
        assert!(!LandmarkKind::NoseBase.is_eye());
        assert!(!LandmarkKind::LeftCheek.is_eye());
    }

    #[test]
    fn eye_open_selects_matching_side() {
        let mut face = Face::new(0, Point::new(10.0, 20.0), 100.0, 100.0);
        face.left_eye_open = Some(0.9);

        assert_eq!(face.eye_open(LandmarkKind::LeftEye), Some(0.9));
        assert_eq!(face.eye_open(LandmarkKind::RightEye), None);
        assert_eq!(face.eye_open(LandmarkKind::NoseBase), None);
    }

    #[test]
    fn new_face_has_no_landmarks() {
        let face = Face::new(3, Point::new(0.0, 0.0), 50.0, 60.0);
        assert!(face.landmarks.is_empty());
        assert_eq!(face.id, 3);
        assert_eq!(face.left_eye_open, None);
        assert_eq!(face.right_eye_open, None);
    }
}
