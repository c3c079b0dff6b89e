//! Face-annotation rendering: paint a photo together with face-detection
//! results — bounding boxes and facial landmark markers — scaled from image
//! space into view space.
//!
//! # Example
//!
//! ```no_run
//! use faceview::{Face, FaceAnnotator, Landmark, LandmarkKind, Point};
//!
//! let raw_bytes = std::fs::read("photo.jpg").unwrap();
//! let mut face = Face::new(0, Point::new(120.0, 80.0), 260.0, 260.0);
//! face.left_eye_open = Some(0.93);
//! face.right_eye_open = Some(0.12);
//! face.landmarks.push(Landmark {
//!     kind: LandmarkKind::LeftEye,
//!     position: Point::new(190.0, 170.0),
//! });
//! let result = FaceAnnotator::new(raw_bytes)
//!     .unwrap()
//!     .faces(vec![face])
//!     .viewport(640, 480)
//!     .annotate()
//!     .unwrap();
//! println!("Annotated: {} bytes", result.data.len());
//! ```
#![warn(missing_docs)]

mod annotate;
/// Face detection traits.
pub mod detector;
mod error;
/// Detection result data types.
pub mod face;
#[cfg(feature = "face-detection")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;
mod scale;
mod view;

use image::Rgb;

/// Face detection trait seam.
pub use detector::FaceDetector;
/// Error type returned by faceview operations.
pub use error::FaceViewError;
/// Face, landmark, and position types.
pub use face::{Face, Landmark, LandmarkKind, Point};
#[cfg(feature = "face-detection")]
/// Built-in detector that loads a SeetaFace model from disk.
pub use rustface_backend::RustfaceDetector;
/// Uniform fit-scale geometry.
pub use scale::{fit_rect, fit_scale, FitRect};
/// Stateful view component driven by a host redraw cycle.
pub use view::FaceView;

/// Probability at or above which an eye is rendered as open.
pub const EYE_OPEN_THRESHOLD: f32 = 0.4;

/// Default stroke width for face bounding boxes (view pixels).
const BOX_STROKE: u32 = 5;

/// Default radius for non-eye landmark, closed-eye, and pupil markers
/// (view pixels).
const MARKER_RADIUS: i32 = 10;

/// Default radius for the iris disc of an open eye (view pixels).
const IRIS_RADIUS: i32 = 60;

/// Colors and metrics for the annotation overlay.
///
/// Radii and stroke widths are in view (canvas) pixels: markers keep their
/// size regardless of how far the image itself is scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Face bounding box color.
    pub face_box: Rgb<u8>,
    /// Marker color for non-eye landmarks.
    pub landmark: Rgb<u8>,
    /// Marker color for a closed eye.
    pub closed_eye: Rgb<u8>,
    /// Iris disc color for an open eye.
    pub iris: Rgb<u8>,
    /// Pupil color for an open eye.
    pub pupil: Rgb<u8>,
    /// Canvas background behind and beside the scaled image.
    pub background: Rgb<u8>,
    /// Stroke width of the face bounding box.
    pub box_stroke: u32,
    /// Radius of non-eye landmark and closed-eye markers.
    pub landmark_radius: i32,
    /// Radius of the iris disc of an open eye.
    pub iris_radius: i32,
    /// Radius of the pupil of an open eye.
    pub pupil_radius: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            face_box: Rgb([255, 0, 255]),
            landmark: Rgb([0, 255, 0]),
            closed_eye: Rgb([255, 0, 0]),
            iris: Rgb([255, 255, 255]),
            pupil: Rgb([0, 0, 0]),
            background: Rgb([0, 0, 0]),
            box_stroke: BOX_STROKE,
            landmark_radius: MARKER_RADIUS,
            iris_radius: IRIS_RADIUS,
            pupil_radius: MARKER_RADIUS,
        }
    }
}

/// Output image format.
#[derive(Debug, Clone, Default)]
pub enum OutputFormat {
    /// PNG encoding (lossless; flat overlay colors stay crisp).
    #[default]
    Png,

    /// JPEG encoding.
    Jpeg,
}

/// Result of a single annotation render.
#[derive(Debug, Clone)]
pub struct AnnotatedPhoto {
    /// The encoded image bytes.
    pub data: Vec<u8>,

    /// The output format used.
    pub format: OutputFormat,

    /// Width of the output canvas in pixels.
    pub width: u32,

    /// Height of the output canvas in pixels.
    pub height: u32,

    /// Uniform image→view scale factor that was applied.
    pub scale: f64,

    /// Number of faces drawn.
    pub faces_drawn: usize,

    /// Size of the original input in bytes.
    pub original_size: usize,
}

/// Builder for rendering annotated photos.
///
/// Validates the input image on construction, then applies the viewport,
/// style, and face data with configurable parameters. For a stateful
/// component driven by a host redraw cycle, see [`FaceView`].
pub struct FaceAnnotator {
    input: Vec<u8>,
    faces: Option<Vec<Face>>,
    viewport: Option<(u32, u32)>,
    eye_open_threshold: f32,
    style: Style,
    format: OutputFormat,
    quality: f32,
    /// Detection fallback used when no faces were supplied explicitly.
    detector: Option<Box<dyn FaceDetector>>,
}

impl FaceAnnotator {
    /// Create a new annotator from raw image bytes (JPEG, PNG, or WebP).
    pub fn new(input: Vec<u8>) -> Result<Self, FaceViewError> {
        // Validate that the input can be decoded
        annotate::detect_format(&input)?;

        Ok(Self {
            input,
            faces: None,
            viewport: None,
            eye_open_threshold: EYE_OPEN_THRESHOLD,
            style: Style::default(),
            format: OutputFormat::default(),
            quality: 0.9,
            detector: None,
        })
    }

    /// Set the detected faces to draw, in the order they should be painted.
    pub fn faces(mut self, faces: Vec<Face>) -> Self {
        self.faces = Some(faces);
        self
    }

    /// Set the canvas size in pixels (default: the image's own size).
    ///
    /// The image is scaled uniformly to fit this viewport and anchored at
    /// the top-left corner; the rest of the canvas holds the style's
    /// background color.
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some((width, height));
        self
    }

    /// Set the probability at or above which an eye renders as open
    /// (default: [`EYE_OPEN_THRESHOLD`]).
    pub fn eye_open_threshold(mut self, threshold: f32) -> Self {
        self.eye_open_threshold = threshold;
        self
    }

    /// Set the overlay colors and marker metrics (default: [`Style::default`]).
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the output format (default: `OutputFormat::Png`).
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the JPEG quality from 0.0 (lowest) to 1.0 (highest).
    /// Default: 0.9. Ignored for PNG output.
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Provide a face detector used when no faces were supplied explicitly.
    ///
    /// Faces passed to [`FaceAnnotator::faces`] always win; the detector runs
    /// on the decoded image only when that setter was never called.
    ///
    /// ```no_run
    /// use faceview::{Face, FaceAnnotator, FaceDetector};
    ///
    /// struct MyDetector;
    /// impl FaceDetector for MyDetector {
    ///     fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Face> {
    ///         // Your detection logic here
    ///         vec![]
    ///     }
    /// }
    ///
    /// let bytes = std::fs::read("photo.jpg").unwrap();
    /// let result = FaceAnnotator::new(bytes)
    ///     .unwrap()
    ///     .face_detector(Box::new(MyDetector))
    ///     .annotate()
    ///     .unwrap();
    /// ```
    pub fn face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Render the annotated photo with the configured settings.
    pub fn annotate(self) -> Result<AnnotatedPhoto, FaceViewError> {
        if self.quality < 0.0 || self.quality > 1.0 {
            return Err(FaceViewError::InvalidQuality(self.quality));
        }
        if self.eye_open_threshold < 0.0 || self.eye_open_threshold > 1.0 {
            return Err(FaceViewError::InvalidThreshold(self.eye_open_threshold));
        }

        annotate::annotate_pipeline(
            &self.input,
            self.faces.as_deref(),
            self.viewport,
            &self.style,
            self.eye_open_threshold,
            &self.format,
            self.quality,
            self.detector.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_png(width: u32, height: u32) -> Vec<u8> {
        use image::codecs::png::PngEncoder;
        use image::ImageEncoder;
        use image::RgbImage;

        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
            ]);
        }
        let mut buffer = Vec::new();
        let encoder = PngEncoder::new(&mut buffer);
        encoder
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buffer
    }

    fn sample_face() -> Face {
        let mut face = Face::new(0, Point::new(40.0, 30.0), 100.0, 120.0);
        face.left_eye_open = Some(0.9);
        face.right_eye_open = Some(0.1);
        face.landmarks.push(Landmark {
            kind: LandmarkKind::LeftEye,
            position: Point::new(70.0, 70.0),
        });
        face.landmarks.push(Landmark {
            kind: LandmarkKind::RightEye,
            position: Point::new(110.0, 70.0),
        });
        face.landmarks.push(Landmark {
            kind: LandmarkKind::NoseBase,
            position: Point::new(90.0, 100.0),
        });
        face
    }

    #[test]
    fn builder_defaults_produce_png() {
        let png = make_test_png(200, 300);
        let result = FaceAnnotator::new(png.clone())
            .unwrap()
            .faces(vec![sample_face()])
            .annotate()
            .unwrap();

        assert_eq!(&result.data[0..4], b"\x89PNG");
        // default viewport is the image's own size
        assert_eq!(result.width, 200);
        assert_eq!(result.height, 300);
        assert_eq!(result.scale, 1.0);
        assert_eq!(result.faces_drawn, 1);
        assert_eq!(result.original_size, png.len());
    }

    #[test]
    fn builder_with_jpeg_format() {
        let png = make_test_png(200, 300);
        let result = FaceAnnotator::new(png)
            .unwrap()
            .faces(vec![sample_face()])
            .format(OutputFormat::Jpeg)
            .annotate()
            .unwrap();

        assert_eq!(result.data[0], 0xFF);
        assert_eq!(result.data[1], 0xD8);
    }

    #[test]
    fn builder_with_viewport_scales_down() {
        let png = make_test_png(200, 300);
        let result = FaceAnnotator::new(png)
            .unwrap()
            .faces(vec![sample_face()])
            .viewport(100, 100)
            .annotate()
            .unwrap();

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 100);
        // min(100/200, 100/300)
        assert_eq!(result.scale, 100.0 / 300.0);
    }

    #[test]
    fn builder_with_viewport_scales_up() {
        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png)
            .unwrap()
            .faces(Vec::new())
            .viewport(400, 250)
            .annotate()
            .unwrap();

        assert_eq!(result.scale, 2.5);
    }

    #[test]
    fn builder_without_faces_draws_bitmap_only() {
        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png).unwrap().annotate().unwrap();

        assert_eq!(result.faces_drawn, 0);
        assert!(!result.data.is_empty());
    }

    #[test]
    fn builder_invalid_quality_high() {
        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png).unwrap().quality(1.5).annotate();
        assert!(matches!(result, Err(FaceViewError::InvalidQuality(_))));
    }

    #[test]
    fn builder_invalid_quality_low() {
        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png).unwrap().quality(-0.1).annotate();
        assert!(matches!(result, Err(FaceViewError::InvalidQuality(_))));
    }

    #[test]
    fn builder_invalid_threshold() {
        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png)
            .unwrap()
            .eye_open_threshold(1.2)
            .annotate();
        assert!(matches!(result, Err(FaceViewError::InvalidThreshold(_))));
    }

    #[test]
    fn builder_zero_viewport() {
        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png).unwrap().viewport(0, 100).annotate();
        assert!(matches!(result, Err(FaceViewError::ZeroViewport)));
    }

    #[test]
    fn builder_invalid_input() {
        let result = FaceAnnotator::new(b"not an image".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn explicit_faces_win_over_detector() {
        struct OneFace;
        impl FaceDetector for OneFace {
            fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<Face> {
                vec![
                    Face::new(0, Point::new(0.0, 0.0), 10.0, 10.0),
                    Face::new(1, Point::new(20.0, 20.0), 10.0, 10.0),
                ]
            }
        }

        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png)
            .unwrap()
            .faces(vec![sample_face()])
            .face_detector(Box::new(OneFace))
            .annotate()
            .unwrap();

        assert_eq!(result.faces_drawn, 1);
    }

    #[test]
    fn detector_runs_when_no_faces_supplied() {
        struct OneFace;
        impl FaceDetector for OneFace {
            fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Face> {
                assert_eq!(gray.len(), (width * height) as usize);
                vec![Face::new(0, Point::new(10.0, 10.0), 30.0, 30.0)]
            }
        }

        let png = make_test_png(100, 100);
        let result = FaceAnnotator::new(png)
            .unwrap()
            .face_detector(Box::new(OneFace))
            .annotate()
            .unwrap();

        assert_eq!(result.faces_drawn, 1);
    }
}
