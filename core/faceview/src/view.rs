use image::{DynamicImage, RgbImage};
use log::debug;

use crate::annotate::draw_frame;
use crate::face::Face;
use crate::{EYE_OPEN_THRESHOLD, Style};

/// Widget-style component that displays an image with face-annotation
/// overlays, driven by a host toolkit's redraw cycle.
///
/// The data producer pushes new content with [`FaceView::set_content`]; the
/// host polls [`FaceView::needs_redraw`] on its next cycle and hands the view
/// a canvas to [`FaceView::draw`] into. Drawing scales the image uniformly
/// into the canvas (anchored top-left) and paints a bounding box and landmark
/// markers for every face. While either the image or the faces are absent the
/// view draws nothing.
///
/// Single-threaded and synchronous: there is no state here beyond the content
/// fields set by the caller and read during draw.
pub struct FaceView {
    bitmap: Option<DynamicImage>,
    faces: Option<Vec<Face>>,
    style: Style,
    eye_open_threshold: f32,
    needs_redraw: bool,
}

impl FaceView {
    /// Create an empty view with the default style.
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    /// Create an empty view with a custom annotation style.
    pub fn with_style(style: Style) -> Self {
        Self {
            bitmap: None,
            faces: None,
            style,
            eye_open_threshold: EYE_OPEN_THRESHOLD,
            needs_redraw: false,
        }
    }

    /// Set the probability at or above which an eye renders as open
    /// (default: [`EYE_OPEN_THRESHOLD`]).
    pub fn set_eye_open_threshold(&mut self, threshold: f32) {
        self.eye_open_threshold = threshold;
        self.needs_redraw = true;
    }

    /// Set the bitmap background and the associated face detections, and
    /// request a redraw.
    pub fn set_content(&mut self, bitmap: DynamicImage, faces: Vec<Face>) {
        debug!(
            "content set: {}x{} image, {} face(s)",
            bitmap.width(),
            bitmap.height(),
            faces.len()
        );
        self.bitmap = Some(bitmap);
        self.faces = Some(faces);
        self.needs_redraw = true;
    }

    /// Whether content changed since the last [`FaceView::draw`].
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Draw the bitmap background and the associated face annotations into
    /// `canvas`, then clear the redraw request.
    ///
    /// When the bitmap or the faces have not been set the canvas is left
    /// untouched. Canvas pixels outside the scaled image rectangle are never
    /// written either way.
    pub fn draw(&mut self, canvas: &mut RgbImage) {
        if let (Some(bitmap), Some(faces)) = (&self.bitmap, &self.faces) {
            draw_frame(canvas, bitmap, faces, &self.style, self.eye_open_threshold);
        }
        self.needs_redraw = false;
    }
}

impl Default for FaceView {
    fn default() -> Self {
        Self::new()
    }
}
