use crate::face::Point;

/// Destination rectangle of an image scaled uniformly into a canvas,
/// anchored at the canvas top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    /// Width of the scaled image (pixels).
    pub width: u32,
    /// Height of the scaled image (pixels).
    pub height: u32,
    /// The uniform scale factor that was applied.
    pub scale: f64,
}

/// Calculate the uniform scale factor that fits an image inside a canvas
/// while preserving its aspect ratio: `min(view_w / image_w, view_h / image_h)`.
///
/// The factor exceeds 1.0 when the canvas is larger than the image in both
/// dimensions (upscaling is allowed).
pub fn fit_scale(view_width: u32, view_height: u32, image_width: u32, image_height: u32) -> f64 {
    let sx = view_width as f64 / image_width as f64;
    let sy = view_height as f64 / image_height as f64;
    sx.min(sy)
}

/// Calculate the top-left-anchored destination rectangle for an image scaled
/// uniformly into a canvas.
///
/// Dimensions truncate toward zero, so the rectangle never exceeds the
/// canvas on either axis.
pub fn fit_rect(view_width: u32, view_height: u32, image_width: u32, image_height: u32) -> FitRect {
    let scale = fit_scale(view_width, view_height, image_width, image_height);
    FitRect {
        width: (image_width as f64 * scale) as u32,
        height: (image_height as f64 * scale) as u32,
        scale,
    }
}

/// Map an image-space position into view space. Truncates toward zero.
pub fn to_view(position: Point, scale: f64) -> (i32, i32) {
    (
        (position.x as f64 * scale) as i32,
        (position.y as f64 * scale) as i32,
    )
}

/// Map an image-space length into view space. Truncates toward zero.
pub fn to_view_len(len: f32, scale: f64) -> i32 {
    (len as f64 * scale) as i32
}
