use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageEncoder, ImageFormat, Rgb, RgbImage, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use log::debug;

use crate::error::FaceViewError;
use crate::face::Face;
use crate::scale::{fit_rect, to_view, to_view_len, FitRect};
use crate::{AnnotatedPhoto, OutputFormat, Style};

/// Decode input bytes into a `DynamicImage`.
pub(crate) fn decode_image(input: &[u8]) -> Result<DynamicImage, FaceViewError> {
    image::load_from_memory(input).map_err(|e| FaceViewError::DecodeError(e.to_string()))
}

/// Detect the input image format from the raw bytes.
pub(crate) fn detect_format(input: &[u8]) -> Result<ImageFormat, FaceViewError> {
    image::guess_format(input).map_err(|e| FaceViewError::DecodeError(e.to_string()))
}

/// Draw the scaled image and the face annotations onto `canvas`.
///
/// The image is scaled uniformly to fit the canvas and anchored at the
/// top-left corner; canvas pixels outside that rectangle are left untouched.
/// Returns the scale factor used for the annotation coordinates.
pub(crate) fn draw_frame(
    canvas: &mut RgbImage,
    image: &DynamicImage,
    faces: &[Face],
    style: &Style,
    eye_open_threshold: f32,
) -> f64 {
    let fit = fit_rect(canvas.width(), canvas.height(), image.width(), image.height());
    blit_scaled(canvas, image, &fit, style.background);
    draw_face_annotations(canvas, faces, fit.scale, style, eye_open_threshold);
    fit.scale
}

/// Resize the image to the fit rectangle and copy it into the canvas
/// top-left corner, compositing alpha over `background`.
fn blit_scaled(canvas: &mut RgbImage, image: &DynamicImage, fit: &FitRect, background: Rgb<u8>) {
    if fit.width == 0 || fit.height == 0 {
        return;
    }

    let scaled = if fit.width == image.width() && fit.height == image.height() {
        image.clone()
    } else {
        image.resize_exact(fit.width, fit.height, FilterType::Lanczos3)
    };

    let rgba: RgbaImage = scaled.to_rgba8();
    let [bg_r, bg_g, bg_b] = background.0;
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let out_r = (r as f32 * alpha + bg_r as f32 * inv_alpha).round() as u8;
        let out_g = (g as f32 * alpha + bg_g as f32 * inv_alpha).round() as u8;
        let out_b = (b as f32 * alpha + bg_b as f32 * inv_alpha).round() as u8;
        canvas.put_pixel(x, y, Rgb([out_r, out_g, out_b]));
    }
}

/// Draw the bounding rectangle and landmark markers for each face, with all
/// coordinates mapped from image space into view space by `scale`.
fn draw_face_annotations(
    canvas: &mut RgbImage,
    faces: &[Face],
    scale: f64,
    style: &Style,
    eye_open_threshold: f32,
) {
    debug!("drawing {} face(s) at scale {scale:.3}", faces.len());

    for face in faces {
        draw_face_box(canvas, face, scale, style);

        for landmark in &face.landmarks {
            let center = to_view(landmark.position, scale);

            if landmark.kind.is_eye() {
                let open = face
                    .eye_open(landmark.kind)
                    .map_or(false, |p| p >= eye_open_threshold);

                if open {
                    draw_filled_circle_mut(canvas, center, style.iris_radius, style.iris);
                    draw_filled_circle_mut(canvas, center, style.pupil_radius, style.pupil);
                } else {
                    draw_filled_circle_mut(canvas, center, style.landmark_radius, style.closed_eye);
                }
            } else {
                draw_filled_circle_mut(canvas, center, style.landmark_radius, style.landmark);
            }
        }
    }
}

/// Draw a face bounding box as a hollow rectangle. The stroke grows inward
/// from the scaled bounds so the box never spills outside them.
fn draw_face_box(canvas: &mut RgbImage, face: &Face, scale: f64, style: &Style) {
    let (x, y) = to_view(face.position, scale);
    let width = to_view_len(face.width, scale);
    let height = to_view_len(face.height, scale);
    if width <= 0 || height <= 0 {
        return;
    }

    for inset in 0..style.box_stroke as i32 {
        let w = width - 2 * inset;
        let h = height - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(x + inset, y + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(canvas, rect, style.face_box);
    }
}

/// Encode a canvas to the specified format. `quality` applies to JPEG only.
pub(crate) fn encode_image(
    image: &RgbImage,
    format: &OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, FaceViewError> {
    let mut buffer = Vec::new();

    match format {
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            encoder
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| FaceViewError::EncodeError(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let quality_percent = (quality * 100.0).round() as u8;
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality_percent);
            encoder
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| FaceViewError::EncodeError(e.to_string()))?;
        }
    }

    Ok(buffer)
}

/// Full annotation pipeline: decode → validate → allocate canvas →
/// draw frame → encode.
pub(crate) fn annotate_pipeline(
    input: &[u8],
    faces: Option<&[Face]>,
    viewport: Option<(u32, u32)>,
    style: &Style,
    eye_open_threshold: f32,
    format: &OutputFormat,
    quality: f32,
    detector: Option<&dyn crate::detector::FaceDetector>,
) -> Result<AnnotatedPhoto, FaceViewError> {
    let decoded = decode_image(input)?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(FaceViewError::ZeroDimensions);
    }

    let (view_width, view_height) = viewport.unwrap_or((decoded.width(), decoded.height()));
    if view_width == 0 || view_height == 0 {
        return Err(FaceViewError::ZeroViewport);
    }

    // Faces supplied by the caller win; the detector is the fallback.
    let detected;
    let faces = match (faces, detector) {
        (Some(faces), _) => faces,
        (None, Some(detector)) => {
            let gray = image::imageops::grayscale(&decoded);
            detected = detector.detect(gray.as_raw(), gray.width(), gray.height());
            &detected[..]
        }
        (None, None) => &[],
    };

    let mut canvas = RgbImage::from_pixel(view_width, view_height, style.background);
    let scale = draw_frame(&mut canvas, &decoded, faces, style, eye_open_threshold);
    let data = encode_image(&canvas, format, quality)?;

    Ok(AnnotatedPhoto {
        data,
        format: format.clone(),
        width: view_width,
        height: view_height,
        scale,
        faces_drawn: faces.len(),
        original_size: input.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{Landmark, LandmarkKind, Point};

    fn flat_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    /// Small markers so probes never collide on the test canvases.
    fn test_style() -> Style {
        Style {
            iris_radius: 6,
            pupil_radius: 2,
            landmark_radius: 2,
            box_stroke: 2,
            ..Style::default()
        }
    }

    #[test]
    fn blit_fills_fit_rect_and_leaves_rest() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(200, 100, [10, 20, 30]);

        draw_frame(&mut canvas, &image, &[], &Style::default(), 0.4);

        // 200x100 into 100x100 → scale 0.5, image occupies 100x50
        assert_eq!(canvas.get_pixel(50, 25), &Rgb([10, 20, 30]));
        // below the scaled image the canvas is untouched
        assert_eq!(canvas.get_pixel(50, 75), &Rgb([0, 0, 0]));
    }

    #[test]
    fn blit_at_native_size_is_exact() {
        let mut canvas = RgbImage::from_pixel(64, 64, Rgb([0, 0, 0]));
        let image = flat_image(64, 64, [99, 150, 201]);

        let scale = draw_frame(&mut canvas, &image, &[], &Style::default(), 0.4);

        assert_eq!(scale, 1.0);
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([99, 150, 201]));
        assert_eq!(canvas.get_pixel(63, 63), &Rgb([99, 150, 201]));
    }

    #[test]
    fn blit_composites_alpha_over_background() {
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let mut rgba = RgbaImage::new(4, 4);
        for pixel in rgba.pixels_mut() {
            // fully transparent red
            *pixel = image::Rgba([255, 0, 0, 0]);
        }
        let image = DynamicImage::ImageRgba8(rgba);

        let style = Style {
            background: Rgb([7, 8, 9]),
            ..Style::default()
        };
        draw_frame(&mut canvas, &image, &[], &style, 0.4);

        assert_eq!(canvas.get_pixel(1, 1), &Rgb([7, 8, 9]));
    }

    #[test]
    fn face_box_outlines_scaled_bounds() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(200, 200, [50, 50, 50]);
        let face = Face::new(0, Point::new(40.0, 40.0), 80.0, 80.0);

        let style = test_style();
        draw_frame(&mut canvas, &image, &[face], &style, 0.4);

        // scale 0.5 → box at (20, 20), 40x40
        assert_eq!(canvas.get_pixel(20, 20), &style.face_box);
        assert_eq!(canvas.get_pixel(59, 59), &style.face_box);
        // second stroke row, one pixel inward
        assert_eq!(canvas.get_pixel(21, 30), &style.face_box);
        // interior stays image content
        assert_eq!(canvas.get_pixel(40, 40), &Rgb([50, 50, 50]));
    }

    #[test]
    fn closed_eye_draws_filled_closed_marker() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(100, 100, [50, 50, 50]);
        let mut face = Face::new(0, Point::new(10.0, 10.0), 80.0, 80.0);
        face.left_eye_open = Some(0.1);
        face.landmarks.push(Landmark {
            kind: LandmarkKind::LeftEye,
            position: Point::new(30.0, 40.0),
        });

        let style = test_style();
        draw_frame(&mut canvas, &image, &[face], &style, 0.4);

        assert_eq!(canvas.get_pixel(30, 40), &style.closed_eye);
    }

    #[test]
    fn open_eye_draws_iris_and_pupil() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(100, 100, [50, 50, 50]);
        let mut face = Face::new(0, Point::new(10.0, 10.0), 80.0, 80.0);
        face.right_eye_open = Some(0.95);
        face.landmarks.push(Landmark {
            kind: LandmarkKind::RightEye,
            position: Point::new(60.0, 40.0),
        });

        let style = test_style();
        draw_frame(&mut canvas, &image, &[face], &style, 0.4);

        // pupil at the center, iris ring around it
        assert_eq!(canvas.get_pixel(60, 40), &style.pupil);
        assert_eq!(canvas.get_pixel(60 + 4, 40), &style.iris);
    }

    #[test]
    fn uncomputed_eye_probability_renders_closed() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(100, 100, [50, 50, 50]);
        let mut face = Face::new(0, Point::new(10.0, 10.0), 80.0, 80.0);
        face.landmarks.push(Landmark {
            kind: LandmarkKind::LeftEye,
            position: Point::new(30.0, 40.0),
        });

        let style = test_style();
        draw_frame(&mut canvas, &image, &[face], &style, 0.4);

        assert_eq!(canvas.get_pixel(30, 40), &style.closed_eye);
    }

    #[test]
    fn threshold_boundary_is_open() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(100, 100, [50, 50, 50]);
        let mut face = Face::new(0, Point::new(10.0, 10.0), 80.0, 80.0);
        face.left_eye_open = Some(0.4);
        face.landmarks.push(Landmark {
            kind: LandmarkKind::LeftEye,
            position: Point::new(30.0, 40.0),
        });

        let style = test_style();
        draw_frame(&mut canvas, &image, &[face], &style, 0.4);

        // exactly at the threshold counts as open
        assert_eq!(canvas.get_pixel(30, 40), &style.pupil);
    }

    #[test]
    fn non_eye_landmark_draws_landmark_marker() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(100, 100, [50, 50, 50]);
        let mut face = Face::new(0, Point::new(10.0, 10.0), 80.0, 80.0);
        face.landmarks.push(Landmark {
            kind: LandmarkKind::NoseBase,
            position: Point::new(50.0, 55.0),
        });

        let style = test_style();
        draw_frame(&mut canvas, &image, &[face], &style, 0.4);

        assert_eq!(canvas.get_pixel(50, 55), &style.landmark);
    }

    #[test]
    fn landmark_coordinates_scale_into_view_space() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(200, 200, [50, 50, 50]);
        let mut face = Face::new(0, Point::new(0.0, 0.0), 200.0, 200.0);
        face.landmarks.push(Landmark {
            kind: LandmarkKind::BottomMouth,
            position: Point::new(120.0, 160.0),
        });

        let style = test_style();
        draw_frame(&mut canvas, &image, &[face], &style, 0.4);

        // scale 0.5 → marker centered at (60, 80)
        assert_eq!(canvas.get_pixel(60, 80), &style.landmark);
    }

    #[test]
    fn degenerate_face_box_is_skipped() {
        let mut canvas = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let image = flat_image(100, 100, [50, 50, 50]);
        // sub-pixel box after scaling
        let face = Face::new(0, Point::new(10.0, 10.0), 0.5, 0.5);

        draw_frame(&mut canvas, &image, &[face], &test_style(), 0.4);

        assert_eq!(canvas.get_pixel(10, 10), &Rgb([50, 50, 50]));
    }

    #[test]
    fn encode_png_produces_valid_output() {
        let canvas = RgbImage::from_pixel(48, 64, Rgb([1, 2, 3]));
        let data = encode_image(&canvas, &OutputFormat::Png, 0.9).unwrap();
        assert_eq!(&data[0..4], b"\x89PNG");
    }

    #[test]
    fn encode_jpeg_produces_valid_output() {
        let canvas = RgbImage::from_pixel(48, 64, Rgb([1, 2, 3]));
        let data = encode_image(&canvas, &OutputFormat::Jpeg, 0.8).unwrap();
        assert_eq!(data[0], 0xFF);
        assert_eq!(data[1], 0xD8);
    }
}
