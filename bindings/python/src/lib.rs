use faceview_core::{Face, FaceAnnotator, FaceViewError, Landmark, LandmarkKind, OutputFormat, Point};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

fn to_py_err(e: FaceViewError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn format_to_string(format: &OutputFormat) -> &'static str {
    match format {
        OutputFormat::Png => "png",
        OutputFormat::Jpeg => "jpeg",
    }
}

fn string_to_format(format: &str) -> PyResult<OutputFormat> {
    match format {
        "png" => Ok(OutputFormat::Png),
        "jpeg" => Ok(OutputFormat::Jpeg),
        _ => Err(PyValueError::new_err(format!("unknown format: {format}"))),
    }
}

fn string_to_kind(kind: &str) -> PyResult<LandmarkKind> {
    match kind {
        "bottom-mouth" => Ok(LandmarkKind::BottomMouth),
        "left-cheek" => Ok(LandmarkKind::LeftCheek),
        "left-ear" => Ok(LandmarkKind::LeftEar),
        "left-ear-tip" => Ok(LandmarkKind::LeftEarTip),
        "left-eye" => Ok(LandmarkKind::LeftEye),
        "left-mouth" => Ok(LandmarkKind::LeftMouth),
        "nose-base" => Ok(LandmarkKind::NoseBase),
        "right-cheek" => Ok(LandmarkKind::RightCheek),
        "right-ear" => Ok(LandmarkKind::RightEar),
        "right-ear-tip" => Ok(LandmarkKind::RightEarTip),
        "right-eye" => Ok(LandmarkKind::RightEye),
        "right-mouth" => Ok(LandmarkKind::RightMouth),
        _ => Err(PyValueError::new_err(format!(
            "unknown landmark kind: {kind}"
        ))),
    }
}

fn required_f32(face: &Bound<'_, PyDict>, key: &str) -> PyResult<f32> {
    face.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("face missing key: {key}")))?
        .extract()
}

fn optional_f32(face: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<f32>> {
    match face.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

fn face_from_dict(dict: &Bound<'_, PyDict>) -> PyResult<Face> {
    let id = match dict.get_item("id")? {
        Some(value) if !value.is_none() => value.extract()?,
        _ => 0,
    };
    let mut face = Face::new(
        id,
        Point::new(required_f32(dict, "x")?, required_f32(dict, "y")?),
        required_f32(dict, "width")?,
        required_f32(dict, "height")?,
    );
    face.left_eye_open = optional_f32(dict, "left_eye_open")?;
    face.right_eye_open = optional_f32(dict, "right_eye_open")?;

    if let Some(landmarks) = dict.get_item("landmarks")? {
        if !landmarks.is_none() {
            for item in landmarks.downcast::<PyList>()?.iter() {
                let lm = item.downcast::<PyDict>()?;
                let kind: String = lm
                    .get_item("kind")?
                    .ok_or_else(|| PyValueError::new_err("landmark missing key: kind"))?
                    .extract()?;
                face.landmarks.push(Landmark {
                    kind: string_to_kind(&kind)?,
                    position: Point::new(required_f32(lm, "x")?, required_f32(lm, "y")?),
                });
            }
        }
    }

    Ok(face)
}

/// Render a photo with face-annotation overlays.
///
/// Args:
///     input: Raw image bytes (JPEG, PNG, or WebP)
///     faces: List of face dicts with keys: id, x, y, width, height,
///            left_eye_open, right_eye_open, landmarks (list of dicts
///            with keys: kind, x, y)
///     view_width: Canvas width in pixels (default: the image's own width)
///     view_height: Canvas height in pixels (default: the image's own height)
///     eye_open_threshold: Probability at or above which an eye renders
///                         as open (default: 0.4)
///     format: "png" or "jpeg" (default: "png")
///     quality: JPEG quality 0.0–1.0 (default: 0.9)
///
/// Returns:
///     dict with keys: data (bytes), format (str), width (int), height (int),
///                     scale (float), faces_drawn (int), original_size (int)
#[pyfunction]
#[pyo3(signature = (input, faces, *, view_width=None, view_height=None, eye_open_threshold=None, format=None, quality=None))]
#[allow(clippy::too_many_arguments)]
fn annotate(
    py: Python<'_>,
    input: Vec<u8>,
    faces: Vec<Bound<'_, PyDict>>,
    view_width: Option<u32>,
    view_height: Option<u32>,
    eye_open_threshold: Option<f32>,
    format: Option<&str>,
    quality: Option<f32>,
) -> PyResult<Py<PyDict>> {
    let faces = faces
        .iter()
        .map(face_from_dict)
        .collect::<PyResult<Vec<_>>>()?;

    let mut annotator = FaceAnnotator::new(input).map_err(to_py_err)?.faces(faces);

    match (view_width, view_height) {
        (Some(width), Some(height)) => annotator = annotator.viewport(width, height),
        (None, None) => {}
        _ => {
            return Err(PyValueError::new_err(
                "view_width and view_height must be given together",
            ))
        }
    }
    if let Some(threshold) = eye_open_threshold {
        annotator = annotator.eye_open_threshold(threshold);
    }
    if let Some(fmt) = format {
        annotator = annotator.format(string_to_format(fmt)?);
    }
    if let Some(q) = quality {
        annotator = annotator.quality(q);
    }

    let result = annotator.annotate().map_err(to_py_err)?;

    let dict = PyDict::new(py);
    dict.set_item("data", pyo3::types::PyBytes::new(py, &result.data))?;
    dict.set_item("format", format_to_string(&result.format))?;
    dict.set_item("width", result.width)?;
    dict.set_item("height", result.height)?;
    dict.set_item("scale", result.scale)?;
    dict.set_item("faces_drawn", result.faces_drawn)?;
    dict.set_item("original_size", result.original_size)?;
    Ok(dict.into())
}

#[pymodule]
fn faceview(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(annotate, m)?)?;
    Ok(())
}
