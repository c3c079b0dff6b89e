use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Options for annotation rendering, passed as a JavaScript object.
///
/// All fields are optional. `viewWidth`/`viewHeight` must be given together.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotateOptions {
    pub view_width: Option<u32>,
    pub view_height: Option<u32>,
    pub eye_open_threshold: Option<f32>,
    pub format: Option<String>,
    pub quality: Option<f32>,
}

/// A face passed from JavaScript.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceInput {
    #[serde(default)]
    pub id: i32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub left_eye_open: Option<f32>,
    #[serde(default)]
    pub right_eye_open: Option<f32>,
    #[serde(default)]
    pub landmarks: Vec<LandmarkInput>,
}

/// A landmark passed from JavaScript.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkInput {
    pub kind: String,
    pub x: f32,
    pub y: f32,
}

fn format_to_str(format: &faceview::OutputFormat) -> &'static str {
    match format {
        faceview::OutputFormat::Png => "png",
        faceview::OutputFormat::Jpeg => "jpeg",
    }
}

fn string_to_format(format: &str) -> Result<faceview::OutputFormat, JsValue> {
    match format {
        "png" => Ok(faceview::OutputFormat::Png),
        "jpeg" => Ok(faceview::OutputFormat::Jpeg),
        _ => Err(make_error(
            "INVALID_OPTIONS",
            &format!("unknown format: {format}"),
        )),
    }
}

fn string_to_kind(kind: &str) -> Result<faceview::LandmarkKind, JsValue> {
    match kind {
        "bottom-mouth" => Ok(faceview::LandmarkKind::BottomMouth),
        "left-cheek" => Ok(faceview::LandmarkKind::LeftCheek),
        "left-ear" => Ok(faceview::LandmarkKind::LeftEar),
        "left-ear-tip" => Ok(faceview::LandmarkKind::LeftEarTip),
        "left-eye" => Ok(faceview::LandmarkKind::LeftEye),
        "left-mouth" => Ok(faceview::LandmarkKind::LeftMouth),
        "nose-base" => Ok(faceview::LandmarkKind::NoseBase),
        "right-cheek" => Ok(faceview::LandmarkKind::RightCheek),
        "right-ear" => Ok(faceview::LandmarkKind::RightEar),
        "right-ear-tip" => Ok(faceview::LandmarkKind::RightEarTip),
        "right-eye" => Ok(faceview::LandmarkKind::RightEye),
        "right-mouth" => Ok(faceview::LandmarkKind::RightMouth),
        _ => Err(make_error(
            "INVALID_FACES",
            &format!("unknown landmark kind: {kind}"),
        )),
    }
}

/// Create a JS `Error` with a `code` property.
fn make_error(code: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&err, &"code".into(), &JsValue::from_str(code));
    JsValue::from(err)
}

/// Convert a `FaceViewError` into a JS `Error` with a machine-readable `code` property.
fn to_js_error(e: faceview::FaceViewError) -> JsValue {
    let (code, message) = match &e {
        faceview::FaceViewError::DecodeError(_) => ("DECODE_ERROR", e.to_string()),
        faceview::FaceViewError::ZeroDimensions => ("ZERO_DIMENSIONS", e.to_string()),
        faceview::FaceViewError::ZeroViewport => ("ZERO_VIEWPORT", e.to_string()),
        faceview::FaceViewError::EncodeError(_) => ("ENCODE_ERROR", e.to_string()),
        faceview::FaceViewError::InvalidQuality(_) => ("INVALID_QUALITY", e.to_string()),
        faceview::FaceViewError::InvalidThreshold(_) => ("INVALID_THRESHOLD", e.to_string()),
        faceview::FaceViewError::ModelError(_) => ("MODEL_ERROR", e.to_string()),
    };
    make_error(code, &message)
}

fn parse_options(options: JsValue) -> Result<AnnotateOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(AnnotateOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| make_error("INVALID_OPTIONS", &format!("invalid options: {e}")))
    }
}

fn parse_faces(faces: JsValue) -> Result<Vec<faceview::Face>, JsValue> {
    if faces.is_undefined() || faces.is_null() {
        return Ok(Vec::new());
    }

    let inputs: Vec<FaceInput> = serde_wasm_bindgen::from_value(faces)
        .map_err(|e| make_error("INVALID_FACES", &format!("invalid faces: {e}")))?;

    inputs
        .into_iter()
        .map(|input| {
            let mut face = faceview::Face::new(
                input.id,
                faceview::Point::new(input.x, input.y),
                input.width,
                input.height,
            );
            face.left_eye_open = input.left_eye_open;
            face.right_eye_open = input.right_eye_open;
            face.landmarks = input
                .landmarks
                .iter()
                .map(|lm| {
                    Ok(faceview::Landmark {
                        kind: string_to_kind(&lm.kind)?,
                        position: faceview::Point::new(lm.x, lm.y),
                    })
                })
                .collect::<Result<Vec<_>, JsValue>>()?;
            Ok(face)
        })
        .collect()
}

/// Apply parsed `AnnotateOptions` to a `FaceAnnotator`, returning the
/// configured annotator ready for rendering.
fn apply_options(
    mut annotator: faceview::FaceAnnotator,
    opts: &AnnotateOptions,
) -> Result<faceview::FaceAnnotator, JsValue> {
    match (opts.view_width, opts.view_height) {
        (Some(width), Some(height)) => annotator = annotator.viewport(width, height),
        (None, None) => {}
        _ => {
            return Err(make_error(
                "INVALID_OPTIONS",
                "viewWidth and viewHeight must be given together",
            ))
        }
    }
    if let Some(threshold) = opts.eye_open_threshold {
        annotator = annotator.eye_open_threshold(threshold);
    }
    if let Some(ref fmt) = opts.format {
        annotator = annotator.format(string_to_format(fmt)?);
    }
    if let Some(q) = opts.quality {
        annotator = annotator.quality(q);
    }
    Ok(annotator)
}

/// Build a plain JS object from an `AnnotatedPhoto`.
fn build_photo_object(photo: &faceview::AnnotatedPhoto) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    let data = js_sys::Uint8Array::from(&photo.data[..]);
    js_sys::Reflect::set(&obj, &"data".into(), &data)?;
    js_sys::Reflect::set(
        &obj,
        &"format".into(),
        &JsValue::from_str(format_to_str(&photo.format)),
    )?;
    js_sys::Reflect::set(&obj, &"width".into(), &JsValue::from(photo.width))?;
    js_sys::Reflect::set(&obj, &"height".into(), &JsValue::from(photo.height))?;
    js_sys::Reflect::set(&obj, &"scale".into(), &JsValue::from(photo.scale))?;
    js_sys::Reflect::set(
        &obj,
        &"facesDrawn".into(),
        &JsValue::from(photo.faces_drawn as u32),
    )?;
    js_sys::Reflect::set(
        &obj,
        &"originalSize".into(),
        &JsValue::from(photo.original_size as u32),
    )?;
    Ok(JsValue::from(obj))
}

/// Render a photo with face-annotation overlays.
///
/// @param input - Raw image bytes (JPEG, PNG, or WebP)
/// @param faces - Array of face objects: {id, x, y, width, height,
///   leftEyeOpen, rightEyeOpen, landmarks: [{kind, x, y}]}
/// @param options - Optional object with fields: viewWidth, viewHeight,
///   eyeOpenThreshold, format, quality
#[wasm_bindgen]
pub fn annotate(input: Vec<u8>, faces: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let faces = parse_faces(faces)?;
    let opts = parse_options(options)?;

    let annotator = faceview::FaceAnnotator::new(input).map_err(to_js_error)?;
    let annotator = apply_options(annotator, &opts)?.faces(faces);

    let result = annotator.annotate().map_err(to_js_error)?;

    build_photo_object(&result)
}
