uniffi::setup_scaffolding!();

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FaceViewError {
    #[error("failed to decode image: {message}")]
    DecodeError { message: String },
    #[error("image dimensions are zero")]
    ZeroDimensions,
    #[error("viewport dimensions must be > 0")]
    ZeroViewport,
    #[error("failed to encode image: {message}")]
    EncodeError { message: String },
    #[error("invalid quality value")]
    InvalidQuality,
    #[error("invalid eye-open threshold")]
    InvalidThreshold,
    #[error("failed to load detection model: {message}")]
    ModelError { message: String },
}

impl From<faceview::FaceViewError> for FaceViewError {
    fn from(e: faceview::FaceViewError) -> Self {
        match e {
            faceview::FaceViewError::DecodeError(msg) => FaceViewError::DecodeError { message: msg },
            faceview::FaceViewError::ZeroDimensions => FaceViewError::ZeroDimensions,
            faceview::FaceViewError::ZeroViewport => FaceViewError::ZeroViewport,
            faceview::FaceViewError::EncodeError(msg) => FaceViewError::EncodeError { message: msg },
            faceview::FaceViewError::InvalidQuality(_) => FaceViewError::InvalidQuality,
            faceview::FaceViewError::InvalidThreshold(_) => FaceViewError::InvalidThreshold,
            faceview::FaceViewError::ModelError(msg) => FaceViewError::ModelError { message: msg },
        }
    }
}

#[derive(uniffi::Enum)]
pub enum LandmarkKind {
    BottomMouth,
    LeftCheek,
    LeftEar,
    LeftEarTip,
    LeftEye,
    LeftMouth,
    NoseBase,
    RightCheek,
    RightEar,
    RightEarTip,
    RightEye,
    RightMouth,
}

impl From<LandmarkKind> for faceview::LandmarkKind {
    fn from(kind: LandmarkKind) -> Self {
        match kind {
            LandmarkKind::BottomMouth => faceview::LandmarkKind::BottomMouth,
            LandmarkKind::LeftCheek => faceview::LandmarkKind::LeftCheek,
            LandmarkKind::LeftEar => faceview::LandmarkKind::LeftEar,
            LandmarkKind::LeftEarTip => faceview::LandmarkKind::LeftEarTip,
            LandmarkKind::LeftEye => faceview::LandmarkKind::LeftEye,
            LandmarkKind::LeftMouth => faceview::LandmarkKind::LeftMouth,
            LandmarkKind::NoseBase => faceview::LandmarkKind::NoseBase,
            LandmarkKind::RightCheek => faceview::LandmarkKind::RightCheek,
            LandmarkKind::RightEar => faceview::LandmarkKind::RightEar,
            LandmarkKind::RightEarTip => faceview::LandmarkKind::RightEarTip,
            LandmarkKind::RightEye => faceview::LandmarkKind::RightEye,
            LandmarkKind::RightMouth => faceview::LandmarkKind::RightMouth,
        }
    }
}

#[derive(uniffi::Enum)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl From<OutputFormat> for faceview::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => faceview::OutputFormat::Png,
            OutputFormat::Jpeg => faceview::OutputFormat::Jpeg,
        }
    }
}

impl From<faceview::OutputFormat> for OutputFormat {
    fn from(format: faceview::OutputFormat) -> Self {
        match format {
            faceview::OutputFormat::Png => OutputFormat::Png,
            faceview::OutputFormat::Jpeg => OutputFormat::Jpeg,
        }
    }
}

#[derive(uniffi::Record)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub x: f32,
    pub y: f32,
}

#[derive(uniffi::Record)]
pub struct Face {
    pub id: i32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub left_eye_open: Option<f32>,
    pub right_eye_open: Option<f32>,
    pub landmarks: Vec<Landmark>,
}

#[derive(uniffi::Record)]
pub struct AnnotatedPhoto {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub faces_drawn: u32,
    pub original_size: u64,
}

fn convert_face(face: Face) -> faceview::Face {
    let mut converted = faceview::Face::new(
        face.id,
        faceview::Point::new(face.x, face.y),
        face.width,
        face.height,
    );
    converted.left_eye_open = face.left_eye_open;
    converted.right_eye_open = face.right_eye_open;
    converted.landmarks = face
        .landmarks
        .into_iter()
        .map(|lm| faceview::Landmark {
            kind: lm.kind.into(),
            position: faceview::Point::new(lm.x, lm.y),
        })
        .collect();
    converted
}

fn convert_photo(photo: faceview::AnnotatedPhoto) -> AnnotatedPhoto {
    AnnotatedPhoto {
        data: photo.data,
        format: photo.format.into(),
        width: photo.width,
        height: photo.height,
        scale: photo.scale,
        faces_drawn: photo.faces_drawn as u32,
        original_size: photo.original_size as u64,
    }
}

/// Render annotations at the image's own size with default settings.
#[uniffi::export]
pub fn annotate(input: Vec<u8>, faces: Vec<Face>) -> Result<AnnotatedPhoto, FaceViewError> {
    let result = faceview::FaceAnnotator::new(input)?
        .faces(faces.into_iter().map(convert_face).collect())
        .annotate()?;

    Ok(convert_photo(result))
}

/// Render annotations into a canvas of the given size with full control
/// over all parameters.
#[uniffi::export]
pub fn annotate_with_viewport(
    input: Vec<u8>,
    faces: Vec<Face>,
    view_width: u32,
    view_height: u32,
    eye_open_threshold: f32,
    format: OutputFormat,
    quality: f32,
) -> Result<AnnotatedPhoto, FaceViewError> {
    let result = faceview::FaceAnnotator::new(input)?
        .faces(faces.into_iter().map(convert_face).collect())
        .viewport(view_width, view_height)
        .eye_open_threshold(eye_open_threshold)
        .format(format.into())
        .quality(quality)
        .annotate()?;

    Ok(convert_photo(result))
}
