//! Detect faces in a photo and render the annotated result.
//!
//! Usage:
//!   cargo run --example annotate_photo --features face-detection -- \
//!     photo.jpg seeta_fd_frontal_v1.0.bin annotated.png

#[cfg(feature = "face-detection")]
fn main() {
    use faceview::{FaceAnnotator, FaceDetector, RustfaceDetector};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let photo_path = args.next().expect("usage: annotate_photo PHOTO MODEL OUT");
    let model_path = args.next().expect("usage: annotate_photo PHOTO MODEL OUT");
    let out_path = args.next().unwrap_or_else(|| "annotated.png".to_string());

    let input = std::fs::read(&photo_path)
        .unwrap_or_else(|e| panic!("failed to read {photo_path}: {e}"));
    let detector = RustfaceDetector::from_model_path(&model_path)
        .unwrap_or_else(|e| panic!("failed to load {model_path}: {e}"));

    // Run detection once up front so the results can be printed before drawing.
    let image = image::load_from_memory(&input).expect("failed to decode photo");
    let gray = image::imageops::grayscale(&image);
    let faces = detector.detect(gray.as_raw(), gray.width(), gray.height());

    println!(
        "=== {photo_path} ({}x{}) ===",
        image.width(),
        image.height()
    );
    if faces.is_empty() {
        println!("  NO FACES DETECTED");
    } else {
        println!("  Found {} face(s):", faces.len());
        for face in &faces {
            println!(
                "    face {}: bbox=({}, {}, {}x{})",
                face.id, face.position.x, face.position.y, face.width, face.height,
            );
        }
    }

    let result = FaceAnnotator::new(input)
        .unwrap()
        .faces(faces)
        .annotate()
        .unwrap();

    std::fs::write(&out_path, &result.data).expect("failed to write output");
    println!(
        "  → {out_path} ({}x{}, {} bytes, {} face(s) drawn)",
        result.width,
        result.height,
        result.data.len(),
        result.faces_drawn,
    );
}

#[cfg(not(feature = "face-detection"))]
fn main() {
    eprintln!("rebuild with --features face-detection to run this example");
    std::process::exit(1);
}
