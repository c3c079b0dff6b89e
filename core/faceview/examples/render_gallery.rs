//! Render a hand-authored face over a synthetic portrait at several
//! viewport sizes.
//!
//! Usage:
//!   cargo run --example render_gallery
//!
//! Output goes to `gallery/`.

use std::path::Path;

use faceview::{Face, FaceAnnotator, Landmark, LandmarkKind, Point};
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, Rgb, RgbImage};

/// A 320x400 gradient standing in for a portrait photo.
fn synthetic_portrait() -> Vec<u8> {
    let width = 320;
    let height = 400;
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            160,
        ]);
    }
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

/// One face: left eye open, right eye closed, full landmark set.
fn demo_face() -> Face {
    let mut face = Face::new(0, Point::new(60.0, 80.0), 200.0, 240.0);
    face.left_eye_open = Some(0.92);
    face.right_eye_open = Some(0.08);
    face.landmarks = vec![
        Landmark {
            kind: LandmarkKind::LeftEye,
            position: Point::new(120.0, 170.0),
        },
        Landmark {
            kind: LandmarkKind::RightEye,
            position: Point::new(200.0, 170.0),
        },
        Landmark {
            kind: LandmarkKind::NoseBase,
            position: Point::new(160.0, 210.0),
        },
        Landmark {
            kind: LandmarkKind::LeftMouth,
            position: Point::new(130.0, 260.0),
        },
        Landmark {
            kind: LandmarkKind::BottomMouth,
            position: Point::new(160.0, 275.0),
        },
        Landmark {
            kind: LandmarkKind::RightMouth,
            position: Point::new(190.0, 260.0),
        },
        Landmark {
            kind: LandmarkKind::LeftCheek,
            position: Point::new(100.0, 230.0),
        },
        Landmark {
            kind: LandmarkKind::RightCheek,
            position: Point::new(220.0, 230.0),
        },
    ];
    face
}

fn main() {
    env_logger::init();

    let output_dir = Path::new("gallery");
    std::fs::create_dir_all(output_dir).expect("failed to create output directory");

    let input = synthetic_portrait();
    let viewports: &[(&str, u32, u32)] = &[
        ("native", 320, 400),
        ("thumb", 96, 96),
        ("screen", 480, 800),
        ("wide", 1280, 720),
    ];

    for (name, width, height) in viewports {
        let result = FaceAnnotator::new(input.clone())
            .unwrap()
            .faces(vec![demo_face()])
            .viewport(*width, *height)
            .annotate()
            .unwrap();

        let filename = format!("{name}.png");
        let output_path = output_dir.join(&filename);
        std::fs::write(&output_path, &result.data).unwrap();

        println!(
            "  {name}: {filename} ({}x{}, scale {:.3}, {} bytes)",
            result.width,
            result.height,
            result.scale,
            result.data.len(),
        );
    }

    println!("Output written to {}", output_dir.display());
}
