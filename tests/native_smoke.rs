#![cfg(feature = "native")]

//! Smoke tests against the real wkhtmltox engine

use htmlshot::{new_converter, Engine, RenderConfig};

#[test]
#[ignore] // Requires libwkhtmltox to be installed
fn smoke_convert_fragment() {
    let config = RenderConfig {
        format: "jpeg".to_string(),
        ..Default::default()
    };
    let converter = new_converter(config).expect("failed to bring up wkhtmltox");

    let mut image = Vec::new();
    converter
        .run_on_fragment(
            "<p>Hello, this is me.</p><p>Please be kind to me.</p>",
            &mut image,
        )
        .expect("fragment conversion failed");

    assert!(image.len() > 100, "image seems too small");
    // JPEG files start with these magic bytes
    assert_eq!(&image[0..2], [0xff, 0xd8]);
}

#[test]
#[ignore] // Requires libwkhtmltox to be installed
fn smoke_convert_full_document() {
    let config = RenderConfig {
        format: "png".to_string(),
        screen_width: 640,
        ..Default::default()
    };
    let converter = new_converter(config).expect("failed to bring up wkhtmltox");

    let mut image = Vec::new();
    converter
        .run(
            "<html><head><title>t</title></head><body><h1>Hi</h1></body></html>",
            &mut image,
        )
        .expect("document conversion failed");

    assert_eq!(&image[0..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
#[ignore] // Requires libwkhtmltox to be installed
fn smoke_engine_reports_a_version() {
    let version = htmlshot::native::NativeEngine.version();
    assert!(!version.is_empty());
}
