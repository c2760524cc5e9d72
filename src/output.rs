//! Hands a finished frame to the outside world as an image file.

use image::png::PNGEncoder;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::path::Path;

use error::RenderError;
use render::Frame;

/// Writes `frame` to `path`.  A `.png` extension gets a PNG; anything
/// else gets a binary PPM.
pub fn write_frame<P: AsRef<Path>>(path: P, frame: &Frame) -> Result<(), RenderError> {
    let path = path.as_ref();
    let pixels = frame.to_rgb_bytes();
    let (width, height) = (frame.width() as u32, frame.height() as u32);
    let output = File::create(path)?;

    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        PNGEncoder::new(output).encode(&pixels, width, height, ColorType::RGB(8))?;
    } else {
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
        encoder.encode(&pixels[..], width, height, ColorType::RGB(8))?;
    }
    debug!("wrote {}x{} frame to {}", width, height, path.display());
    Ok(())
}
