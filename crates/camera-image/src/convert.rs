use image::RgbImage;

use camera_session::CaptureResult;

use crate::planes::i420_geometry;
use crate::Result;

/// BT.601 YUV to RGB, clamped to 0..=255.
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = f32::from(y);
    let u = f32::from(u) - 128.0;
    let v = f32::from(v) - 128.0;

    let r = y + 1.402 * v;
    let g = y - 0.344_14 * u - 0.714_14 * v;
    let b = y + 1.772 * u;

    let clamp = |x: f32| x.clamp(0.0, 255.0).round() as u8;
    [clamp(r), clamp(g), clamp(b)]
}

/// Convert a YUV capture to an RGB image for visual logging.
///
/// Chroma is upsampled nearest-neighbor; good enough for snapshots, not for
/// measurement (measurements go through [`crate::capture_to_planes`]).
pub fn capture_to_rgb(cap: &CaptureResult) -> Result<RgbImage> {
    let (w, h, y_len, chroma_len) = i420_geometry(cap)?;
    let chroma_cols = w / 2;

    let mut img = RgbImage::new(cap.width, cap.height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let (col, row) = (x as usize, y as usize);
        let luma = cap.data[row * w + col];
        let chroma_idx = (row / 2) * chroma_cols + col / 2;
        let cb = cap.data[y_len + chroma_idx];
        let cr = cap.data[y_len + chroma_len + chroma_idx];
        pixel.0 = yuv_to_rgb(luma, cb, cr);
    }
    Ok(img)
}
