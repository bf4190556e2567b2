use ndarray::Array2;

use camera_session::{CaptureResult, StreamFormat};

use crate::{Error, Result};

/// Pixel planes of one capture, normalized to [0,1].
///
/// For I420 sources the U and V planes stay at quarter resolution; the
/// checks only consume Y.
#[derive(Clone, Debug)]
pub struct Planes {
    pub y: Array2<f32>,
    pub u: Array2<f32>,
    pub v: Array2<f32>,
}

/// Validated I420 geometry: (width, height, y_len, chroma_len).
pub(crate) fn i420_geometry(cap: &CaptureResult) -> Result<(usize, usize, usize, usize)> {
    if cap.format != StreamFormat::Yuv {
        return Err(Error::Layout(format!(
            "expected YUV capture, got {:?}",
            cap.format
        )));
    }
    let (w, h) = (cap.width as usize, cap.height as usize);
    if w == 0 || h == 0 || w % 2 != 0 || h % 2 != 0 {
        return Err(Error::Layout(format!("bad I420 dimensions {w}x{h}")));
    }
    let y_len = w * h;
    let chroma_len = (w / 2) * (h / 2);
    if cap.data.len() != y_len + 2 * chroma_len {
        return Err(Error::Layout(format!(
            "expected {} bytes for {w}x{h} I420, got {}",
            y_len + 2 * chroma_len,
            cap.data.len()
        )));
    }
    Ok((w, h, y_len, chroma_len))
}

fn plane_from_bytes(bytes: &[u8], rows: usize, cols: usize) -> Result<Array2<f32>> {
    let values: Vec<f32> = bytes.iter().map(|b| f32::from(*b) / 255.0).collect();
    Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| Error::Layout(format!("plane shape ({rows}, {cols}): {e}")))
}

/// Split a YUV capture into normalized pixel planes.
pub fn capture_to_planes(cap: &CaptureResult) -> Result<Planes> {
    let (w, h, y_len, chroma_len) = i420_geometry(cap)?;
    let y = plane_from_bytes(&cap.data[..y_len], h, w)?;
    let u = plane_from_bytes(&cap.data[y_len..y_len + chroma_len], h / 2, w / 2)?;
    let v = plane_from_bytes(&cap.data[y_len + chroma_len..], h / 2, w / 2)?;
    Ok(Planes { y, u, v })
}
