//! Patch extraction and mean statistics over pixel planes.

use ndarray::{s, Array2};

use crate::{Error, Result};

/// Absolute term of the relative closeness test.
pub const ISCLOSE_ATOL: f64 = 1e-8;

/// Extract a sub-rectangle in normalized [0,1] coordinates.
///
/// `x_norm`/`y_norm` place the top-left corner; `w_norm`/`h_norm` give the
/// extent. Pixel bounds are rounded, so a 1/16 extent of a /16-divisible
/// dimension is exact.
pub fn image_patch(
    plane: &Array2<f32>,
    x_norm: f64,
    y_norm: f64,
    w_norm: f64,
    h_norm: f64,
) -> Result<Array2<f32>> {
    for (name, v) in [
        ("x", x_norm),
        ("y", y_norm),
        ("w", w_norm),
        ("h", h_norm),
    ] {
        if !(0.0..=1.0).contains(&v) {
            return Err(Error::Geometry(format!("{name}_norm={v} outside [0,1]")));
        }
    }
    if x_norm + w_norm > 1.0 + 1e-9 || y_norm + h_norm > 1.0 + 1e-9 {
        return Err(Error::Geometry(format!(
            "patch ({x_norm}, {y_norm}) + ({w_norm}, {h_norm}) exceeds the frame"
        )));
    }

    let (rows, cols) = plane.dim();
    let x0 = (x_norm * cols as f64).round() as usize;
    let y0 = (y_norm * rows as f64).round() as usize;
    let w = (w_norm * cols as f64).round() as usize;
    let h = (h_norm * rows as f64).round() as usize;
    if w == 0 || h == 0 {
        return Err(Error::Geometry(format!(
            "patch collapses to {w}x{h} pixels at {cols}x{rows}"
        )));
    }
    let x1 = (x0 + w).min(cols);
    let y1 = (y0 + h).min(rows);
    Ok(plane.slice(s![y0..y1, x0..x1]).to_owned())
}

/// Mean of a plane (or patch).
pub fn plane_mean(plane: &Array2<f32>) -> Result<f64> {
    plane
        .mean()
        .map(f64::from)
        .ok_or_else(|| Error::Geometry("mean of an empty plane".into()))
}

/// Relative closeness, numpy-style: `|a - b| <= atol + rtol * |b|`.
pub fn is_close_rel(a: f64, b: f64, rtol: f64) -> bool {
    (a - b).abs() <= ISCLOSE_ATOL + rtol * b.abs()
}
