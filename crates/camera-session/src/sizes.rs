use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CameraProperties, StreamFormat};

/// Aspect ratios within this tolerance count as matching.
pub const ASPECT_RATIO_TOL: f64 = 0.01;

/// One advertised output resolution.
///
/// Ordering is lexicographic on (width, height), which is what the size
/// negotiation below relies on when picking the largest common size.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Advertised sizes for a format, sorted largest-first by pixel area.
///
/// With `match_ar` the list is restricted to sizes whose aspect ratio matches
/// the reference size within [`ASPECT_RATIO_TOL`].
pub fn available_output_sizes(
    props: &CameraProperties,
    format: StreamFormat,
    match_ar: Option<OutputSize>,
) -> Vec<OutputSize> {
    let mut sizes = props.sizes_for(format).to_vec();
    if let Some(reference) = match_ar {
        let target = reference.aspect_ratio();
        sizes.retain(|s| (s.aspect_ratio() - target).abs() <= ASPECT_RATIO_TOL);
    }
    sizes.sort_by(|a, b| b.area().cmp(&a.area()));
    sizes
}
