//! camera-image: capture buffer conversion and patch statistics

mod error;
pub use error::{Error, Result};

mod planes;
pub use planes::{capture_to_planes, Planes};

mod convert;
pub use convert::capture_to_rgb;

mod stats;
pub use stats::{image_patch, is_close_rel, plane_mean, ISCLOSE_ATOL};

mod io;
pub use io::write_jpeg;
