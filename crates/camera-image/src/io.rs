use image::{ImageFormat, RgbImage};
use std::path::Path;

use crate::{Error, Result};

/// Write an RGB snapshot as JPEG.
pub fn write_jpeg(path: impl AsRef<Path>, img: &RgbImage) -> Result<()> {
    img.save_with_format(path.as_ref(), ImageFormat::Jpeg)
        .map_err(|e| Error::Encode(format!("{}: {e}", path.as_ref().display())))
}
