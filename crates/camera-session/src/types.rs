use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::sizes::OutputSize;

/// Output stream pixel format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamFormat {
    /// Planar 8-bit YUV 4:2:0 (I420: full-res Y, then quarter-res U and V).
    Yuv,
    /// 16-bit Bayer RAW.
    Raw16,
    Jpeg,
}

/// One requested output stream for a capture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub format: StreamFormat,
    pub width: u32,
    pub height: u32,
}

/// Sensor color filter arrangement; mono sensors have a single channel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFilter {
    #[default]
    Rgb,
    Mono,
}

/// Read-only description of one physical or logical camera.
///
/// Supplied by the session (or a fixture file); never mutated by callers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraProperties {
    pub id: String,
    #[serde(default)]
    pub available_focal_lengths: Vec<f32>,
    #[serde(default)]
    pub manual_sensor: bool,
    #[serde(default)]
    pub per_frame_control: bool,
    #[serde(default)]
    pub raw16: bool,
    #[serde(default)]
    pub logical_multi_camera: bool,
    #[serde(default)]
    pub read_sensor_settings: bool,
    /// Ids of the physical sub-cameras; non-empty only for a logical camera.
    #[serde(default)]
    pub physical_ids: Vec<String>,
    #[serde(default)]
    pub color_filter: ColorFilter,
    #[serde(default)]
    pub yuv_sizes: Vec<OutputSize>,
    #[serde(default)]
    pub raw_sizes: Vec<OutputSize>,
    #[serde(default)]
    pub jpeg_sizes: Vec<OutputSize>,
    /// Supported exposure time range in nanoseconds.
    #[serde(default)]
    pub exposure_time_range_ns: Option<(u64, u64)>,
    /// Supported analog sensitivity (ISO) range.
    #[serde(default)]
    pub sensitivity_range: Option<(u32, u32)>,
}

impl CameraProperties {
    /// An empty properties block with only the id set.
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            available_focal_lengths: Vec::new(),
            manual_sensor: false,
            per_frame_control: false,
            raw16: false,
            logical_multi_camera: false,
            read_sensor_settings: false,
            physical_ids: Vec::new(),
            color_filter: ColorFilter::Rgb,
            yuv_sizes: Vec::new(),
            raw_sizes: Vec::new(),
            jpeg_sizes: Vec::new(),
            exposure_time_range_ns: None,
            sensitivity_range: None,
        }
    }

    pub fn sizes_for(&self, format: StreamFormat) -> &[OutputSize] {
        match format {
            StreamFormat::Yuv => &self.yuv_sizes,
            StreamFormat::Raw16 => &self.raw_sizes,
            StreamFormat::Jpeg => &self.jpeg_sizes,
        }
    }
}

/// Bookkeeping attached to each capture result.
#[derive(Clone, Debug)]
pub struct FrameMetadata {
    /// Index of the request this result answers.
    pub request_index: usize,
    /// Physical camera the frame was routed to, when the device reports it.
    pub physical_id: Option<String>,
    pub ts: Option<OffsetDateTime>,
}

/// One captured buffer bundle, convertible to pixel planes downstream.
#[derive(Clone, Debug)]
pub struct CaptureResult {
    pub format: StreamFormat,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub metadata: FrameMetadata,
}

/// Capture output as reported by a session.
///
/// A lone capture may come back as either variant; callers normalize with
/// [`CaptureOutput::into_vec`].
#[derive(Clone, Debug)]
pub enum CaptureOutput {
    Single(CaptureResult),
    Batch(Vec<CaptureResult>),
}

impl CaptureOutput {
    pub fn into_vec(self) -> Vec<CaptureResult> {
        match self {
            Self::Single(cap) => vec![cap],
            Self::Batch(caps) => caps,
        }
    }
}
