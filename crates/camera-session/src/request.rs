use serde::{Deserialize, Serialize};

/// Mode for one 3A routine (auto exposure, auto focus, auto white balance).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    #[default]
    Auto,
    /// Routine disabled; the manual fields on the request apply.
    Off,
}

/// Per-capture control settings, built once per capture and consumed by
/// [`crate::CameraSession::capture`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub ae_mode: ControlMode,
    pub af_mode: ControlMode,
    pub awb_mode: ControlMode,
    /// Target lens focal length in millimeters; selects the physical camera
    /// on a logical multi-camera device.
    pub focal_length: Option<f32>,
    pub exposure_time_ns: Option<u64>,
    pub sensitivity: Option<u32>,
}

impl CaptureRequest {
    /// Baseline request with all 3A routines on auto and no overrides.
    pub fn auto() -> Self {
        Self {
            ae_mode: ControlMode::Auto,
            af_mode: ControlMode::Auto,
            awb_mode: ControlMode::Auto,
            focal_length: None,
            exposure_time_ns: None,
            sensitivity: None,
        }
    }

    /// Fully manual request at the given exposure settings.
    pub fn manual(exposure_time_ns: u64, sensitivity: u32) -> Self {
        Self {
            ae_mode: ControlMode::Off,
            af_mode: ControlMode::Off,
            awb_mode: ControlMode::Off,
            focal_length: None,
            exposure_time_ns: Some(exposure_time_ns),
            sensitivity: Some(sensitivity),
        }
    }

    pub fn with_focal_length(mut self, focal_length: f32) -> Self {
        self.focal_length = Some(focal_length);
        self
    }
}
