use crate::request::CaptureRequest;
use crate::types::{CameraProperties, CaptureOutput, StreamConfig};
use crate::Result;

/// Converged state reported by a 3A run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThreeAResult {
    pub exposure_time_ns: u64,
    pub sensitivity: u32,
    /// Focus distance in diopters; 0.0 means infinity.
    pub focus_distance: f32,
    pub converged: bool,
}

/// A scoped session to one (possibly logical) camera.
///
/// Sessions are strictly sequential: one caller opens, uses and drops them in
/// a single scope, and the device is released on drop along every exit path.
pub trait CameraSession {
    /// Properties of the opened camera.
    fn properties(&self) -> Result<CameraProperties>;

    /// Properties of a physical sub-camera by id.
    fn properties_by_id(&self, id: &str) -> Result<CameraProperties>;

    /// Converge auto exposure, focus and white balance on the current scene.
    fn do_3a(&mut self) -> Result<ThreeAResult>;

    /// Execute one batched capture: one result per request, in request order.
    fn capture(
        &mut self,
        requests: &[CaptureRequest],
        streams: &[StreamConfig],
    ) -> Result<CaptureOutput>;
}
