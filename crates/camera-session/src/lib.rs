//! camera-session: scoped camera sessions, properties and capture requests

mod types;
pub use types::{
    CameraProperties, CaptureOutput, CaptureResult, ColorFilter, FrameMetadata, StreamConfig,
    StreamFormat,
};

mod error;
pub use error::{Error, Result};

mod sizes;
pub use sizes::{available_output_sizes, OutputSize, ASPECT_RATIO_TOL};

pub mod caps;

mod request;
pub use request::{CaptureRequest, ControlMode};

mod session;
pub use session::{CameraSession, ThreeAResult};

pub mod fixture;
pub use fixture::{load_fixture_file, DeviceFixture};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockSession;
