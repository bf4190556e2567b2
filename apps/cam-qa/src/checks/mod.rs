//! Scripted acceptance checks.
//!
//! Each check runs a sequential capture script against a [`camera_session::
//! CameraSession`] and produces a [`Verdict`]. Capability shortfalls skip,
//! measurement breaches fail, everything else propagates as an error.

pub mod multi_camera_match;

/// Outcome of one check run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// A required capability is absent; not a failure.
    Skip(String),
    /// The measured values breached the check's tolerance.
    Fail(String),
}
