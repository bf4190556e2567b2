//! YAML device fixtures for the mock session backend.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::CameraProperties;

/// One simulated device: a logical camera, its physical sub-cameras and the
/// scene they are pointed at.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceFixture {
    pub camera: CameraProperties,
    #[serde(default)]
    pub physical_cameras: Vec<CameraProperties>,
    pub scene: SceneFixture,
}

/// Scene the simulated sensors observe: a flat gray target whose apparent
/// luma depends on which lens (focal length) images it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneFixture {
    pub luma: Vec<FocalLuma>,
    /// Uniform per-pixel noise amplitude in [0,1] luma units.
    #[serde(default)]
    pub noise: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FocalLuma {
    pub focal_length: f32,
    /// Target Y level in [0,1].
    pub luma: f64,
}

impl SceneFixture {
    /// Scene luma for a focal length, matched with a small tolerance so
    /// fixture files can round values.
    pub fn luma_for(&self, focal_length: f32) -> Option<f64> {
        self.luma
            .iter()
            .find(|entry| (entry.focal_length - focal_length).abs() < 1e-3)
            .map(|entry| entry.luma)
    }
}

pub fn load_fixture_file(path: impl AsRef<Path>) -> anyhow::Result<DeviceFixture> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading fixture: {}", path.display()))?;
    let fixture: DeviceFixture = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing fixture yaml: {}", path.display()))?;
    Ok(fixture)
}
