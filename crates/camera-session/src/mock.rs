//! Fixture-driven mock session backend.

use rand::Rng;
use time::OffsetDateTime;

use crate::fixture::DeviceFixture;
use crate::request::CaptureRequest;
use crate::session::{CameraSession, ThreeAResult};
use crate::types::{
    CameraProperties, CaptureOutput, CaptureResult, FrameMetadata, StreamConfig, StreamFormat,
};
use crate::{Error, Result};

/// Simulated camera session over a [`DeviceFixture`].
///
/// Captures are flat gray I420 frames at the scene luma for the request's
/// focal length, with optional uniform sensor noise.
pub struct MockSession {
    fixture: DeviceFixture,
}

impl MockSession {
    pub fn open(fixture: DeviceFixture) -> Result<Self> {
        for id in &fixture.camera.physical_ids {
            if !fixture.physical_cameras.iter().any(|p| &p.id == id) {
                return Err(Error::NotFound(format!(
                    "fixture lists physical id {id} without a properties block"
                )));
            }
        }
        tracing::debug!(camera = %fixture.camera.id, "mock session opened");
        Ok(Self { fixture })
    }

    fn synthesize_frame(
        &self,
        request: &CaptureRequest,
        stream: &StreamConfig,
        request_index: usize,
    ) -> Result<CaptureResult> {
        let focal_length = request.focal_length.ok_or_else(|| {
            Error::InvalidRequest("mock capture requires a focal length".into())
        })?;
        let luma = self.fixture.scene.luma_for(focal_length).ok_or_else(|| {
            Error::Capture(format!("no scene luma for focal length {focal_length}"))
        })?;

        let (w, h) = (stream.width as usize, stream.height as usize);
        let y_len = w * h;
        let chroma_len = (w / 2) * (h / 2);
        let mut data = Vec::with_capacity(y_len + 2 * chroma_len);

        let noise = self.fixture.scene.noise;
        let mut rng = rand::thread_rng();
        for _ in 0..y_len {
            let sample = if noise > 0.0 {
                luma + rng.gen_range(-noise..=noise)
            } else {
                luma
            };
            data.push((sample.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        // Neutral chroma: the target is gray.
        data.resize(y_len + 2 * chroma_len, 128);

        Ok(CaptureResult {
            format: StreamFormat::Yuv,
            width: stream.width,
            height: stream.height,
            data,
            metadata: FrameMetadata {
                request_index,
                physical_id: None,
                ts: Some(OffsetDateTime::now_utc()),
            },
        })
    }
}

impl CameraSession for MockSession {
    fn properties(&self) -> Result<CameraProperties> {
        Ok(self.fixture.camera.clone())
    }

    fn properties_by_id(&self, id: &str) -> Result<CameraProperties> {
        self.fixture
            .physical_cameras
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    fn do_3a(&mut self) -> Result<ThreeAResult> {
        let (exp_lo, exp_hi) = self
            .fixture
            .camera
            .exposure_time_range_ns
            .unwrap_or((1_000_000, 100_000_000));
        let (sens_lo, sens_hi) = self.fixture.camera.sensitivity_range.unwrap_or((100, 800));
        Ok(ThreeAResult {
            exposure_time_ns: exp_lo + (exp_hi - exp_lo) / 2,
            sensitivity: sens_lo + (sens_hi - sens_lo) / 2,
            focus_distance: 0.0,
            converged: true,
        })
    }

    fn capture(
        &mut self,
        requests: &[CaptureRequest],
        streams: &[StreamConfig],
    ) -> Result<CaptureOutput> {
        let stream = match streams {
            [one] => one,
            _ => return Err(Error::Unsupported("mock capture takes exactly one stream")),
        };
        if stream.format != StreamFormat::Yuv {
            return Err(Error::Unsupported("mock capture only synthesizes YUV"));
        }
        if requests.is_empty() {
            return Err(Error::InvalidRequest("no capture requests".into()));
        }

        let mut caps = Vec::with_capacity(requests.len());
        for (i, request) in requests.iter().enumerate() {
            caps.push(self.synthesize_frame(request, stream, i)?);
        }
        // Devices report a lone capture unwrapped; callers must normalize.
        if caps.len() == 1 {
            let Some(cap) = caps.pop() else {
                return Err(Error::Capture("empty capture batch".into()));
            };
            return Ok(CaptureOutput::Single(cap));
        }
        Ok(CaptureOutput::Batch(caps))
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        tracing::debug!(camera = %self.fixture.camera.id, "mock session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FocalLuma, SceneFixture};
    use crate::OutputSize;

    fn fixture() -> DeviceFixture {
        let mut camera = CameraProperties::named("0");
        camera.physical_ids = vec!["2".into()];
        camera.available_focal_lengths = vec![4.38];
        let mut phys = CameraProperties::named("2");
        phys.yuv_sizes = vec![OutputSize::new(64, 48)];
        DeviceFixture {
            camera,
            physical_cameras: vec![phys],
            scene: SceneFixture {
                luma: vec![FocalLuma {
                    focal_length: 4.38,
                    luma: 0.5,
                }],
                noise: 0.0,
            },
        }
    }

    fn yuv_stream(width: u32, height: u32) -> StreamConfig {
        StreamConfig {
            format: StreamFormat::Yuv,
            width,
            height,
        }
    }

    #[test]
    fn open_rejects_missing_physical_block() {
        let mut fx = fixture();
        fx.physical_cameras.clear();
        assert!(MockSession::open(fx).is_err());
    }

    #[test]
    fn lone_capture_comes_back_unwrapped() {
        let mut session = MockSession::open(fixture()).unwrap();
        let reqs = [CaptureRequest::auto().with_focal_length(4.38)];
        let out = session.capture(&reqs, &[yuv_stream(64, 48)]).unwrap();
        assert!(matches!(out, CaptureOutput::Single(_)));
    }

    #[test]
    fn batch_capture_keeps_request_order() {
        let mut fx = fixture();
        fx.scene.luma.push(FocalLuma {
            focal_length: 6.0,
            luma: 0.8,
        });
        let mut session = MockSession::open(fx).unwrap();
        let reqs = [
            CaptureRequest::auto().with_focal_length(4.38),
            CaptureRequest::auto().with_focal_length(6.0),
        ];
        let caps = session
            .capture(&reqs, &[yuv_stream(64, 48)])
            .unwrap()
            .into_vec();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0].metadata.request_index, 0);
        assert_eq!(caps[0].data[0], 128); // 0.5 * 255 rounded
        assert_eq!(caps[1].data[0], 204); // 0.8 * 255
    }

    #[test]
    fn frame_is_well_formed_i420() {
        let mut session = MockSession::open(fixture()).unwrap();
        let reqs = [CaptureRequest::auto().with_focal_length(4.38)];
        let caps = session
            .capture(&reqs, &[yuv_stream(64, 48)])
            .unwrap()
            .into_vec();
        let cap = &caps[0];
        assert_eq!(cap.data.len(), 64 * 48 + 2 * (32 * 24));
        assert_eq!(cap.data[64 * 48], 128); // first U sample is neutral
    }

    #[test]
    fn unknown_focal_length_is_a_capture_error() {
        let mut session = MockSession::open(fixture()).unwrap();
        let reqs = [CaptureRequest::auto().with_focal_length(9.9)];
        assert!(session.capture(&reqs, &[yuv_stream(64, 48)]).is_err());
    }

    #[test]
    fn properties_by_id_rejects_unknown_ids() {
        let session = MockSession::open(fixture()).unwrap();
        assert!(session.properties_by_id("2").is_ok());
        assert!(matches!(
            session.properties_by_id("7"),
            Err(Error::NotFound(_))
        ));
    }
}
