//! Verifies that the physical cameras behind one logical camera report
//! matching luma for the same gray target under matched capture settings.
//!
//! One YUV capture per available focal length, all in a single batch; the
//! mean of a centered 1/16 x 1/16 patch per frame must agree across focal
//! lengths within a relative tolerance.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use tracing::info;

use camera_image::{capture_to_planes, capture_to_rgb, image_patch, is_close_rel, plane_mean, write_jpeg};
use camera_session::{
    available_output_sizes, caps, CameraSession, CaptureRequest, OutputSize, StreamConfig,
    StreamFormat,
};

use super::Verdict;

pub const NAME: &str = "multi_camera_match";

/// Patch covers 1/16 x 1/16 of the frame, centered.
const PATCH_SIZE: f64 = 0.0625;
const PATCH_LOC: f64 = (1.0 - PATCH_SIZE) / 2.0;
/// Relative tolerance on max vs min per-focal-length luma mean.
const THRESH_DIFF: f64 = 0.06;

/// Largest YUV size common to all per-camera lists, in (width, height) order.
fn common_yuv_size(per_camera: &[Vec<OutputSize>]) -> Option<OutputSize> {
    let mut common: Option<BTreeSet<OutputSize>> = None;
    for sizes in per_camera {
        let set: BTreeSet<OutputSize> = sizes.iter().copied().collect();
        common = Some(match common {
            None => set,
            Some(prev) => prev.intersection(&set).copied().collect(),
        });
    }
    common.and_then(|set| set.into_iter().next_back())
}

pub fn run(cam: &mut dyn CameraSession, out_dir: &Path) -> Result<Verdict> {
    let props = cam.properties()?;
    if !(caps::compute_target_exposure(&props)
        && caps::per_frame_control(&props)
        && caps::logical_multi_camera(&props)
        && caps::raw16(&props)
        && caps::manual_sensor(&props))
    {
        return Ok(Verdict::Skip("device lacks required capabilities".into()));
    }

    let ids = caps::logical_multi_camera_physical_ids(&props).to_vec();
    let raw_sizes = available_output_sizes(&props, StreamFormat::Raw16, None);
    let Some(max_raw_size) = raw_sizes.first().copied() else {
        return Ok(Verdict::Skip("no RAW16 output sizes advertised".into()));
    };

    // YUV sizes usable by every physical sub-camera, anchored to the RAW
    // aspect ratio.
    let mut yuv_sizes = Vec::with_capacity(ids.len());
    for id in &ids {
        let physical_props = cam.properties_by_id(id)?;
        if caps::mono_camera(&physical_props) {
            return Ok(Verdict::Skip(format!("physical camera {id} is mono")));
        }
        yuv_sizes.push(available_output_sizes(
            &physical_props,
            StreamFormat::Yuv,
            Some(max_raw_size),
        ));
    }
    let Some(size) = common_yuv_size(&yuv_sizes) else {
        return Ok(Verdict::Skip(
            "no common YUV size across physical cameras".into(),
        ));
    };
    println!("Matched YUV size: ({}, {})", size.width, size.height);

    let avail_fls = props.available_focal_lengths.clone();
    if avail_fls.is_empty() {
        return Ok(Verdict::Skip("no available focal lengths".into()));
    }

    cam.do_3a()?;
    let reqs: Vec<CaptureRequest> = avail_fls
        .iter()
        .map(|fl| CaptureRequest::auto().with_focal_length(*fl))
        .collect();

    let streams = [StreamConfig {
        format: StreamFormat::Yuv,
        width: size.width,
        height: size.height,
    }];
    let results = cam.capture(&reqs, &streams)?.into_vec();
    anyhow::ensure!(
        results.len() == reqs.len(),
        "expected {} captures, got {}",
        reqs.len(),
        results.len()
    );

    let mut y_means = Vec::with_capacity(avail_fls.len());
    let mut msg = String::new();
    for (fl, cap) in avail_fls.iter().zip(&results) {
        let rgb = capture_to_rgb(cap)?;
        write_jpeg(out_dir.join(format!("{NAME}_yuv_fl={fl}.jpg")), &rgb)?;

        let planes = capture_to_planes(cap)?;
        let patch = image_patch(&planes.y, PATCH_LOC, PATCH_LOC, PATCH_SIZE, PATCH_SIZE)?;
        let y_mean = plane_mean(&patch)?;
        println!("y[{fl}]: {y_mean:.3}");
        info!(focal_length = *fl, y_mean, "patch mean");
        let _ = write!(msg, "y[{fl}]: {y_mean:.3}, ");
        y_means.push(y_mean);
    }

    let max = y_means.iter().copied().fold(f64::MIN, f64::max);
    let min = y_means.iter().copied().fold(f64::MAX, f64::min);
    let _ = write!(msg, "TOL={THRESH_DIFF:.5}");
    if is_close_rel(max, min, THRESH_DIFF) {
        Ok(Verdict::Pass)
    } else {
        Ok(Verdict::Fail(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_session::fixture::{DeviceFixture, FocalLuma, SceneFixture};
    use camera_session::{CameraProperties, ColorFilter, MockSession};

    fn physical(id: &str, yuv_sizes: Vec<OutputSize>) -> CameraProperties {
        let mut props = CameraProperties::named(id);
        props.yuv_sizes = yuv_sizes;
        props
    }

    fn fixture(lumas: &[(f32, f64)]) -> DeviceFixture {
        let mut camera = CameraProperties::named("0");
        camera.available_focal_lengths = lumas.iter().map(|(fl, _)| *fl).collect();
        camera.manual_sensor = true;
        camera.per_frame_control = true;
        camera.raw16 = true;
        camera.logical_multi_camera = true;
        camera.read_sensor_settings = true;
        camera.physical_ids = vec!["2".into(), "3".into()];
        camera.raw_sizes = vec![OutputSize::new(4000, 3000)];
        camera.exposure_time_range_ns = Some((100_000, 1_000_000_000));
        camera.sensitivity_range = Some((64, 1600));

        let sizes = vec![
            OutputSize::new(1280, 960),
            OutputSize::new(640, 480),
            OutputSize::new(1920, 1080), // 16:9, dropped by the RAW AR match
        ];
        DeviceFixture {
            camera,
            physical_cameras: vec![
                physical("2", sizes.clone()),
                physical("3", sizes),
            ],
            scene: SceneFixture {
                luma: lumas
                    .iter()
                    .map(|(focal_length, luma)| FocalLuma {
                        focal_length: *focal_length,
                        luma: *luma,
                    })
                    .collect(),
                noise: 0.0,
            },
        }
    }

    fn run_fixture(fx: DeviceFixture) -> Verdict {
        let dir = tempfile::tempdir().unwrap();
        let mut session = MockSession::open(fx).unwrap();
        run(&mut session, dir.path()).unwrap()
    }

    #[test]
    fn close_lumas_pass() {
        // 0.50 vs 0.52 quantized: relative diff ~0.04 <= 0.06
        let verdict = run_fixture(fixture(&[(4.38, 0.50), (6.0, 0.52)]));
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn divergent_lumas_fail_with_diagnostics() {
        // 0.50 vs 0.58: relative diff ~0.16 > 0.06
        let verdict = run_fixture(fixture(&[(4.38, 0.50), (6.0, 0.58)]));
        let Verdict::Fail(msg) = verdict else {
            panic!("expected Fail, got {verdict:?}");
        };
        assert!(msg.contains("y[4.38]: 0.502"), "msg: {msg}");
        assert!(msg.contains("y[6]: 0.580"), "msg: {msg}");
        assert!(msg.contains("TOL=0.06000"), "msg: {msg}");
    }

    #[test]
    fn missing_capability_skips() {
        let mut fx = fixture(&[(4.38, 0.50), (6.0, 0.52)]);
        fx.camera.logical_multi_camera = false;
        assert!(matches!(run_fixture(fx), Verdict::Skip(_)));

        let mut fx = fixture(&[(4.38, 0.50), (6.0, 0.52)]);
        fx.camera.raw16 = false;
        assert!(matches!(run_fixture(fx), Verdict::Skip(_)));

        let mut fx = fixture(&[(4.38, 0.50), (6.0, 0.52)]);
        fx.camera.manual_sensor = false;
        assert!(matches!(run_fixture(fx), Verdict::Skip(_)));
    }

    #[test]
    fn mono_sub_camera_skips() {
        let mut fx = fixture(&[(4.38, 0.50), (6.0, 0.52)]);
        fx.physical_cameras[1].color_filter = ColorFilter::Mono;
        assert!(matches!(run_fixture(fx), Verdict::Skip(_)));
    }

    #[test]
    fn disjoint_yuv_sizes_skip() {
        let mut fx = fixture(&[(4.38, 0.50), (6.0, 0.52)]);
        fx.physical_cameras[0].yuv_sizes = vec![OutputSize::new(1280, 960)];
        fx.physical_cameras[1].yuv_sizes = vec![OutputSize::new(640, 480)];
        assert!(matches!(run_fixture(fx), Verdict::Skip(_)));
    }

    #[test]
    fn common_size_is_the_largest_shared_one() {
        let per_camera = vec![
            vec![
                OutputSize::new(1920, 1440),
                OutputSize::new(640, 480),
                OutputSize::new(1280, 960),
            ],
            vec![OutputSize::new(1280, 960), OutputSize::new(640, 480)],
        ];
        assert_eq!(
            common_yuv_size(&per_camera),
            Some(OutputSize::new(1280, 960))
        );
        assert_eq!(common_yuv_size(&[]), None);
    }

    #[test]
    fn snapshots_are_written_per_focal_length() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = MockSession::open(fixture(&[(4.38, 0.50), (6.0, 0.52)])).unwrap();
        run(&mut session, dir.path()).unwrap();
        assert!(dir.path().join("multi_camera_match_yuv_fl=4.38.jpg").exists());
        assert!(dir.path().join("multi_camera_match_yuv_fl=6.jpg").exists());
    }
}
