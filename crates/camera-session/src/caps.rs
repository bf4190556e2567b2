//! Capability predicates over [`CameraProperties`].
//!
//! Checks gate on these and skip (rather than fail) when a required
//! capability is absent.

use crate::types::{CameraProperties, ColorFilter};

pub fn manual_sensor(props: &CameraProperties) -> bool {
    props.manual_sensor
}

pub fn per_frame_control(props: &CameraProperties) -> bool {
    props.per_frame_control
}

pub fn raw16(props: &CameraProperties) -> bool {
    props.raw16 && !props.raw_sizes.is_empty()
}

/// True when the camera is a logical grouping of at least two physical ones.
pub fn logical_multi_camera(props: &CameraProperties) -> bool {
    props.logical_multi_camera && props.physical_ids.len() >= 2
}

pub fn logical_multi_camera_physical_ids(props: &CameraProperties) -> &[String] {
    &props.physical_ids
}

pub fn mono_camera(props: &CameraProperties) -> bool {
    props.color_filter == ColorFilter::Mono
}

/// True when a target exposure can be computed: manual sensor control plus
/// usable exposure and sensitivity ranges.
pub fn compute_target_exposure(props: &CameraProperties) -> bool {
    props.manual_sensor
        && props
            .exposure_time_range_ns
            .is_some_and(|(lo, hi)| lo < hi)
        && props.sensitivity_range.is_some_and(|(lo, hi)| lo < hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capable() -> CameraProperties {
        let mut props = CameraProperties::named("0");
        props.manual_sensor = true;
        props.per_frame_control = true;
        props.raw16 = true;
        props.raw_sizes = vec![crate::OutputSize::new(4000, 3000)];
        props.logical_multi_camera = true;
        props.physical_ids = vec!["2".into(), "3".into()];
        props.exposure_time_range_ns = Some((100_000, 1_000_000_000));
        props.sensitivity_range = Some((64, 1600));
        props
    }

    #[test]
    fn capable_device_passes_all_gates() {
        let props = capable();
        assert!(manual_sensor(&props));
        assert!(per_frame_control(&props));
        assert!(raw16(&props));
        assert!(logical_multi_camera(&props));
        assert!(compute_target_exposure(&props));
        assert!(!mono_camera(&props));
    }

    #[test]
    fn raw16_requires_advertised_sizes() {
        let mut props = capable();
        props.raw_sizes.clear();
        assert!(!raw16(&props));
    }

    #[test]
    fn logical_needs_two_physical_ids() {
        let mut props = capable();
        props.physical_ids.truncate(1);
        assert!(!logical_multi_camera(&props));
    }

    #[test]
    fn target_exposure_needs_usable_ranges() {
        let mut props = capable();
        props.exposure_time_range_ns = None;
        assert!(!compute_target_exposure(&props));

        let mut props = capable();
        props.sensitivity_range = Some((100, 100));
        assert!(!compute_target_exposure(&props));
    }

    #[test]
    fn mono_flag_follows_color_filter() {
        let mut props = capable();
        props.color_filter = ColorFilter::Mono;
        assert!(mono_camera(&props));
    }
}
