// elevmap_input/tests/input_sources.rs

//! End-to-end scenarios: a declarative source description all the way to
//! per-point variances.

use approx::assert_abs_diff_eq;
use figment::providers::{Format, Toml};
use figment::value::Value;
use figment::Figment;

use elevmap_core::prelude::*;
use elevmap_input::{ConfigError, InputSource, NamespaceResolver};

fn value_of(toml: &str) -> Value {
    Figment::new()
        .merge(Toml::string(toml))
        .extract::<Value>()
        .unwrap()
}

fn general() -> GeneralParameters {
    GeneralParameters::new("base_link", "map")
}

fn cloud_of(points: Vec<Point>) -> PointCloud {
    PointCloud {
        frame_id: "camera_depth_optical_frame".to_string(),
        timestamp: 42.0,
        points,
    }
}

#[test]
fn perfect_source_yields_equal_floor_variances() {
    let description = value_of(
        r#"
        type = "pointcloud"
        topic = "/cam/points"
        queue_size = 1
        publish_on_update = true

        [sensor_processor]
        type = "perfect"
    "#,
    );
    let source = InputSource::configure("ground_truth", &description, &general()).unwrap();

    let resolver = NamespaceResolver::new("/robot");
    assert_eq!(source.subscribed_topic(&resolver), "/cam/points");

    // A non-trivial pose covariance must not change the perfect output.
    let mut covariance = PoseCovariance::identity();
    covariance *= 0.2;

    let cloud = cloud_of(
        (0..100)
            .map(|i| Point::new(0.05 * i as f64, -0.02 * i as f64, 1.0 + 0.01 * i as f64))
            .collect(),
    );
    let variances = source
        .sensor_processor()
        .compute_variances(&cloud, &covariance)
        .unwrap();

    assert_eq!(variances.len(), 100);
    let first = variances[0];
    assert!(first > 0.0);
    for variance in variances.iter() {
        assert_abs_diff_eq!(*variance, first, epsilon = 0.0);
    }
}

#[test]
fn laser_source_variance_grows_with_range() {
    let description = value_of(
        r#"
        type = "pointcloud"
        topic = "scan/points"
        queue_size = 10
        publish_on_update = false

        [sensor_processor]
        type = "laser"
        min_radius = 0.02
        beam_constant = 0.01
        beam_angle = 0.005
    "#,
    );
    let source = InputSource::configure("front_lidar", &description, &general()).unwrap();

    let resolver = NamespaceResolver::new("/robot");
    assert_eq!(source.subscribed_topic(&resolver), "/robot/scan/points");

    // Same bearing, ranges 1 m and 10 m, no pose uncertainty.
    let cloud = cloud_of(vec![Point::new(1.0, 0.0, 0.0), Point::new(10.0, 0.0, 0.0)]);
    let variances = source
        .sensor_processor()
        .compute_variances(&cloud, &PoseCovariance::zeros())
        .unwrap();

    assert_eq!(variances.len(), 2);
    assert!(variances[1] > variances[0]);
}

#[test]
fn negative_queue_size_leaves_nothing_configured() {
    let description = value_of(
        r#"
        type = "pointcloud"
        topic = "/cam/points"
        queue_size = -1
        publish_on_update = true

        [sensor_processor]
        type = "perfect"
    "#,
    );
    let result = InputSource::configure("camera", &description, &general());
    assert_eq!(
        result.unwrap_err(),
        ConfigError::InvalidQueueSize {
            name: "camera".to_string(),
            value: -1,
        }
    );
}

#[test]
fn stereo_source_outgrows_laser_at_depth() {
    let laser = InputSource::configure(
        "lidar",
        &value_of(
            r#"
            type = "pointcloud"
            topic = "scan"
            queue_size = 1
            publish_on_update = true
            [sensor_processor]
            type = "laser"
            min_radius = 0.02
            beam_constant = 0.01
            beam_angle = 0.005
        "#,
        ),
        &general(),
    )
    .unwrap();
    let stereo = InputSource::configure(
        "stereo_cam",
        &value_of(
            r#"
            type = "pointcloud"
            topic = "points2"
            queue_size = 1
            publish_on_update = true
            [sensor_processor]
            type = "stereo"
            focal_length = 700.0
            baseline = 0.12
            disparity_std = 0.5
            lateral_factor = 0.01
        "#,
        ),
        &general(),
    )
    .unwrap();

    // Identical deep points, no pose uncertainty: the disparity model's
    // quartic growth overtakes the laser's quadratic one.
    let cloud = cloud_of(vec![Point::new(0.0, 0.0, 20.0)]);
    let covariance = PoseCovariance::zeros();
    let v_laser = laser
        .sensor_processor()
        .compute_variances(&cloud, &covariance)
        .unwrap()[0];
    let v_stereo = stereo
        .sensor_processor()
        .compute_variances(&cloud, &covariance)
        .unwrap()[0];
    assert!(v_stereo > v_laser);
}

#[test]
fn mounted_sensor_picks_up_pose_uncertainty() {
    let description = value_of(
        r#"
        type = "pointcloud"
        topic = "depth/points"
        queue_size = 1
        publish_on_update = true

        [sensor_processor]
        type = "structured_light"
        normal_factor_a = 0.0012
        normal_factor_b = 0.0019
        normal_factor_c = 0.4
        normal_factor_d = 0.0001
        normal_factor_e = 2.0
        lateral_factor = 0.015

        [sensor_processor.mounting]
        translation = [0.3, 0.0, 0.5]
        rotation_rpy = [0.0, 0.7853981633974483, 0.0]
    "#,
    );
    let source = InputSource::configure("depth_camera", &description, &general()).unwrap();

    let cloud = cloud_of(vec![Point::new(0.0, 0.0, 2.0)]);
    let calm = source
        .sensor_processor()
        .compute_variances(&cloud, &PoseCovariance::zeros())
        .unwrap()[0];

    let mut covariance = PoseCovariance::zeros();
    covariance[(4, 4)] = 0.02; // pitch uncertainty
    let shaky = source
        .sensor_processor()
        .compute_variances(&cloud, &covariance)
        .unwrap()[0];

    assert!(shaky > calm);
}
