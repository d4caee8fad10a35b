// elevmap_core/src/messages.rs

use nalgebra::Point3;

// =========================================================================
// == Measurement Data Structures ==
// =========================================================================

/// A single return from an exteroceptive sensor.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    /// The 3D position of the point in the SENSOR's local coordinate frame.
    pub position: Point3<f64>,
    /// Optional: the confidence ratio the driver reported for this return.
    pub confidence: Option<f32>,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            confidence: None,
        }
    }
}

/// A structured representation of a point cloud from a sensor.
///
/// Point order is index-significant: the variance vector computed for a
/// cloud is positionally aligned with `points`.
#[derive(Clone, Debug)]
pub struct PointCloud {
    /// The frame the point positions are expressed in.
    pub frame_id: String,
    /// The timestamp of when the scan was captured, in seconds.
    pub timestamp: f64,
    /// The collection of points that make up the scan.
    pub points: Vec<Point>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
