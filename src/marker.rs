//! Optical tracker frames and markers.
//!
//! The tracker transport itself is out of scope (see the crate documentation); this module
//! only defines the wire shape the core consumes: a timestamped list of unlabeled 3D markers.

use crate::geometry::Point3;

/// A single optical marker reported by the tracker, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: u32,
    pub x_mm: f64,
    pub y_mm: f64,
    pub z_mm: f64,
}

impl Marker {
    pub fn new(id: u32, x_mm: f64, y_mm: f64, z_mm: f64) -> Self {
        Marker { id, x_mm, y_mm, z_mm }
    }

    /// Converts this marker's position from millimeters to meters.
    pub fn position_m(&self) -> Point3 {
        Point3::new(self.x_mm / 1000.0, self.y_mm / 1000.0, self.z_mm / 1000.0)
    }
}

/// One tracker frame: a timestamp in microseconds and the unlabeled markers seen this frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub timestamp_us: u64,
    pub markers: Vec<Marker>,
}

impl Frame {
    pub fn new(timestamp_us: u64, markers: Vec<Marker>) -> Self {
        Frame { timestamp_us, markers }
    }

    pub fn find(&self, id: u32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }
}
