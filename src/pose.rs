/// A point on the drawing surface, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Pose of a rod: where its centroid sits and how it is rotated
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Midpoint of the rod
    pub position: Point,
    /// Absolute angle in radians
    pub angle: f64,
}

/// Identifies one of the two rods
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RodId {
    /// Rod anchored at the viewport center
    Inner,
    /// Rod hanging off the inner joint
    Outer,
}

/// Anything that accepts a pose from outside each step.
///
/// The rods are kinematic: they never move on their own, so the only way
/// their position changes is through this trait.
pub trait PoseSink {
    fn set_pose(&mut self, pose: Pose);
}
