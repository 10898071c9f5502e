use crate::pose::{Point, Pose};
use std::f64::consts::PI;

/// Everything derived from (center, rod length, θ) for one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linkage {
    /// Fixed pivot of the inner rod
    pub center: Point,
    /// Far end of the inner rod, where the outer rod is attached
    pub joint: Point,
    /// Far end of the outer rod; the point tracing the curve
    pub endpoint: Point,
    /// Pose of the inner rod (absolute angle θ)
    pub inner: Pose,
    /// Pose of the outer rod (absolute angle πθ)
    pub outer: Pose,
}

/// Offsets `origin` by `length` in the direction of `angle`
pub fn polar_offset(origin: Point, length: f64, angle: f64) -> Point {
    let (sin_a, cos_a) = angle.sin_cos();
    Point::new(origin.x + length * cos_a, origin.y + length * sin_a)
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Midpoint of a segment
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Absolute angle of the outer rod for a given θ
pub fn outer_angle(theta: f64) -> f64 {
    PI * theta
}

/// Computes joint, endpoint and both rod poses.
///
/// Midpoints are taken from the joint chain so the pose view and the curve
/// view can never disagree.
pub fn linkage(center: Point, length: f64, theta: f64) -> Linkage {
    let phi = outer_angle(theta);
    let joint = polar_offset(center, length, theta);
    let endpoint = polar_offset(joint, length, phi);

    Linkage {
        center,
        joint,
        endpoint,
        inner: Pose {
            position: midpoint(center, joint),
            angle: theta,
        },
        outer: Pose {
            position: midpoint(joint, endpoint),
            angle: phi,
        },
    }
}

/// Segment end points for a rod of `length` described by its pose
pub fn rod_ends(pose: &Pose, length: f64) -> (Point, Point) {
    let half = length / 2.0;
    (
        polar_offset(pose.position, -half, pose.angle),
        polar_offset(pose.position, half, pose.angle),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn rods_keep_their_length() {
        let center = Point::new(230.0, 230.0);
        for &length in &[0.0, 1.0, 48.0, 69.0, 1234.5] {
            for i in 0..500 {
                let theta = -10.0 + i as f64 * 0.137;
                let l = linkage(center, length, theta);
                assert!(close(distance(l.center, l.joint), length));
                assert!(close(distance(l.joint, l.endpoint), length));
            }
        }
    }

    #[test]
    fn rod_angles_follow_theta() {
        let l = linkage(Point::new(0.0, 0.0), 10.0, 2.5);
        assert_eq!(l.inner.angle, 2.5);
        assert_eq!(l.outer.angle, PI * 2.5);

        let (sin_t, cos_t) = 2.5f64.sin_cos();
        assert!(close(l.joint.x, 10.0 * cos_t));
        assert!(close(l.joint.y, 10.0 * sin_t));
    }

    #[test]
    fn midpoints_sit_halfway_along_each_rod() {
        let center = Point::new(160.0, 160.0);
        let l = linkage(center, 48.0, 7.3);
        assert_eq!(l.inner.position, midpoint(center, l.joint));
        assert_eq!(l.outer.position, midpoint(l.joint, l.endpoint));
        assert!(close(distance(center, l.inner.position), 24.0));
        assert!(close(distance(l.joint, l.outer.position), 24.0));
    }

    #[test]
    fn theta_zero_lays_both_rods_flat() {
        let l = linkage(Point::new(100.0, 50.0), 20.0, 0.0);
        assert_eq!(l.joint, Point::new(120.0, 50.0));
        assert_eq!(l.endpoint, Point::new(140.0, 50.0));
    }

    #[test]
    fn rod_ends_recover_the_joint_chain() {
        let center = Point::new(240.0, 240.0);
        let l = linkage(center, 72.0, 3.1);

        let (a, b) = rod_ends(&l.inner, 72.0);
        assert!(distance(a, center) < 1e-9);
        assert!(distance(b, l.joint) < 1e-9);

        let (a, b) = rod_ends(&l.outer, 72.0);
        assert!(distance(a, l.joint) < 1e-9);
        assert!(distance(b, l.endpoint) < 1e-9);
    }
}
