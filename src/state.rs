use crate::math::{linkage, Linkage};
use crate::pose::{Pose, PoseSink, RodId};
use crate::trail::Trail;
use crate::viewport::Viewport;
use log::debug;

/// Angle added to θ on every tick, in radians
pub const DELTA_THETA: f64 = 0.05;

/// Owns θ and advances it by a fixed step. Never wraps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleStepper {
    theta: f64,
}

impl AngleStepper {
    pub fn new(theta: f64) -> Self {
        AngleStepper { theta }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn step(&mut self) {
        self.theta += DELTA_THETA;
    }
}

impl Default for AngleStepper {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Simulation state: θ, the viewport it is drawn in, and the endpoint trail
#[derive(Clone, Debug)]
pub struct Simulation {
    stepper: AngleStepper,
    viewport: Viewport,
    trail: Trail,
}

impl Simulation {
    /// Starts at θ = 0 with a viewport fitted to the given area
    pub fn new(available_width: u32, available_height: u32) -> Self {
        Simulation {
            stepper: AngleStepper::default(),
            viewport: Viewport::from_available(available_width, available_height),
            trail: Trail::new(),
        }
    }

    pub fn theta(&self) -> f64 {
        self.stepper.theta()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Joint chain at the current θ and viewport
    pub fn linkage(&self) -> Linkage {
        linkage(self.viewport.center, self.viewport.rod_length, self.theta())
    }

    pub fn current_pose(&self, rod: RodId) -> Pose {
        let linkage = self.linkage();
        match rod {
            RodId::Inner => linkage.inner,
            RodId::Outer => linkage.outer,
        }
    }

    /// Advances the animation by one step.
    ///
    /// Poses for the current θ go to the sinks and the endpoint joins the
    /// trail before θ moves on. Returns the linkage that was pushed.
    pub fn tick(&mut self, inner: &mut impl PoseSink, outer: &mut impl PoseSink) -> Linkage {
        let linkage = self.push_poses(inner, outer);
        self.trail.append(linkage.endpoint);
        self.stepper.step();
        linkage
    }

    /// Refits the viewport to a new available area.
    ///
    /// θ is kept, the rods are repositioned at once and the trail is dropped
    /// since its samples were taken at the old scale.
    pub fn resize(
        &mut self,
        available_width: u32,
        available_height: u32,
        inner: &mut impl PoseSink,
        outer: &mut impl PoseSink,
    ) -> Linkage {
        self.viewport = Viewport::from_available(available_width, available_height);
        debug!(
            "viewport {}x{} (rod length {:.1}) for area {}x{}, discarding {} trail samples",
            self.viewport.width,
            self.viewport.height,
            self.viewport.rod_length,
            available_width,
            available_height,
            self.trail.len()
        );
        let linkage = self.push_poses(inner, outer);
        self.trail.clear();
        linkage
    }

    fn push_poses(&self, inner: &mut impl PoseSink, outer: &mut impl PoseSink) -> Linkage {
        let linkage = self.linkage();
        inner.set_pose(linkage.inner);
        outer.set_pose(linkage.outer);
        linkage
    }
}
