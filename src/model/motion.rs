//! Random-walk motion planning with eased transitions.
//!
//! A cell's movement is a chain of tweens: pick a random in-bounds point,
//! ease toward it over a duration proportional to distance over speed, land
//! exactly on it, pick the next one. Arrival is judged on x and y only; the
//! z component never blocks a retarget.

use crate::model::config::{FeaturesConfig, MotionConfig, WorldConfig};
use crate::model::easing::Easing;
use glam::DVec3;
use rand::Rng;

/// An in-flight eased transition from `origin` toward `target`.
#[derive(Debug, Clone)]
pub struct Tween {
    origin: DVec3,
    pub target: DVec3,
    pub duration_ms: f64,
    elapsed_ms: f64,
    easing: Easing,
}

impl Tween {
    /// Starts a transition. Duration is `distance / speed * viscosity`
    /// milliseconds.
    pub fn start(
        origin: DVec3,
        target: DVec3,
        speed: u32,
        easing: Easing,
        motion: &MotionConfig,
    ) -> Self {
        let distance = origin.distance(target);
        let duration_ms = distance / speed as f64 * motion.viscosity;
        Self {
            origin,
            target,
            duration_ms,
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Advances by `dt_ms` and returns the new position. At or past the full
    /// duration the returned position is exactly `target`, which is what
    /// makes the planner's equality arrival test reliable.
    pub fn advance(&mut self, dt_ms: f64) -> DVec3 {
        self.elapsed_ms += dt_ms;
        if self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms {
            return self.target;
        }
        let k = self.elapsed_ms / self.duration_ms;
        let eased = self.easing.apply(k);
        self.origin + (self.target - self.origin) * eased
    }

    pub fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// The transient visual trail from a cell to its current target. Owned
/// exclusively by the cell; the rendering side reads the endpoints and
/// clears `dirty` after re-uploading them.
#[derive(Debug, Clone)]
pub struct PathTrail {
    pub endpoints: [DVec3; 2],
    pub color: u32,
    pub dirty: bool,
}

impl PathTrail {
    pub fn new(color: u32) -> Self {
        Self {
            endpoints: [DVec3::ZERO, DVec3::ZERO],
            color,
            dirty: false,
        }
    }

    pub fn set_endpoints(&mut self, from: DVec3, to: DVec3) {
        self.endpoints = [from, to];
        self.dirty = true;
    }
}

/// 2D arrival test: x and y must match the target exactly; z is ignored.
pub fn arrived(position: DVec3, target: DVec3) -> bool {
    position.x == target.x && position.y == target.y
}

/// Samples a movement destination uniformly within the world box, keeping a
/// `size + 1` margin from every wall. Coordinates are floored to whole
/// units. Unless depth sampling is enabled, z sits at the fixed mid-depth
/// plane.
pub fn random_point_with_rng<R: Rng>(
    size: f64,
    world: &WorldConfig,
    features: &FeaturesConfig,
    rng: &mut R,
) -> DVec3 {
    let margin = size + 1.0;
    let x = rng.gen_range(margin..world.width - margin).floor();
    let y = rng.gen_range(margin..world.height - margin).floor();
    let z = if features.sample_depth {
        rng.gen_range(margin..world.depth - margin).floor()
    } else {
        world.depth / 2.0
    };
    DVec3::new(x, y, z)
}
