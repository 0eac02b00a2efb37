//! Ray/sphere intersection against a candidate set.
//!
//! The detector re-aims one caster per probe direction and intersects it
//! against the neighbor candidates from the spatial search, getting back
//! hits sorted nearest-first. Candidates are treated as spheres centered on
//! their position with their physical size as radius.

use glam::DVec3;

/// A single intersection, measured from the ray origin along the direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f64,
    /// Index of the intersected candidate, as supplied by the caller.
    pub index: usize,
}

pub struct RayCaster {
    origin: DVec3,
    direction: DVec3,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl RayCaster {
    pub fn new() -> Self {
        Self {
            origin: DVec3::ZERO,
            direction: DVec3::X,
        }
    }

    /// Re-aims the caster. `direction` is normalized here so callers may
    /// pass unnormalized probe vectors.
    pub fn set(&mut self, origin: DVec3, direction: DVec3) {
        self.origin = origin;
        self.direction = direction.normalize();
    }

    /// Intersects the ray against candidate spheres `(index, center, radius)`
    /// and returns all hits sorted nearest-first.
    ///
    /// A sphere enclosing the ray origin reports its exit point, so a hit is
    /// never behind the origin.
    pub fn intersect_spheres<I>(&self, candidates: I) -> Vec<RayHit>
    where
        I: IntoIterator<Item = (usize, DVec3, f64)>,
    {
        let mut hits = Vec::new();
        for (index, center, radius) in candidates {
            if let Some(distance) = self.sphere_distance(center, radius) {
                hits.push(RayHit { distance, index });
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn sphere_distance(&self, center: DVec3, radius: f64) -> Option<f64> {
        let to_center = center - self.origin;
        let along = to_center.dot(self.direction);
        let outside = to_center.length_squared() > radius * radius;
        if outside && along < 0.0 {
            // Sphere entirely behind the origin.
            return None;
        }

        let disc = radius * radius - (to_center.length_squared() - along * along);
        if disc < 0.0 {
            return None;
        }

        let sqrt_disc = disc.sqrt();
        let near = along - sqrt_disc;
        if near >= 0.0 {
            Some(near)
        } else {
            let far = along + sqrt_disc;
            (far >= 0.0).then_some(far)
        }
    }
}
