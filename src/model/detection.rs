//! Collision and sight detection.
//!
//! Runs once per cell per tick over an immutable snapshot of the world.
//! Nothing here mutates; the pass emits [`CellCommand`]s that the ecosystem
//! applies sequentially afterwards, which keeps the borrow story trivial and
//! the tick order deterministic.
//!
//! A cell first asks the spatial index for everything within the search
//! radius. If it is alone it stops there; otherwise it sweeps the shared
//! probe directions, intersecting each ray against the neighbor set and
//! looking only at the nearest hit per ray. Hits within the cell's own size
//! are collisions; anything farther is merely in sight.

use crate::model::cell::Cell;
use crate::model::config::AppConfig;
use crate::model::raycast::RayCaster;
use crate::model::reproduction::{self, SpawnRequest};
use crate::model::spatial::SpatialHash;
use glam::DVec3;
use std::collections::HashSet;

/// Classification of a probe's nearest intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeClass {
    /// Within the probing cell's physical size.
    Collision,
    /// Detected by the probe but beyond the size radius. Reserved for
    /// future behavior; currently no action is taken.
    InSight,
}

/// A hit at exactly the size boundary counts as a collision.
pub fn classify(distance: f64, size: f64) -> ProbeClass {
    if distance <= size {
        ProbeClass::Collision
    } else {
        ProbeClass::InSight
    }
}

/// Side effects requested by a detection pass, applied by the ecosystem
/// after every cell has been examined.
#[derive(Debug)]
pub enum CellCommand {
    /// Force the cell's display color to the alarm color and schedule the
    /// delayed reset.
    Flash { cell: usize },
    /// File a spawn request on behalf of the cell.
    Spawn { request: SpawnRequest },
}

/// Read-only view of the world handed to the detector.
pub struct DetectionContext<'a> {
    pub cells: &'a [Cell],
    pub index: &'a SpatialHash,
    pub rays: &'a [DVec3],
    pub config: &'a AppConfig,
}

/// Examines the surroundings of `cells[idx]` and returns the commands its
/// collisions produce.
pub fn detect(ctx: &DetectionContext<'_>, caster: &mut RayCaster, idx: usize) -> Vec<CellCommand> {
    let cell = &ctx.cells[idx];
    let neighbors = ctx
        .index
        .search(cell.position, ctx.config.detection.search_radius);

    // Only ourselves in range: nothing can collide, skip the probe sweep.
    if neighbors.len() <= 1 {
        return Vec::new();
    }

    let candidates: Vec<(usize, DVec3, f64)> = neighbors
        .iter()
        .filter(|&&other| other != idx)
        .map(|&other| {
            let neighbor = &ctx.cells[other];
            (other, neighbor.position, neighbor.traits.size)
        })
        .collect();

    let mut commands = Vec::new();
    let mut flashed = false;
    // One spawn per unique partner per pass, however many probes hit it.
    let mut mated: HashSet<usize> = HashSet::new();

    for &ray in ctx.rays {
        caster.set(cell.position, ray);
        let hits = caster.intersect_spheres(candidates.iter().copied());
        let Some(nearest) = hits.first() else {
            continue;
        };

        match classify(nearest.distance, cell.traits.size) {
            ProbeClass::Collision => {
                tracing::debug!(
                    cell = %cell.id,
                    partner = %ctx.cells[nearest.index].id,
                    distance = nearest.distance,
                    "collision"
                );
                if ctx.config.features.collision_flash && !flashed {
                    commands.push(CellCommand::Flash { cell: idx });
                    flashed = true;
                }
                if ctx.config.reproduction.enabled
                    && ctx.config.features.spawn_on_collision
                    && !mated.contains(&nearest.index)
                    && reproduction::can_mate(&cell.traits, &ctx.cells[nearest.index].traits)
                {
                    mated.insert(nearest.index);
                    commands.push(CellCommand::Spawn {
                        request: reproduction::offspring_request(cell),
                    });
                }
            }
            ProbeClass::InSight => {
                // In sight. No behavior attached yet.
            }
        }
    }

    commands
}
