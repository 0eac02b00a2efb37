//! The ecosystem: owner of the cell population and the shared detection
//! machinery, and the scheduler that drives everything once per tick.
//!
//! Tick order is fixed and normative:
//! 1. rebuild the spatial index from current positions,
//! 2. run the detection pass over the immutable snapshot, collecting
//!    commands,
//! 3. apply commands (flashes schedule their delayed reset; spawns queue),
//! 4. fire color resets that have come due on the logical clock,
//! 5. advance motion for every cell,
//! 6. drain the spawn queue into newborn cells.
//!
//! Everything is sequential within a tick; the color-reset queue is the only
//! deferred mechanism and it runs on logical time, so removing a cell simply
//! orphans its pending resets and they are dropped when due.

use crate::model::cell::Cell;
use crate::model::config::AppConfig;
use crate::model::detection::{self, CellCommand, DetectionContext};
use crate::model::history::{timestamp, LiveEvent};
use crate::model::raycast::RayCaster;
use crate::model::reproduction::SpawnRequest;
use crate::model::spatial::SpatialHash;
use crate::model::traits::Color;
use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Grid bucket edge for the spatial index. Comfortably larger than the
/// default search radius so a query rarely touches more than eight buckets.
const SPATIAL_CELL_SIZE: f64 = 10.0;

/// A scheduled revert of a flashed cell's display color. Captures the color
/// at schedule time, not delivery time.
struct ColorReset {
    cell_id: Uuid,
    due_ms: f64,
    color: Color,
}

/// The fixed, ordered probe fan shared by every cell: the six axis
/// directions plus the eight normalized corner diagonals.
pub fn probe_directions() -> Vec<DVec3> {
    let mut rays = vec![
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ];
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                rays.push(DVec3::new(x, y, z).normalize());
            }
        }
    }
    rays
}

pub struct Ecosystem {
    pub config: AppConfig,
    pub cells: Vec<Cell>,
    pub spatial: SpatialHash,
    /// Shared probe directions, identical for every cell.
    pub rays: Vec<DVec3>,
    ray_caster: RayCaster,
    rng: ChaCha8Rng,
    pending_resets: Vec<ColorReset>,
    spawn_queue: Vec<SpawnRequest>,
    pub tick: u64,
    /// Logical clock in milliseconds, advanced by `dt_ms` each tick.
    pub now_ms: f64,
}

impl Ecosystem {
    /// Validates the configuration, seeds the RNG and spawns the initial
    /// population at random in-bounds positions.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let spatial = SpatialHash::new(
            SPATIAL_CELL_SIZE,
            config.world.width,
            config.world.height,
            config.world.depth,
        );

        let cells: Vec<Cell> = (0..config.world.initial_population)
            .map(|_| Cell::with_rng(None, None, &config, &mut rng))
            .collect();

        tracing::info!(
            population = cells.len(),
            seed = ?config.world.seed,
            "ecosystem created"
        );

        Ok(Self {
            config,
            cells,
            spatial,
            rays: probe_directions(),
            ray_caster: RayCaster::new(),
            rng,
            pending_resets: Vec::new(),
            spawn_queue: Vec::new(),
            tick: 0,
            now_ms: 0.0,
        })
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Queues a request for a new cell; it materializes at the end of the
    /// current (or next) tick.
    pub fn spawn_cell(&mut self, request: SpawnRequest) {
        self.spawn_queue.push(request);
    }

    /// Removes a cell and cancels its pending color resets. Returns the
    /// removal event, or `None` if the id is unknown.
    pub fn remove_cell(&mut self, id: Uuid) -> Option<LiveEvent> {
        let idx = self.cells.iter().position(|c| c.id == id)?;
        self.cells.remove(idx);
        self.pending_resets.retain(|r| r.cell_id != id);
        tracing::debug!(cell = %id, "cell removed");
        Some(LiveEvent::Removal {
            id,
            tick: self.tick,
            timestamp: timestamp(),
        })
    }

    /// Advances the simulation by one tick of `dt_ms` logical milliseconds.
    ///
    /// Returns the live events (flashes, births) the tick produced.
    pub fn update(&mut self, dt_ms: f64) -> anyhow::Result<Vec<LiveEvent>> {
        anyhow::ensure!(dt_ms > 0.0, "Tick delta must be positive");
        self.tick += 1;
        self.now_ms += dt_ms;
        let mut events = Vec::new();

        // 1. Fresh spatial snapshot.
        let positions: Vec<DVec3> = self.cells.iter().map(|c| c.position).collect();
        self.spatial.rebuild(&positions);

        // 2. Detection over the immutable snapshot.
        let mut commands = Vec::new();
        {
            let ctx = DetectionContext {
                cells: &self.cells,
                index: &self.spatial,
                rays: &self.rays,
                config: &self.config,
            };
            for idx in 0..ctx.cells.len() {
                commands.extend(detection::detect(&ctx, &mut self.ray_caster, idx));
            }
        }

        // 3. Apply commands sequentially.
        for command in commands {
            match command {
                CellCommand::Flash { cell } => {
                    let alarm = self.config.detection.alarm_color;
                    let cell_ref = &mut self.cells[cell];
                    // Snapshot the trait color now; the reset delivers this
                    // value even if the cell flashes again in the interim.
                    self.pending_resets.push(ColorReset {
                        cell_id: cell_ref.id,
                        due_ms: self.now_ms + self.config.detection.flash_reset_ms as f64,
                        color: cell_ref.traits.color,
                    });
                    cell_ref.set_display_color(alarm);
                    events.push(LiveEvent::Flash {
                        id: cell_ref.id,
                        tick: self.tick,
                        timestamp: timestamp(),
                    });
                }
                CellCommand::Spawn { request } => {
                    self.spawn_queue.push(request);
                }
            }
        }

        // 4. Deliver due color resets; entries for removed cells are dropped.
        let now_ms = self.now_ms;
        let mut due = Vec::new();
        self.pending_resets.retain(|reset| {
            if reset.due_ms <= now_ms {
                due.push((reset.cell_id, reset.color));
                false
            } else {
                true
            }
        });
        for (cell_id, color) in due {
            if let Some(cell) = self.cells.iter_mut().find(|c| c.id == cell_id) {
                cell.set_display_color(color);
            }
        }

        // 5. Motion.
        let config = &self.config;
        let rng = &mut self.rng;
        for cell in &mut self.cells {
            cell.step_motion(dt_ms, config, rng);
        }

        // 6. Births.
        let requests = std::mem::take(&mut self.spawn_queue);
        for request in requests {
            let newborn = Cell::with_rng(
                Some(&request.overrides),
                Some(request.position),
                &self.config,
                &mut self.rng,
            );
            tracing::info!(
                cell = %newborn.id,
                parent = ?request.parent_id,
                "birth"
            );
            events.push(LiveEvent::Birth {
                id: newborn.id,
                parent_id: request.parent_id,
                tick: self.tick,
                timestamp: timestamp(),
            });
            self.cells.push(newborn);
        }

        Ok(events)
    }
}
