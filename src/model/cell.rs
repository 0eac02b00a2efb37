//! Cell state and per-tick behavior.
//!
//! A cell is simulation state only; it *has* drawable state (position, path
//! trail, display color) but is not itself a scene object. The ecosystem
//! drives each cell once per tick: detection first, then any flash, then
//! motion.

use crate::model::config::AppConfig;
use crate::model::motion::{self, PathTrail, Tween};
use crate::model::traits::{Color, TraitOverrides, Traits};
use glam::DVec3;
use rand::Rng;
use uuid::Uuid;

pub struct Cell {
    pub id: Uuid,
    pub traits: Traits,
    pub position: DVec3,
    /// Active transition; `None` until the first movement tick.
    pub tween: Option<Tween>,
    /// Visual trail to the current target, created lazily on first movement.
    pub path: Option<PathTrail>,
    /// What the renderer shows. Normally the trait color; the alarm color
    /// while a collision flash is pending reset.
    pub display_color: Color,
}

impl Cell {
    /// Creates a cell from generated defaults, any per-field trait
    /// overrides, and an optional explicit position. Without a position
    /// override, an in-bounds point is sampled with this cell's own size
    /// margin.
    pub fn with_rng<R: Rng>(
        overrides: Option<&TraitOverrides>,
        position: Option<DVec3>,
        config: &AppConfig,
        rng: &mut R,
    ) -> Cell {
        let mut traits = Traits::generate_with_rng(&config.traits, &config.features, rng);
        if let Some(overrides) = overrides {
            traits = traits.merged(overrides);
        }
        let position = position.unwrap_or_else(|| {
            motion::random_point_with_rng(traits.size, &config.world, &config.features, rng)
        });
        let display_color = traits.color;
        Cell {
            id: Uuid::from_u128(rng.gen()),
            traits,
            position,
            tween: None,
            path: None,
            display_color,
        }
    }

    /// The current movement destination, if a transition has been started.
    pub fn target(&self) -> Option<DVec3> {
        self.tween.as_ref().map(|t| t.target)
    }

    /// True before the first transition and whenever the 2D arrival test
    /// passes against the current target.
    pub fn needs_retarget(&self) -> bool {
        match self.target() {
            None => true,
            Some(target) => motion::arrived(self.position, target),
        }
    }

    /// Movement step: retarget if idle or arrived, advance the active tween
    /// by `dt_ms`, and rewrite the path trail endpoints.
    pub fn step_motion<R: Rng>(&mut self, dt_ms: f64, config: &AppConfig, rng: &mut R) {
        if self.needs_retarget() {
            let target = motion::random_point_with_rng(
                self.traits.size,
                &config.world,
                &config.features,
                rng,
            );
            tracing::debug!(cell = %self.id, ?target, "retarget");
            self.tween = Some(Tween::start(
                self.position,
                target,
                self.traits.speed,
                self.traits.movement,
                &config.motion,
            ));
        }

        if let Some(tween) = self.tween.as_mut() {
            self.position = tween.advance(dt_ms);
        }

        self.refresh_path();
    }

    fn refresh_path(&mut self) {
        let Some(target) = self.target() else {
            return;
        };
        let path = self
            .path
            .get_or_insert_with(|| PathTrail::new(self.traits.color));
        path.set_endpoints(self.position, target);
    }

    /// Forces the display color, as the detector does on collision.
    pub fn set_display_color(&mut self, color: Color) {
        self.display_color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::traits::Gender;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn test_new_cell_has_no_target_or_path() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(20);
        let cell = Cell::with_rng(None, None, &config, &mut rng);
        assert!(cell.target().is_none());
        assert!(cell.path.is_none());
        assert!(cell.needs_retarget());
        assert_eq!(cell.display_color, cell.traits.color);
    }

    #[test]
    fn test_position_override_wins() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let p = DVec3::new(100.0, 100.0, 400.0);
        let cell = Cell::with_rng(None, Some(p), &config, &mut rng);
        assert_eq!(cell.position, p);
    }

    #[test]
    fn test_trait_overrides_applied() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let overrides = TraitOverrides {
            color: Some(0x123456),
            gender: Some(Gender::Male),
            ..Default::default()
        };
        let cell = Cell::with_rng(Some(&overrides), None, &config, &mut rng);
        assert_eq!(cell.traits.color, 0x123456);
        assert_eq!(cell.traits.gender, Gender::Male);
        assert_eq!(cell.display_color, 0x123456);
    }

    #[test]
    fn test_first_step_creates_target_and_path() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut cell = Cell::with_rng(None, None, &config, &mut rng);

        cell.step_motion(16.0, &config, &mut rng);

        let target = cell.target().expect("target set after first step");
        let path = cell.path.as_ref().expect("path created on first step");
        assert!(path.dirty);
        assert_eq!(path.endpoints[0], cell.position);
        assert_eq!(path.endpoints[1], target);
    }

    #[test]
    fn test_path_tracks_position_every_step() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        let mut cell = Cell::with_rng(None, None, &config, &mut rng);

        for _ in 0..5 {
            cell.step_motion(16.0, &config, &mut rng);
            let path = cell.path.as_ref().unwrap();
            assert_eq!(path.endpoints[0], cell.position);
            assert_eq!(path.endpoints[1], cell.target().unwrap());
        }
    }

    #[test]
    fn test_retarget_after_arrival() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(25);
        let mut cell = Cell::with_rng(None, None, &config, &mut rng);
        cell.step_motion(16.0, &config, &mut rng);
        let first_target = cell.target().unwrap();

        // Run long enough to guarantee arrival and a fresh transition.
        let mut retargeted = false;
        for _ in 0..100_000 {
            cell.step_motion(16.0, &config, &mut rng);
            if cell.target().unwrap() != first_target {
                retargeted = true;
                break;
            }
        }
        assert!(retargeted, "cell never picked a new target");
    }

    #[test]
    fn test_matching_xy_retargets_despite_z_mismatch() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(26);
        let mut cell = Cell::with_rng(None, None, &config, &mut rng);
        cell.step_motion(16.0, &config, &mut rng);
        let target = cell.target().unwrap();

        // Matching x,y but a different z still counts as arrived.
        cell.position = DVec3::new(target.x, target.y, target.z + 50.0);
        assert!(cell.needs_retarget());
    }
}
