//! Reproduction policy.
//!
//! The only population-growing mutation in the simulation. A collision
//! qualifies when the pair shares a color, differs in gender, and the
//! colliding cell itself is female; the female side is the one that files
//! the spawn request, so a qualifying pair produces exactly one request.

use crate::model::cell::Cell;
use crate::model::traits::{Gender, TraitOverrides, Traits};
use glam::DVec3;
use uuid::Uuid;

/// A request for the ecosystem to add a newborn cell at the end of the
/// current tick. Offspring traits are rolled fresh except for the fields
/// pinned by `overrides`.
#[derive(Debug)]
pub struct SpawnRequest {
    /// `None` for externally requested cells (initial seeding, tests).
    pub parent_id: Option<Uuid>,
    pub position: DVec3,
    pub overrides: TraitOverrides,
}

/// Mating predicate, evaluated from the perspective of the colliding cell.
pub fn can_mate(own: &Traits, partner: &Traits) -> bool {
    own.color == partner.color && own.gender != partner.gender && own.gender == Gender::Female
}

/// Builds the spawn request for a qualifying collision: offspring appears at
/// the parent's current position and inherits only its color.
pub fn offspring_request(parent: &Cell) -> SpawnRequest {
    SpawnRequest {
        parent_id: Some(parent.id),
        position: parent.position,
        overrides: TraitOverrides {
            color: Some(parent.traits.color),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn traits(color: u32, gender: Gender) -> Traits {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(30);
        let mut t = Traits::generate_with_rng(&config.traits, &config.features, &mut rng);
        t.color = color;
        t.gender = gender;
        t
    }

    #[test]
    fn test_qualifying_pair_mates() {
        let own = traits(0xFF6348, Gender::Female);
        let partner = traits(0xFF6348, Gender::Male);
        assert!(can_mate(&own, &partner));
    }

    #[test]
    fn test_color_mismatch_blocks() {
        let own = traits(0xFF6348, Gender::Female);
        let partner = traits(0xF2CB05, Gender::Male);
        assert!(!can_mate(&own, &partner));
    }

    #[test]
    fn test_same_gender_blocks() {
        let own = traits(0xFF6348, Gender::Female);
        let partner = traits(0xFF6348, Gender::Female);
        assert!(!can_mate(&own, &partner));
    }

    #[test]
    fn test_male_side_never_spawns() {
        let own = traits(0xFF6348, Gender::Male);
        let partner = traits(0xFF6348, Gender::Female);
        assert!(!can_mate(&own, &partner));
    }

    #[test]
    fn test_offspring_inherits_color_only() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let parent = Cell::with_rng(None, None, &config, &mut rng);
        let request = offspring_request(&parent);

        assert_eq!(request.parent_id, Some(parent.id));
        assert_eq!(request.position, parent.position);
        assert_eq!(request.overrides.color, Some(parent.traits.color));
        assert!(request.overrides.gender.is_none());
        assert!(request.overrides.speed.is_none());
        assert!(request.overrides.strength.is_none());
    }
}
