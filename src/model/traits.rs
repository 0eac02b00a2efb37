//! Trait generation for newborn cells.
//!
//! A trait set is rolled once at birth and never mutated. The generator is a
//! pure function of the RNG it is handed; every range it draws from comes
//! from [`TraitsConfig`](crate::model::config::TraitsConfig) rather than
//! module-level constants.

use crate::model::config::{FeaturesConfig, TraitsConfig};
use crate::model::easing::Easing;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Display color as a packed 0xRRGGBB value.
pub type Color = u32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// The immutable attribute set of a single cell.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Traits {
    pub color: Color,
    /// Perception stat. Generated and carried, but not consulted by the
    /// detector; gated by `features.sight_trait`.
    pub sight: Option<u32>,
    pub strength: u32,
    /// Physical radius, derived from `strength` and always in `[2, 5]`.
    pub size: f64,
    pub movement: Easing,
    pub speed: u32,
    pub gender: Gender,
    pub energy: u32,
}

/// Per-field overrides merged over a freshly generated trait set; a present
/// field wins, an absent one keeps the generated value.
#[derive(Debug, Clone, Default)]
pub struct TraitOverrides {
    pub color: Option<Color>,
    pub sight: Option<u32>,
    pub strength: Option<u32>,
    pub movement: Option<Easing>,
    pub speed: Option<u32>,
    pub gender: Option<Gender>,
    pub energy: Option<u32>,
}

/// Maps a strength roll onto the physical size range `[2, 5]`.
pub fn size_from_strength(strength: u32) -> f64 {
    (strength as f64 / 10.0).clamp(2.0, 5.0).round()
}

impl Traits {
    /// Rolls a complete trait set from the given RNG.
    pub fn generate_with_rng<R: Rng>(
        traits: &TraitsConfig,
        features: &FeaturesConfig,
        rng: &mut R,
    ) -> Traits {
        let color = traits.palette[rng.gen_range(0..traits.palette.len())];
        let sight = features
            .sight_trait
            .then(|| rng.gen_range(traits.min_attribute..=traits.max_attribute));
        let strength = rng.gen_range(traits.min_attribute..=traits.max_attribute);
        let movement = Easing::random_with_rng(rng);
        let speed = rng.gen_range(traits.min_speed..traits.max_speed);
        let gender = if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };

        Traits {
            color,
            sight,
            strength,
            size: size_from_strength(strength),
            movement,
            speed,
            gender,
            energy: 100,
        }
    }

    /// Applies a shallow per-field merge; `size` is re-derived when the
    /// override changes `strength`.
    pub fn merged(mut self, overrides: &TraitOverrides) -> Traits {
        if let Some(color) = overrides.color {
            self.color = color;
        }
        if let Some(sight) = overrides.sight {
            self.sight = Some(sight);
        }
        if let Some(strength) = overrides.strength {
            self.strength = strength;
            self.size = size_from_strength(strength);
        }
        if let Some(movement) = overrides.movement {
            self.movement = movement;
        }
        if let Some(speed) = overrides.speed {
            self.speed = speed;
        }
        if let Some(gender) = overrides.gender {
            self.gender = gender;
        }
        if let Some(energy) = overrides.energy {
            self.energy = energy;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::AppConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_values_stay_in_range() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let traits = Traits::generate_with_rng(&config.traits, &config.features, &mut rng);
            assert!(config.traits.palette.contains(&traits.color));
            assert!((1..=100).contains(&traits.strength));
            assert!((1..=100).contains(&traits.sight.expect("sight enabled by default")));
            assert!((10..100).contains(&traits.speed));
            assert!((2.0..=5.0).contains(&traits.size));
            assert_eq!(traits.energy, 100);
        }
    }

    #[test]
    fn test_size_derivation_boundaries() {
        assert_eq!(size_from_strength(1), 2.0);
        assert_eq!(size_from_strength(20), 2.0);
        assert_eq!(size_from_strength(24), 2.0);
        assert_eq!(size_from_strength(35), 4.0);
        assert_eq!(size_from_strength(50), 5.0);
        assert_eq!(size_from_strength(100), 5.0);
    }

    #[test]
    fn test_sight_gated_by_feature_flag() {
        let mut config = AppConfig::default();
        config.features.sight_trait = false;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let traits = Traits::generate_with_rng(&config.traits, &config.features, &mut rng);
        assert!(traits.sight.is_none());
    }

    #[test]
    fn test_override_merge_wins_per_field() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let base = Traits::generate_with_rng(&config.traits, &config.features, &mut rng);
        let base_speed = base.speed;

        let merged = base.merged(&TraitOverrides {
            color: Some(0xABCDEF),
            gender: Some(Gender::Female),
            ..Default::default()
        });

        assert_eq!(merged.color, 0xABCDEF);
        assert_eq!(merged.gender, Gender::Female);
        assert_eq!(merged.speed, base_speed);
    }

    #[test]
    fn test_override_strength_rederives_size() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let base = Traits::generate_with_rng(&config.traits, &config.features, &mut rng);
        let merged = base.merged(&TraitOverrides {
            strength: Some(100),
            ..Default::default()
        });
        assert_eq!(merged.size, 5.0);
    }

    #[test]
    fn test_gender_is_roughly_fair() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let females = (0..1000)
            .filter(|_| {
                Traits::generate_with_rng(&config.traits, &config.features, &mut rng).gender
                    == Gender::Female
            })
            .count();
        assert!((300..=700).contains(&females), "got {females} females");
    }
}
