//! Easing curves for cell movement transitions.
//!
//! Each cell is born with one curve from this fixed set and keeps it for
//! life; the motion planner applies it to the normalized progress of every
//! transition. The set mirrors the classic tweening catalogue: polynomial
//! In/Out/InOut families plus exponential, circular and an overshooting
//! Back-out.

use rand::Rng;
use serde::{Deserialize, Serialize};

const BACK_OVERSHOOT: f64 = 1.70158;

/// A named easing function mapping normalized progress `k` in `[0, 1]` to an
/// eased factor. `apply(0.0) == 0.0` and `apply(1.0) == 1.0` for every
/// variant; `BackOut` may exceed 1.0 in between.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
    BackOut,
}

impl Easing {
    /// Every curve a generated cell may receive, in catalogue order.
    pub const ALL: [Easing; 20] = [
        Easing::Linear,
        Easing::QuadraticIn,
        Easing::QuadraticOut,
        Easing::QuadraticInOut,
        Easing::QuarticIn,
        Easing::QuarticOut,
        Easing::QuarticInOut,
        Easing::QuinticIn,
        Easing::QuinticOut,
        Easing::QuinticInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::ExponentialIn,
        Easing::ExponentialOut,
        Easing::ExponentialInOut,
        Easing::CircularIn,
        Easing::CircularOut,
        Easing::CircularInOut,
        Easing::BackOut,
    ];

    /// Uniform pick from the catalogue.
    pub fn random_with_rng<R: Rng>(rng: &mut R) -> Easing {
        Easing::ALL[rng.gen_range(0..Easing::ALL.len())]
    }

    /// Applies the curve to normalized progress `k`.
    pub fn apply(self, k: f64) -> f64 {
        match self {
            Easing::Linear => k,
            Easing::QuadraticIn => k * k,
            Easing::QuadraticOut => k * (2.0 - k),
            Easing::QuadraticInOut => {
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * k * k
                } else {
                    let k = k - 1.0;
                    -0.5 * (k * (k - 2.0) - 1.0)
                }
            }
            Easing::CubicIn => k * k * k,
            Easing::CubicOut => {
                let k = k - 1.0;
                k * k * k + 1.0
            }
            Easing::CubicInOut => {
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * k * k * k
                } else {
                    let k = k - 2.0;
                    0.5 * (k * k * k + 2.0)
                }
            }
            Easing::QuarticIn => k * k * k * k,
            Easing::QuarticOut => {
                let k = k - 1.0;
                1.0 - k * k * k * k
            }
            Easing::QuarticInOut => {
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * k * k * k * k
                } else {
                    let k = k - 2.0;
                    -0.5 * (k * k * k * k - 2.0)
                }
            }
            Easing::QuinticIn => k * k * k * k * k,
            Easing::QuinticOut => {
                let k = k - 1.0;
                k * k * k * k * k + 1.0
            }
            Easing::QuinticInOut => {
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * k * k * k * k * k
                } else {
                    let k = k - 2.0;
                    0.5 * (k * k * k * k * k + 2.0)
                }
            }
            Easing::ExponentialIn => {
                if k == 0.0 {
                    0.0
                } else {
                    (2.0_f64).powf(10.0 * (k - 1.0))
                }
            }
            Easing::ExponentialOut => {
                if k == 1.0 {
                    1.0
                } else {
                    1.0 - (2.0_f64).powf(-10.0 * k)
                }
            }
            Easing::ExponentialInOut => {
                if k == 0.0 {
                    return 0.0;
                }
                if k == 1.0 {
                    return 1.0;
                }
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * (2.0_f64).powf(10.0 * (k - 1.0))
                } else {
                    0.5 * (2.0 - (2.0_f64).powf(-10.0 * (k - 1.0)))
                }
            }
            Easing::CircularIn => 1.0 - (1.0 - k * k).sqrt(),
            Easing::CircularOut => {
                let k = k - 1.0;
                (1.0 - k * k).sqrt()
            }
            Easing::CircularInOut => {
                let k = k * 2.0;
                if k < 1.0 {
                    -0.5 * ((1.0 - k * k).sqrt() - 1.0)
                } else {
                    let k = k - 2.0;
                    0.5 * ((1.0 - k * k).sqrt() + 1.0)
                }
            }
            Easing::BackOut => {
                let s = BACK_OVERSHOOT;
                let k = k - 1.0;
                k * k * ((s + 1.0) * k + s) + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_curves_hit_endpoints() {
        for easing in Easing::ALL {
            let start = easing.apply(0.0);
            let end = easing.apply(1.0);
            assert!(
                start.abs() < 1e-9,
                "{easing:?} should start at 0, got {start}"
            );
            assert!(
                (end - 1.0).abs() < 1e-9,
                "{easing:?} should end at 1, got {end}"
            );
        }
    }

    #[test]
    fn test_linear_is_identity() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::Linear.apply(0.75), 0.75);
    }

    #[test]
    fn test_quadratic_in_midpoint() {
        assert!((Easing::QuadraticIn.apply(0.5) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_in_out_symmetry() {
        // InOut curves pass through 0.5 at the midpoint.
        for easing in [
            Easing::QuadraticInOut,
            Easing::CubicInOut,
            Easing::QuarticInOut,
            Easing::QuinticInOut,
            Easing::CircularInOut,
            Easing::ExponentialInOut,
        ] {
            let mid = easing.apply(0.5);
            assert!(
                (mid - 0.5).abs() < 1e-9,
                "{easing:?} midpoint should be 0.5, got {mid}"
            );
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (0..100)
            .map(|i| Easing::BackOut.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "BackOut should overshoot past 1.0, got {peak}");
    }

    #[test]
    fn test_random_pick_stays_in_catalogue() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let easing = Easing::random_with_rng(&mut rng);
            assert!(Easing::ALL.contains(&easing));
        }
    }
}
