//! Hit chance and damage rolls.
//!
//! The accuracy formula is piecewise in attack roll vs defense roll: once the
//! attack roll exceeds the defense roll the attacker is favored super-linearly;
//! below it the chance decays toward (but never reaches) zero.

use std::fmt;

use crate::combat::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageError {
    NegativeAttackRoll(f64),
    NegativeDefenseRoll(f64),
}

impl fmt::Display for DamageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAttackRoll(roll) => {
                write!(f, "attack roll must be non-negative, got {roll}")
            }
            Self::NegativeDefenseRoll(roll) => {
                write!(f, "defense roll must be non-negative, got {roll}")
            }
        }
    }
}

impl std::error::Error for DamageError {}

/// Probability in [0, 1] that one cast lands.
///
/// - attack > defense: `1 - (defense + 2) / (2 * (attack + 1))`
/// - otherwise:        `attack / (2 * (defense + 1))`
pub fn hit_chance(attack_roll: f64, defense_roll: f64) -> Result<f64, DamageError> {
    if attack_roll < 0.0 {
        return Err(DamageError::NegativeAttackRoll(attack_roll));
    }
    if defense_roll < 0.0 {
        return Err(DamageError::NegativeDefenseRoll(defense_roll));
    }

    let chance = if attack_roll > defense_roll {
        1.0 - (defense_roll + 2.0) / (2.0 * (attack_roll + 1.0))
    } else {
        attack_roll / (2.0 * (defense_roll + 1.0))
    };
    Ok(chance)
}

/// Roll one cast. Returns damage dealt; 0 is a miss. A successful hit never
/// deals zero: the damage draw is uniform over [0, max_hit] and a zero draw is
/// coerced to 1.
pub fn roll_hit(
    attack_roll: f64,
    defense_roll: f64,
    max_hit: u32,
    rng: &mut Rng,
) -> Result<u32, DamageError> {
    let chance = hit_chance(attack_roll, defense_roll)?;
    if rng.next_f64() <= chance {
        let damage = rng.next_range(0, max_hit);
        Ok(damage.max(1))
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_rolls_are_rejected() {
        assert_eq!(
            hit_chance(-1.0, 10.0),
            Err(DamageError::NegativeAttackRoll(-1.0))
        );
        assert_eq!(
            hit_chance(10.0, -1.0),
            Err(DamageError::NegativeDefenseRoll(-1.0))
        );
    }

    #[test]
    fn chance_is_bounded_for_extreme_rolls() {
        for &(attack, defense) in &[
            (0.0, 0.0),
            (0.0, 1e12),
            (1e12, 0.0),
            (1e12, 1e12),
            (1.0, 1e12),
            (1e12, 1.0),
        ] {
            let chance = hit_chance(attack, defense).unwrap();
            assert!(
                (0.0..=1.0).contains(&chance),
                "chance out of bounds for ({attack}, {defense}): {chance}"
            );
        }
    }

    #[test]
    fn certain_hit_never_deals_zero() {
        // attack roll so large the miss branch is unreachable in 10k draws
        let mut rng = Rng::new(3);
        for _ in 0..10_000 {
            let damage = roll_hit(1e15, 0.0, 8, &mut rng).unwrap();
            assert!((1..=8).contains(&damage), "unexpected damage {damage}");
        }
    }
}
