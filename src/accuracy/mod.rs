//! Magic accuracy model: effective level and magic attack rating (MAR).
//!
//! Stateless formulas; the simulation loop re-derives them every cast from the
//! combatant's current level.

pub mod prayer;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::damage::{hit_chance, DamageError};

pub use prayer::MagicPrayer;

/// Accuracy bonus from a full set of void knight equipment.
pub const VOID_MAGIC_MULTIPLIER: f64 = 1.45;

/// Accuracy bonus from a slayer-task or salve-amulet effect on the rating.
pub const TASK_SALVE_MULTIPLIER: f64 = 1.15;

/// Flat offset added after all multipliers in the effective-level formula.
pub const EFFECTIVE_LEVEL_OFFSET: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccuracyError {
    /// Prayer multiplier outside the enumerated set.
    InvalidModifier(f64),
}

impl fmt::Display for AccuracyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidModifier(value) => {
                write!(f, "invalid prayer multiplier {value}: not in the enumerated prayer set")
            }
        }
    }
}

impl std::error::Error for AccuracyError {}

/// Effective magic level: `floor((level + boost) * prayer) [* 1.45 if void] + 9`.
///
/// Precondition: `level` and `boost` are the caller's raw stats, both
/// non-negative by construction (unsigned here).
pub fn effective_level(level: u32, boost: u32, prayer: MagicPrayer, void_magic: bool) -> u32 {
    let mut base = (f64::from(level + boost) * prayer.multiplier()).floor();
    if void_magic {
        base = (base * VOID_MAGIC_MULTIPLIER).floor();
    }
    base as u32 + EFFECTIVE_LEVEL_OFFSET
}

/// Magic attack rating: `floor(effective_level * (equipment_bonus + 64))`,
/// times 1.15 when a task/salve effect applies.
///
/// A negative equipment bonus is accepted mathematically; a bonus at or below
/// -64 zeroes the rating and is rejected by scenario validation before any
/// loop runs.
pub fn magic_attack_rating(effective_level: u32, equipment_bonus: i32, task_salve: bool) -> i64 {
    let mut rating = f64::from(effective_level) * (f64::from(equipment_bonus) + 64.0);
    if task_salve {
        rating *= TASK_SALVE_MULTIPLIER;
    }
    rating.floor() as i64
}

/// Per-cast accuracy inputs, bundled so the simulation loop derives the
/// effective level and rating in one place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyContext {
    pub level: u32,
    pub boost: u32,
    pub prayer: MagicPrayer,
    pub void_magic: bool,
    pub equipment_bonus: i32,
    pub task_salve: bool,
}

impl AccuracyContext {
    /// Context for plain casting: no boost, no prayer, no void, no task/salve.
    /// This is the only style the simulation loop currently uses.
    pub fn unboosted(level: u32, equipment_bonus: i32) -> Self {
        Self {
            level,
            boost: 0,
            prayer: MagicPrayer::None,
            void_magic: false,
            equipment_bonus,
            task_salve: false,
        }
    }

    pub fn effective_level(&self) -> u32 {
        effective_level(self.level, self.boost, self.prayer, self.void_magic)
    }

    pub fn attack_rating(&self) -> i64 {
        magic_attack_rating(self.effective_level(), self.equipment_bonus, self.task_salve)
    }

    /// Human-readable accuracy summary against a given defense roll.
    pub fn report(&self, max_hit: u32, defense_roll: f64) -> Result<AccuracyReport, DamageError> {
        let attack_rating = self.attack_rating();
        let chance = hit_chance(attack_rating as f64, defense_roll)?;
        Ok(AccuracyReport {
            effective_level: self.effective_level(),
            attack_rating,
            defense_roll,
            hit_chance: chance,
            average_hit: average_successful_hit(max_hit),
        })
    }
}

/// Expected damage of a successful hit: uniform over [0, max_hit] with the
/// zero draw coerced to 1.
fn average_successful_hit(max_hit: u32) -> f64 {
    let max = f64::from(max_hit);
    (max * (max + 1.0) / 2.0 + 1.0) / (max + 1.0)
}

/// Presentation-layer summary of an [AccuracyContext] against one defender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub effective_level: u32,
    pub attack_rating: i64,
    pub defense_roll: f64,
    pub hit_chance: f64,
    pub average_hit: f64,
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "effective level: {}", self.effective_level)?;
        writeln!(f, "MAR: {}", self.attack_rating)?;
        writeln!(f, "hit chance vs defense roll {:.0}: {:.4}", self.defense_roll, self.hit_chance)?;
        write!(f, "average hit: {:.2}", self.average_hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unboosted_level_10_is_19() {
        assert_eq!(effective_level(10, 0, MagicPrayer::None, false), 19);
    }

    #[test]
    fn void_multiplier_floors_before_offset() {
        // floor(76 * 1.45) = 110, + 9
        assert_eq!(effective_level(76, 0, MagicPrayer::None, true), 119);
    }

    #[test]
    fn average_hit_accounts_for_zero_coercion() {
        // max hit 1: draws 0 and 1 both land as 1
        assert_eq!(average_successful_hit(1), 1.0);
        // max hit 2: draws {0->1, 1, 2} average 4/3
        assert!((average_successful_hit(2) - 4.0 / 3.0).abs() < 1e-12);
    }
}
