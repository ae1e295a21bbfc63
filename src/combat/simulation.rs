//! The combat training loop: cast at one target until it dies, gaining
//! experience (and therefore levels, max hit, and accuracy) as you go.
//!
//! This is the one canonical implementation of the loop; the batch runner
//! replays it with derived per-round seeds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::accuracy::AccuracyContext;
use crate::combat::damage::{self, DamageError};
use crate::combat::rng::{Rng, RngError};
use crate::xp::{XpError, XpTable};

/// Bonus XP granted per point of damage dealt, before the scenario multiplier.
pub const XP_PER_DAMAGE: f64 = 2.0;

/// Step function from magic level to the spell's max hit.
///
/// Policy table: replaceable, but defaults to the spell's exact breakpoints
/// (level < 4 -> 2, < 9 -> 4, < 13 -> 6, else 8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxHitTable {
    /// `(level_below, max_hit)` pairs in ascending level order; the first
    /// entry whose bound exceeds the level wins.
    pub breakpoints: Vec<(u32, u32)>,
    /// Max hit at or above the last breakpoint.
    pub top: u32,
}

impl Default for MaxHitTable {
    fn default() -> Self {
        Self {
            breakpoints: vec![(4, 2), (9, 4), (13, 6)],
            top: 8,
        }
    }
}

impl MaxHitTable {
    pub fn max_hit_for(&self, level: u32) -> u32 {
        for &(bound, max_hit) in &self.breakpoints {
            if level < bound {
                return max_hit;
            }
        }
        self.top
    }

    /// Smallest max hit the table can produce at any level.
    fn min_max_hit(&self) -> u32 {
        self.breakpoints
            .iter()
            .map(|&(_, max_hit)| max_hit)
            .chain([self.top])
            .min()
            .unwrap_or(self.top)
    }
}

/// Inputs for one kill simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillScenario {
    pub target_hitpoints: i64,
    pub start_level: u32,
    /// Max hit before the first recompute; the policy table takes over from
    /// the first cast onward.
    pub start_max_hit: u32,
    pub xp_per_cast: f64,
    pub xp_multiplier: f64,
    /// Magic attack bonus from equipment.
    pub equipment_bonus: i32,
    /// The target's fixed defense roll (MDR).
    pub defense_roll: f64,
    /// When set, the run (or the batch built on it) is fully reproducible.
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_hits: MaxHitTable,
}

impl Default for KillScenario {
    /// The lesser-demon training scenario the calculator was written for.
    fn default() -> Self {
        Self {
            target_hitpoints: 79,
            start_level: 1,
            start_max_hit: 2,
            xp_per_cast: 5.5,
            xp_multiplier: 5.0,
            equipment_bonus: 0,
            defense_roll: 540.0,
            seed: None,
            max_hits: MaxHitTable::default(),
        }
    }
}

impl KillScenario {
    /// Reject configurations that could never terminate before any loop runs.
    ///
    /// The loop only ends when damage lands, so a zero attack rating (hit
    /// chance pinned at zero) or a max-hit table that can yield no damage is a
    /// configuration error, not an infinite spin.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.target_hitpoints <= 0 {
            return Err(SimulationError::InvalidTarget(self.target_hitpoints));
        }
        if self.defense_roll < 0.0 {
            return Err(SimulationError::Damage(DamageError::NegativeDefenseRoll(
                self.defense_roll,
            )));
        }
        if self.xp_per_cast < 0.0 || self.xp_multiplier < 0.0 {
            return Err(SimulationError::NonTerminating(
                "xp per cast and xp multiplier must be non-negative".to_string(),
            ));
        }
        let rating = AccuracyContext::unboosted(self.start_level, self.equipment_bonus)
            .attack_rating();
        if rating <= 0 {
            return Err(SimulationError::NonTerminating(format!(
                "attack rating is {rating} at level {}; no cast can ever land",
                self.start_level
            )));
        }
        if self.start_max_hit == 0 || self.max_hits.min_max_hit() == 0 {
            return Err(SimulationError::NonTerminating(
                "max hit can reach zero; no cast could ever deal damage".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one kill simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillResult {
    pub casts: u64,
    pub final_level: u32,
}

#[derive(Debug)]
pub enum SimulationError {
    /// Target hitpoints must be positive.
    InvalidTarget(i64),
    /// Configuration can never reduce target health.
    NonTerminating(String),
    Level(XpError),
    Damage(DamageError),
    Entropy(RngError),
    /// A batch of zero rounds has no defined mean.
    EmptyBatch,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget(hitpoints) => {
                write!(f, "target hitpoints must be positive, got {hitpoints}")
            }
            Self::NonTerminating(reason) => {
                write!(f, "simulation would never terminate: {reason}")
            }
            Self::Level(err) => write!(f, "{err}"),
            Self::Damage(err) => write!(f, "{err}"),
            Self::Entropy(err) => write!(f, "{err}"),
            Self::EmptyBatch => write!(f, "batch must contain at least one round"),
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<XpError> for SimulationError {
    fn from(err: XpError) -> Self {
        Self::Level(err)
    }
}

impl From<DamageError> for SimulationError {
    fn from(err: DamageError) -> Self {
        Self::Damage(err)
    }
}

impl From<RngError> for SimulationError {
    fn from(err: RngError) -> Self {
        Self::Entropy(err)
    }
}

/// Simulate one kill. Seeded when the scenario carries a seed, otherwise
/// seeded from OS entropy.
pub fn simulate_kill(scenario: &KillScenario, table: &XpTable) -> Result<KillResult, SimulationError> {
    let mut rng = match scenario.seed {
        Some(seed) => Rng::new(seed),
        None => Rng::from_entropy()?,
    };
    simulate_kill_with_rng(scenario, table, &mut rng)
}

/// Like [simulate_kill] but with a caller-owned RNG. The batch runner uses
/// this to hand each round its own derived generator.
pub fn simulate_kill_with_rng(
    scenario: &KillScenario,
    table: &XpTable,
    rng: &mut Rng,
) -> Result<KillResult, SimulationError> {
    scenario.validate()?;

    let mut xp = table.xp_for_level(scenario.start_level)?;
    let mut level = scenario.start_level;
    let mut hitpoints = scenario.target_hitpoints;
    let mut casts: u64 = 0;

    while hitpoints > 0 {
        level = table.level_for_xp(xp);
        let max_hit = scenario.max_hits.max_hit_for(level);

        let context = AccuracyContext::unboosted(level, scenario.equipment_bonus);
        let attack_rating = context.attack_rating();

        let dealt = damage::roll_hit(attack_rating as f64, scenario.defense_roll, max_hit, rng)?;
        // overkill is fine; the loop stops at the first non-positive value
        hitpoints -= i64::from(dealt);

        let bonus_xp = f64::from(dealt) * XP_PER_DAMAGE * scenario.xp_multiplier;
        xp += scenario.xp_per_cast * scenario.xp_multiplier + bonus_xp;

        casts += 1;
    }

    Ok(KillResult {
        casts,
        final_level: level,
    })
}
