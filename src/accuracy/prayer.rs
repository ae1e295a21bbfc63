//! Magic prayer boosts as a closed variant set. Each variant carries its
//! accuracy multiplier; raw multipliers are validated at construction so an
//! out-of-set value can never reach the accuracy formulas.

use serde::{Deserialize, Serialize};

use crate::accuracy::AccuracyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MagicPrayer {
    #[default]
    None,
    MysticWill,
    MysticLore,
    MysticMight,
    Augury,
}

impl MagicPrayer {
    pub const ALL: [MagicPrayer; 5] = [
        Self::None,
        Self::MysticWill,
        Self::MysticLore,
        Self::MysticMight,
        Self::Augury,
    ];

    pub const fn multiplier(self) -> f64 {
        match self {
            Self::None => 1.0,
            Self::MysticWill => 1.05,
            Self::MysticLore => 1.10,
            Self::MysticMight => 1.15,
            Self::Augury => 1.25,
        }
    }

    /// Look up the prayer for a raw multiplier. Anything outside the
    /// enumerated set is an [AccuracyError::InvalidModifier].
    pub fn from_multiplier(value: f64) -> Result<Self, AccuracyError> {
        Self::ALL
            .iter()
            .copied()
            .find(|prayer| prayer.multiplier() == value)
            .ok_or(AccuracyError::InvalidModifier(value))
    }
}
