//! Experience table: cumulative XP thresholds for magic levels 1..=99.
//!
//! Built once per process (or per batch) and shared by read-only reference;
//! every simulation round reads the same table.

use std::fmt;

/// Highest attainable level.
pub const MAX_LEVEL: u32 = 99;

/// Cumulative-XP-to-level mapping. Index = level; index 0 is unused padding so
/// `thresholds[level]` reads naturally. Strictly non-decreasing; level 1 is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpTable {
    thresholds: Vec<u64>,
}

impl XpTable {
    /// Generate the table. For each level L in 1..99 the increment is
    /// `floor(L + 300 * 2^(L/7))`; the threshold to reach level L+1 is the
    /// running sum of increments divided by 4, floored.
    pub fn generate() -> Self {
        let mut thresholds = Vec::with_capacity(MAX_LEVEL as usize + 1);
        thresholds.push(0); // padding so index = level
        thresholds.push(0); // level 1 requires no xp
        let mut cumulative: u64 = 0;
        for level in 1..MAX_LEVEL {
            let increment = (f64::from(level) + 300.0 * 2f64.powf(f64::from(level) / 7.0)).floor();
            cumulative += increment as u64;
            thresholds.push(cumulative / 4);
        }
        Self { thresholds }
    }

    /// Largest level whose threshold is at or below `xp`. Scans upward from
    /// level 1; the table is 99 entries, a linear scan is fine. Anything below
    /// the level-1 threshold (including negative xp) maps to level 1.
    pub fn level_for_xp(&self, xp: f64) -> u32 {
        let mut level = 1;
        for candidate in 1..=MAX_LEVEL {
            if xp >= self.thresholds[candidate as usize] as f64 {
                level = candidate;
            } else {
                break;
            }
        }
        level
    }

    /// Cumulative XP threshold for an exact level. Out-of-range levels are an
    /// error, never clamped.
    pub fn xp_for_level(&self, level: u32) -> Result<f64, XpError> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(XpError::OutOfBounds { level });
        }
        Ok(self.thresholds[level as usize] as f64)
    }

    /// Raw thresholds, index = level (index 0 is padding).
    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }
}

impl Default for XpTable {
    fn default() -> Self {
        Self::generate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpError {
    OutOfBounds { level: u32 },
}

impl fmt::Display for XpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { level } => {
                write!(f, "level {level} is out of bounds for the xp table (valid range 1..={MAX_LEVEL})")
            }
        }
    }
}

impl std::error::Error for XpError {}
