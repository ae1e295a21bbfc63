//! Special-attack efficiency comparison.
//!
//! Value object with recompute-on-write semantics: the derived metrics (TTK,
//! efficiency, time save) refresh whenever the spec or target inputs change.
//! Stateless with respect to the simulation loop; used to rank specs by
//! damage or time saved per point of special-attack energy spent.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecError {
    /// TTK is hitpoints / main DPS; zero or negative main DPS has no TTK.
    NonPositiveMainDps(f64),
    /// Efficiency is per cost point; zero cost has no efficiency.
    ZeroCost,
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMainDps(dps) => {
                write!(f, "main dps must be positive for a meaningful TTK, got {dps}")
            }
            Self::ZeroCost => write!(f, "spec cost must be non-zero"),
        }
    }
}

impl std::error::Error for SpecError {}

/// One special attack measured against a target and the player's main DPS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpsSpec {
    spec_dps: f64,
    spec_dmg: f64,
    /// Attack speed of the spec weapon, in seconds.
    attack_speed: f64,
    spec_cost: u32,
    target_hitpoints: f64,
    main_dps: f64,

    // derived, refreshed on every write
    ttk: f64,
    spec_efficiency: f64,
    spec_time_save: f64,
    spec_time_save_efficiency: f64,
}

impl DpsSpec {
    /// Permissive constructor: zero cost or zero main DPS are allowed and the
    /// affected derived ratios fall back to 0.
    pub fn new(
        spec_dps: f64,
        spec_dmg: f64,
        attack_speed: f64,
        spec_cost: u32,
        target_hitpoints: f64,
        main_dps: f64,
    ) -> Self {
        let mut spec = Self {
            spec_dps,
            spec_dmg,
            attack_speed,
            spec_cost,
            target_hitpoints,
            main_dps,
            ttk: 0.0,
            spec_efficiency: 0.0,
            spec_time_save: 0.0,
            spec_time_save_efficiency: 0.0,
        };
        spec.recompute();
        spec
    }

    /// Strict constructor for callers that need TTK and efficiency to be
    /// meaningful: rejects non-positive main DPS and zero cost up front.
    pub fn try_new(
        spec_dps: f64,
        spec_dmg: f64,
        attack_speed: f64,
        spec_cost: u32,
        target_hitpoints: f64,
        main_dps: f64,
    ) -> Result<Self, SpecError> {
        if main_dps <= 0.0 {
            return Err(SpecError::NonPositiveMainDps(main_dps));
        }
        if spec_cost == 0 {
            return Err(SpecError::ZeroCost);
        }
        Ok(Self::new(
            spec_dps,
            spec_dmg,
            attack_speed,
            spec_cost,
            target_hitpoints,
            main_dps,
        ))
    }

    /// Replace the spec under comparison; derived metrics refresh.
    pub fn set_spec(&mut self, spec_dps: f64, spec_dmg: f64, attack_speed: f64, spec_cost: u32) {
        self.spec_dps = spec_dps;
        self.spec_dmg = spec_dmg;
        self.attack_speed = attack_speed;
        self.spec_cost = spec_cost;
        self.recompute();
    }

    /// Replace the target context; derived metrics refresh.
    pub fn set_target(&mut self, target_hitpoints: f64, main_dps: f64) {
        self.target_hitpoints = target_hitpoints;
        self.main_dps = main_dps;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.ttk = if self.main_dps != 0.0 {
            self.target_hitpoints / self.main_dps
        } else {
            0.0
        };
        self.spec_efficiency = if self.spec_cost != 0 {
            self.spec_dps / f64::from(self.spec_cost)
        } else {
            0.0
        };
        self.spec_time_save = if self.target_hitpoints != 0.0 && self.main_dps != 0.0 {
            let remaining = self.target_hitpoints - self.spec_dmg;
            self.ttk - (remaining / self.main_dps + self.attack_speed)
        } else {
            0.0
        };
        self.spec_time_save_efficiency = if self.spec_cost != 0 {
            self.spec_time_save / f64::from(self.spec_cost)
        } else {
            0.0
        };
    }

    /// Time to kill the target on main DPS alone, in seconds.
    pub fn ttk(&self) -> f64 {
        self.ttk
    }

    /// Spec DPS per cost point.
    pub fn spec_efficiency(&self) -> f64 {
        self.spec_efficiency
    }

    /// Seconds shaved off the kill by using the spec once.
    pub fn spec_time_save(&self) -> f64 {
        self.spec_time_save
    }

    /// Time saved per cost point.
    pub fn spec_time_save_efficiency(&self) -> f64 {
        self.spec_time_save_efficiency
    }

    /// How much DPS the spec adds over mainhand attacks.
    pub fn marginal_dps(main_dps: f64, spec_dps: f64) -> f64 {
        spec_dps - main_dps
    }
}

impl fmt::Display for DpsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------------------------")?;
        writeln!(f, "DPS Spec:")?;
        writeln!(f, "  DPS: {:.5}", self.spec_dps)?;
        writeln!(f, "  Expected Damage: {:.5}", self.spec_dmg)?;
        writeln!(f, "  Attack Speed: {:.2}s", self.attack_speed)?;
        writeln!(f, "  Cost: {}", self.spec_cost)?;
        writeln!(f, "  Damage Efficiency: {:.5}", self.spec_efficiency)?;
        writeln!(f, "  Time Save: {:.2}s", self.spec_time_save)?;
        writeln!(f, "  Time Efficiency: {:.5}", self.spec_time_save_efficiency)?;
        write!(f, "------------------------")
    }
}
