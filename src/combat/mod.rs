pub mod batch;
pub mod damage;
pub mod rng;
pub mod simulation;

pub use batch::{simulate_batch, simulate_batch_parallel, BatchSummary};
pub use damage::{hit_chance, roll_hit, DamageError};
pub use rng::{Rng, RngError};
pub use simulation::{
    simulate_kill, simulate_kill_with_rng, KillResult, KillScenario, MaxHitTable, SimulationError,
    XP_PER_DAMAGE,
};
