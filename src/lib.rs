//! Magic combat calculator and Monte Carlo trainer simulator.
//!
//! Models a single spell-casting combat style: accuracy rolls, damage rolls,
//! experience progression, and batch simulation of casts-to-kill. All
//! computation is synchronous; the only non-determinism is an explicitly
//! injected PRNG.

pub mod accuracy;
pub mod cli;
pub mod combat;
pub mod parallel;
pub mod specs;
pub mod xp;
