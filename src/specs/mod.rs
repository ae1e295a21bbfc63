pub mod dps_spec;

pub use dps_spec::{DpsSpec, SpecError};
