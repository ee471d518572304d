// Export our modules for use in binaries and tests
pub mod analysis;
pub mod config;
pub mod domain;
pub mod load_state;
pub mod logging;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::{AnalysisResult, EnergyMix, EnergyRecord, SourceShare};
pub use load_state::{LoadEvent, LoadMachine, LoadPhase, LoadState, LOAD_ERROR_MESSAGE};
