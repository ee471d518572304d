// App module for mena-energy-tracker
// Handles dashboard state and the user actions that drive it

pub mod actions;
pub mod input;
pub mod state;

pub use actions::{AnalysisActions, FetchOutcome};
pub use input::handle_input;
pub use state::{App, ChartTab};
