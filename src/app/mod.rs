//! Application wiring

pub mod state;

pub use state::{AppState, LogGateway};
