// --- File: crates/services/agenda_backend/src/lib.rs ---
pub mod app_state;
pub mod service_factory;

pub use app_state::{AppState, AppStateBuilder};
