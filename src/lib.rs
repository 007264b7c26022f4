pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod controller;
pub mod diff;
pub mod errors;
pub mod handlers;
pub mod ids;
pub mod ledger;
pub mod library;
pub mod models;
pub mod readiness;
pub mod roadmap;
pub mod state;
pub mod storage;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_helpers;

pub use app::router;
pub use client::{Backend, HttpBackend};
pub use config::{ClientConfig, ServerConfig};
pub use controller::MutationController;
pub use ledger::build_ledger;
pub use readiness::{BootPhase, ReadinessProber, boot};
pub use state::AppState;
pub use storage::{load_data, mock_data, persist_data};
