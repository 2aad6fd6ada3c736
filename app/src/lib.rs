//! Application facade for the Aerosure pool.
//!
//! [`SuretyApp`] is the single entry point external callers go through: it
//! attributes every call to a caller identity, enforces the operational
//! kill-switch, composes the governance, flight, insurance and oracle
//! machines over the ledger, and fans resulting events out to subscribers.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;

pub use app::SuretyApp;
pub use config::AppConfig;
pub use error::AppError;
pub use event::{AppEvent, EventBus};
pub use logging::{init_logging, LogFormat};
