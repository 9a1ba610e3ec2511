//! Session orchestration for the fixwatch dashboard.
//!
//! Owns the three moving parts between the gateway client and the display
//! layer: the single-writer [`SessionStore`], the [`Runtime`] supervisor
//! that drives the 2-second poll cadence and the 1-second uptime ticker,
//! and the export services for the fix table.

pub mod config;
mod error;
pub mod events;
pub mod ops;
pub mod session;
mod runtime;

pub use config::Config;
pub use error::{Error, Result};
pub use events::RuntimeEvent;
pub use runtime::{Runtime, RuntimeConfig, RuntimeHandle, POLL_PERIOD, UPTIME_PERIOD};
pub use session::{DashboardSnapshot, PollTag, Resource, SessionStore};
