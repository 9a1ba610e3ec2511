//! HTTP client for the remote healing-agent gateway.
//!
//! The gateway runs the actual agent (clone, scan, fix, test, push); this
//! crate only speaks its JSON contract: one write endpoint to start a run,
//! the four read endpoints the runtime polls, and the results/health
//! lookups. The [`AgentGateway`] trait is the seam the runtime consumes,
//! so tests can substitute a scripted in-memory gateway.

mod client;
mod error;
pub mod wire;

pub use client::{AgentGateway, GatewayClient};
pub use error::{Error, Result};
