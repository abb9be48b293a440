//! Sync module: one complete archive run.
//!
//! This module provides:
//! - The run orchestrator
//! - Run statistics

pub mod orchestrator;
pub mod state;

pub use orchestrator::SyncOrchestrator;
pub use state::SyncStats;
