//! GrandPad API module.
//!
//! This module provides:
//! - Password authentication and the session-bound HTTP client
//! - API response types

pub mod client;
pub mod types;

pub use client::{Credentials, Params, Session, SessionClient, SESSION_PARAM};
pub use types::*;
