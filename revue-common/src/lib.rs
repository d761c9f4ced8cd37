//! Shared types for the Revue review dashboard.
//!
//! Holds the cross-crate error type and TOML configuration loading so
//! the service crate and any future companion tools agree on both.

pub mod config;
pub mod error;

pub use error::{Error, Result};
