//! Shared utilities, configuration, and error handling for the Paradise
//! Tours Messenger bot
//!
//! This crate provides common functionality used across the application:
//! - Configuration management following 12-factor principles
//! - Error types and handling

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
