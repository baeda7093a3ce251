//! Shared types, errors, and configuration for Ledgerline.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for entry and batch references
//! - Application-wide error types
//! - Configuration management (validation defaults, logging)

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LoggingConfig, ValidationConfig};
pub use error::{AppError, AppResult};
