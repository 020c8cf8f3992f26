//! Shared types, errors, and configuration for Mizan.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe document references
//! - The tenant context threaded through every store operation
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod tenant;
pub mod types;

pub use config::{AppConfig, LedgerConfig, ReceiptCreditTarget, TelemetryConfig, TenantConfig};
pub use error::{AppError, AppResult};
pub use tenant::TenantContext;
