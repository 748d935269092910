//! Shared types and configuration for Teller.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes naming the vault partitions
//! - Seed configuration management

pub mod config;
pub mod types;

pub use config::{AppConfig, VaultConfig};
pub use types::Currency;
