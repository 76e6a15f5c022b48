//! Changelinker Core - Core library for changelog processing
//!
//! This crate provides the shared error types, configuration loading and
//! the small value types used by the git and changelog crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{LinkerError, Result};
pub use types::SortPriority;
