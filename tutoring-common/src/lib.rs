//! # Tutoring Ledger Common Library
//!
//! Shared code for the tutoring ledger service and its tools:
//! - Error taxonomy
//! - Configuration loading
//! - Record models and create-request validation
//! - Database initialization

pub mod config;
pub mod db;
pub mod error;
pub mod validation;

pub use error::{Error, Result};
