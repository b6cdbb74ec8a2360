//! Subalign - subtitle timing synchronization automation
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod languages;
pub mod path_mappings;
pub mod sync;
pub mod tools;

pub use error::{Error, Result};
