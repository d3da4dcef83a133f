//! Core data types and structures
//!
//! Edge records and cycle paths shared by every other module.

pub mod types;

pub use types::*;
