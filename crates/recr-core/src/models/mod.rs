//! Data models and configuration structures.

pub mod config;
pub mod receipt;
