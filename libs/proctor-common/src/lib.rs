//! Shared types and configuration for the proctor judge.

pub mod config;
pub mod types;
