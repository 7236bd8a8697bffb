//! Core shared library for the hookscope workspace.
//!
//! This crate exposes the primitives the log service and the CLI
//! depend on: the common error type, configuration loading, logging
//! setup and JSON helpers.

pub mod config;
pub mod errors;
pub mod logging;
pub mod serde_utils;
