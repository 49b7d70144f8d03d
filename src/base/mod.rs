//! Base types: errors and configuration.
//!
//! - [`ScopeError`](error::ScopeError): every failure the crate reports
//! - [`InspectorConfig`](config::InspectorConfig): storage keys and export policy

pub mod config;
pub mod error;
