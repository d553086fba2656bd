// ABOUTME: Library root for stevedore - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cloud;
pub mod config;
pub mod dockerfile;
pub mod error;
pub mod output;
pub mod prompt;
pub mod registry;
pub mod resolve;
pub mod types;
