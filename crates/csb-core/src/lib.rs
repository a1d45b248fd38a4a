//! Core domain + application logic for the Codespaces Telegram bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the GitHub REST API
//! live behind ports (traits) implemented in adapter crates.

pub mod codespaces;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod security;

pub use errors::{Error, Result};

#[cfg(test)]
mod test_support;
