//! Infrastructure layer
//!
//! This module handles everything outside the protocol logic:
//! - CLI argument processing
//! - Layered configuration
//! - Reply requests and events read from disk

pub mod cli;
pub mod config;
pub mod request;
