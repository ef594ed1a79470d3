//! # herald-core
//!
//! Core types, configuration, message building, and error handling for Herald.

pub mod config;
pub mod error;
pub mod event;
pub mod labels;
pub mod message;
pub mod sanitize;
pub mod traits;
