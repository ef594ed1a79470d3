//! # herald-channels
//!
//! Messaging platform delivery for Herald.

pub mod telegram;
