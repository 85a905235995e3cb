//! Foundation types and traits for scrollmark.
//!
//! This crate contains the platform-agnostic types shared by all scrollmark
//! crates: tracker configuration, the outbound milestone event, scroll
//! signals, collaborator trait definitions, and error types.

pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod signal;
