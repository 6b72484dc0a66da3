//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, move evaluation and store mutation into
//!   use-case level APIs.
//! - Keep UI layers decoupled from store locking details.

pub mod timeline_service;
