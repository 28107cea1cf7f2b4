//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry calls into the `Model` contract used by commands.
//! - Keep command and CLI layers decoupled from registry details.

pub mod model;
