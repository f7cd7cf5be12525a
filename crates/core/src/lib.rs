//! Shared types, errors, and domain rules for the shipcheck workspace.
//!
//! This crate performs no I/O. It holds the constants and validation
//! helpers used by both the repository layer (`shipcheck-db`) and the
//! client services (`shipcheck-client`).

pub mod checklist;
pub mod error;
pub mod media;
pub mod notes;
pub mod survey;
pub mod types;
pub mod utility;
