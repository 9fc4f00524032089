//! # Rollcall CLI
//!
//! Administrative helpers used by the `rollcall-cli` binary.

pub mod admin;
