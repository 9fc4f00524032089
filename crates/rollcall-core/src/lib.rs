//! # Rollcall Core
//!
//! Core types, errors, and utilities for the Rollcall API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt hashing/verification and secure password generation
//!
//! # Example
//!
//! ```ignore
//! use rollcall_core::password::{generate_password, hash_password, compare_passwords};
//!
//! let password = generate_password(12);
//! let hash = hash_password(&password)?;
//! assert!(compare_passwords(&hash, &password));
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use password::{
    compare_passwords, generate_password, hash_password, hash_password_with_cost, verify_password,
};
