//! # Rollcall Models
//!
//! Request and response DTOs shared by the HTTP layer and the API docs.

pub mod auth;

pub use auth::{
    LoginRequest, LoginResponse, MessageResponse, SessionResponse, SessionStatusResponse,
};
