//! # Rollcall Auth
//!
//! Authentication core for the Rollcall API.
//!
//! This crate provides:
//!
//! - [`claims`]: [`UserType`] and the [`Claims`] signed into session tokens
//! - [`jwt`]: token signing and decoding
//! - [`session`]: the [`SessionCache`] contract used for revocation
//! - [`credentials`]: the [`CredentialStore`] contract, one store per role
//! - [`issuer`]: [`TokenIssuer`] implementing login, validation and logout
//! - [`error`]: [`AuthError`], one variant per failure
//!
//! # Token lifecycle
//!
//! ```text
//! login ──► credential store ──► sign ──► cache.put(token:{type}:{id})
//! request ──► decode ──► cache.get == token? ──► not expired? ──► handler
//! logout ──► decode ──► cache.delete(token:{type}:{id})
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{TokenIssuer, UserType};
//!
//! let issuer = TokenIssuer::new(jwt_config, stores, cache);
//! let issued = issuer.login(UserType::Admin, "admin@school.com", "Secret123!").await?;
//! let claims = issuer.validate(&issued.token).await?;
//! issuer.logout(&issued.token).await?;
//! ```

pub mod claims;
pub mod credentials;
pub mod error;
pub mod issuer;
pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use claims::{Claims, UnknownUserType, UserType};
pub use credentials::{
    CredentialRecord, CredentialStore, CredentialStores, InMemoryCredentialStore, StoreError,
};
pub use error::AuthError;
pub use issuer::TokenIssuer;
pub use jwt::{IssuedToken, create_token, create_token_at, decode_token};
pub use session::{CacheError, SessionCache, session_key};
