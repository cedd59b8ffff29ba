//! Authentication and authorization guards.
//!
//! # Modules
//!
//! - [`auth`]: Bearer-token authentication and user resolution
//! - [`role`]: Role checks layered on top of authentication
//!
//! # Request flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the JWT and resolves the embedded id to a
//!    stored user
//! 3. [`role::RequireAdmin`] additionally rejects non-admin users
//! 4. The handler runs only if every guard in its signature passed
//!
//! The resolved identity is cached in the request's extensions, so stacked
//! guards resolve the user at most once per request.

pub mod auth;
pub mod role;
