//! Role-based authorization guards.
//!
//! Guards are extractors placed in handler signatures; each runs the
//! authentication step first and short-circuits with a typed [`AppError`]
//! before the handler body executes.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Guard for admin-only routes.
///
/// Runs the full authentication chain, then rejects with 401 unless the
/// resolved user's role is ADMIN.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn delete_product(
///     State(state): State<AppState>,
///     _admin: RequireAdmin,
///     Path(id): Path<Uuid>,
/// ) -> Result<ApiResponse<()>, AppError> {
///     // Only admins reach this point
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        check_role(&auth_user, UserRole::Admin)?;

        Ok(RequireAdmin(auth_user))
    }
}

/// Check that a resolved user holds the given role.
pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    if auth_user.0.role != required_role {
        return Err(AppError::unauthorized(anyhow::anyhow!(
            "Not authorized, admin access only"
        )));
    }

    Ok(())
}
