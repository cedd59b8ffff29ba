use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Identity resolved by the gate, scoped to a single request.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: UserRole,
}

/// Extractor that validates the bearer token and resolves the embedded id
/// against the users table. Any failure along the way is a 401: missing or
/// malformed header, unverifiable token, or an id that no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.role == UserRole::Admin
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An earlier guard in the handler signature may have resolved the
        // user already; the extensions entry is request-scoped.
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(AuthUser(current.clone()));
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Not authorized, no token found")))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user id in token")))?;

        let current = sqlx::query_as::<_, CurrentUser>("SELECT id, role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Not authorized, user not found"))
            })?;

        parts.extensions.insert(current.clone());

        Ok(AuthUser(current))
    }
}
