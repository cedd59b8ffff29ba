use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{
    LoginRequest, LoginResponse, RegisterResponse, RegisterUserDto, UpdateUserDto, User,
};
use super::service::UserService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Missing field or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<ApiResponse<RegisterResponse>, AppError> {
    let registered = UserService::register(
        &state.db,
        dto,
        &state.jwt_config,
        &state.security_config,
    )
    .await?;

    Ok(ApiResponse::created(registered, "User created successfully"))
}

/// Login and receive an access token
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User logged in successfully", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Missing field", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let login = UserService::login(&state.db, dto, &state.jwt_config).await?;

    Ok(ApiResponse::ok(login, "User logged in successfully"))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users fetched successfully", body = ApiResponse<Vec<User>>),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<ApiResponse<Vec<User>>, AppError> {
    let users = UserService::get_users(&state.db).await?;

    Ok(ApiResponse::ok(users, "Users fetched successfully"))
}

/// Get the profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    responses(
        (status = 200, description = "Profile fetched successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.0.id).await?;

    Ok(ApiResponse::ok(user, "Profile fetched successfully"))
}

/// Get a single user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User fetched successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;

    Ok(ApiResponse::ok(user, "User fetched successfully"))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<User>),
        (status = 400, description = "Missing password or email already in use", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::update_user(&state.db, id, dto, &state.security_config).await?;

    Ok(ApiResponse::ok(user, "User updated successfully"))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    UserService::delete_user(&state.db, id).await?;

    Ok(ApiResponse::message(
        axum::http::StatusCode::OK,
        "User deleted successfully",
    ))
}
