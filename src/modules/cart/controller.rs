use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{CartItem, CartItemWithProduct, CreateCartItemDto, UpdateCartItemDto};
use super::service::CartService;

/// Add an item to a cart
#[utoipa::path(
    post,
    path = "/api/v1/cart",
    request_body = CreateCartItemDto,
    responses(
        (status = 201, description = "Cart item created successfully", body = ApiResponse<CartItem>),
        (status = 400, description = "Missing field or invalid quantity", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Cart or product not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state))]
pub async fn create_cart_item(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCartItemDto>,
) -> Result<ApiResponse<CartItem>, AppError> {
    let cart_item = CartService::create_cart_item(&state.db, dto).await?;

    Ok(ApiResponse::created(
        cart_item,
        "Cart item created successfully",
    ))
}

/// List the items in a cart
#[utoipa::path(
    get,
    path = "/api/v1/cart/{id}",
    params(("id" = Uuid, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Cart items fetched successfully", body = ApiResponse<Vec<CartItemWithProduct>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state))]
pub async fn get_cart_items(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(cart_id): Path<Uuid>,
) -> Result<ApiResponse<Vec<CartItemWithProduct>>, AppError> {
    let items = CartService::get_cart_items(&state.db, cart_id).await?;

    Ok(ApiResponse::ok(items, "Cart items fetched successfully"))
}

/// Update a cart item
#[utoipa::path(
    put,
    path = "/api/v1/cart/{id}",
    params(("id" = Uuid, Path, description = "Cart item id")),
    request_body = UpdateCartItemDto,
    responses(
        (status = 200, description = "Cart item updated successfully", body = ApiResponse<CartItem>),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "Cart item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state))]
pub async fn update_cart_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCartItemDto>,
) -> Result<ApiResponse<CartItem>, AppError> {
    let cart_item = CartService::update_cart_item(&state.db, id, dto).await?;

    Ok(ApiResponse::ok(cart_item, "Cart item updated successfully"))
}

/// Delete a cart item
#[utoipa::path(
    delete,
    path = "/api/v1/cart/{id}",
    params(("id" = Uuid, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Cart item deleted successfully"),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "Cart item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
#[instrument(skip(state))]
pub async fn delete_cart_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    CartService::delete_cart_item(&state.db, id).await?;

    Ok(ApiResponse::message(
        axum::http::StatusCode::OK,
        "Cart item deleted successfully",
    ))
}
