use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{CreateOrderItemDto, OrderItem, UpdateOrderItemDto};
use super::service::OrderItemService;

/// Create a new order item
#[utoipa::path(
    post,
    path = "/api/v1/order-items",
    request_body = CreateOrderItemDto,
    responses(
        (status = 201, description = "Order item created successfully", body = ApiResponse<OrderItem>),
        (status = 400, description = "Missing field or dangling reference", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Order Items"
)]
#[instrument(skip(state))]
pub async fn create_order_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateOrderItemDto>,
) -> Result<ApiResponse<OrderItem>, AppError> {
    let order_item = OrderItemService::create_order_item(&state.db, dto).await?;

    Ok(ApiResponse::created(
        order_item,
        "Order item created successfully",
    ))
}

/// Get a single order item
#[utoipa::path(
    get,
    path = "/api/v1/order-items/{id}",
    params(("id" = Uuid, Path, description = "Order item id")),
    responses(
        (status = 200, description = "Order item fetched successfully", body = ApiResponse<OrderItem>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Order item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Order Items"
)]
#[instrument(skip(state))]
pub async fn get_order_item(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<OrderItem>, AppError> {
    let order_item = OrderItemService::get_order_item(&state.db, id).await?;

    Ok(ApiResponse::ok(order_item, "Order item fetched successfully"))
}

/// Update an order item
#[utoipa::path(
    put,
    path = "/api/v1/order-items/{id}",
    params(("id" = Uuid, Path, description = "Order item id")),
    request_body = UpdateOrderItemDto,
    responses(
        (status = 200, description = "Order item updated successfully", body = ApiResponse<OrderItem>),
        (status = 400, description = "Negative price", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "Order item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Order Items"
)]
#[instrument(skip(state))]
pub async fn update_order_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderItemDto>,
) -> Result<ApiResponse<OrderItem>, AppError> {
    let order_item = OrderItemService::update_order_item(&state.db, id, dto).await?;

    Ok(ApiResponse::ok(order_item, "Order item updated successfully"))
}

/// Delete an order item
#[utoipa::path(
    delete,
    path = "/api/v1/order-items/{id}",
    params(("id" = Uuid, Path, description = "Order item id")),
    responses(
        (status = 200, description = "Order item deleted successfully"),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "Order item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Order Items"
)]
#[instrument(skip(state))]
pub async fn delete_order_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    OrderItemService::delete_order_item(&state.db, id).await?;

    Ok(ApiResponse::message(
        axum::http::StatusCode::OK,
        "Order item deleted successfully",
    ))
}
