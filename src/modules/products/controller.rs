use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{CreateProductDto, Product, UpdateProductDto};
use super::service::ProductService;

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<Product>),
        (status = 400, description = "Missing field or negative price/stock", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = ProductService::create_product(&state.db, dto).await?;

    Ok(ApiResponse::created(product, "Product created successfully"))
}

/// List all products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Products fetched successfully", body = ApiResponse<Vec<Product>>)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Product>>, AppError> {
    let products = ProductService::get_products(&state.db).await?;

    Ok(ApiResponse::ok(products, "Products fetched successfully"))
}

/// Get a single product
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product fetched successfully", body = ApiResponse<Product>),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = ProductService::get_product(&state.db, id).await?;

    Ok(ApiResponse::ok(product, "Product fetched successfully"))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 400, description = "Negative price/stock", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = ProductService::update_product(&state.db, id, dto).await?;

    Ok(ApiResponse::ok(product, "Product updated successfully"))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 401, description = "Missing or invalid token, or not an admin", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    ProductService::delete_product(&state.db, id).await?;

    Ok(ApiResponse::message(
        axum::http::StatusCode::OK,
        "Product deleted successfully",
    ))
}
