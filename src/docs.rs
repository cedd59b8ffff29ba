use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::cart::model::{CartItem, CartItemWithProduct, CreateCartItemDto, UpdateCartItemDto};
use crate::modules::order_items::model::{CreateOrderItemDto, OrderItem, UpdateOrderItemDto};
use crate::modules::products::model::{CreateProductDto, Product, UpdateProductDto};
use crate::modules::users::model::{
    LoginRequest, LoginResponse, RegisterResponse, RegisterUserDto, UpdateUserDto, User, UserRole,
};
use crate::utils::response::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::login_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::get_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::cart::controller::create_cart_item,
        crate::modules::cart::controller::get_cart_items,
        crate::modules::cart::controller::update_cart_item,
        crate::modules::cart::controller::delete_cart_item,
        crate::modules::order_items::controller::create_order_item,
        crate::modules::order_items::controller::get_order_item,
        crate::modules::order_items::controller::update_order_item,
        crate::modules::order_items::controller::delete_order_item,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterUserDto,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            UpdateUserDto,
            Product,
            CreateProductDto,
            UpdateProductDto,
            CartItem,
            CartItemWithProduct,
            CreateCartItemDto,
            UpdateCartItemDto,
            OrderItem,
            CreateOrderItemDto,
            UpdateOrderItemDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login, and user management"),
        (name = "Products", description = "Product catalog"),
        (name = "Cart", description = "Cart item management"),
        (name = "Order Items", description = "Order item management")
    ),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "E-commerce REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
