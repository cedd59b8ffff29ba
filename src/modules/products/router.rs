use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_product, delete_product, get_product, get_products, update_product,
};

pub fn init_products_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product).get(get_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
