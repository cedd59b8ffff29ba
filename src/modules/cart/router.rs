use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_cart_item, delete_cart_item, get_cart_items, update_cart_item};

pub fn init_cart_router() -> Router<AppState> {
    // GET interprets the capture as a cart id, PUT/DELETE as a cart item id.
    Router::new().route("/", post(create_cart_item)).route(
        "/{id}",
        get(get_cart_items)
            .put(update_cart_item)
            .delete(delete_cart_item),
    )
}
