use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_order_item, delete_order_item, get_order_item, update_order_item,
};

pub fn init_order_items_router() -> Router<AppState> {
    Router::new().route("/", post(create_order_item)).route(
        "/{id}",
        get(get_order_item)
            .put(update_order_item)
            .delete(delete_order_item),
    )
}
