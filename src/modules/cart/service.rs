use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CartItem, CartItemWithProduct, CreateCartItemDto, UpdateCartItemDto};

const CART_ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity, created_at, updated_at";

pub struct CartService;

impl CartService {
    #[instrument(skip(db))]
    pub async fn create_cart_item(
        db: &PgPool,
        dto: CreateCartItemDto,
    ) -> Result<CartItem, AppError> {
        let cart_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM carts WHERE id = $1)")
                .bind(dto.cart_id)
                .fetch_one(db)
                .await?;

        if !cart_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Cart not found")));
        }

        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(dto.product_id)
                .fetch_one(db)
                .await?;

        if !product_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Product not found")));
        }

        let cart_item = sqlx::query_as::<_, CartItem>(&format!(
            r#"INSERT INTO cart_items (cart_id, product_id, quantity)
               VALUES ($1, $2, $3)
               RETURNING {CART_ITEM_COLUMNS}"#
        ))
        .bind(dto.cart_id)
        .bind(dto.product_id)
        .bind(dto.quantity)
        .fetch_one(db)
        .await?;

        Ok(cart_item)
    }

    #[instrument(skip(db))]
    pub async fn get_cart_items(
        db: &PgPool,
        cart_id: Uuid,
    ) -> Result<Vec<CartItemWithProduct>, AppError> {
        let items = sqlx::query_as::<_, CartItemWithProduct>(
            r#"SELECT
                ci.id,
                ci.cart_id,
                ci.product_id,
                ci.quantity,
                p.name AS product_name,
                p.price AS product_price,
                p.stock AS product_stock
               FROM cart_items ci
               JOIN products p ON p.id = ci.product_id
               WHERE ci.cart_id = $1
               ORDER BY ci.created_at"#,
        )
        .bind(cart_id)
        .fetch_all(db)
        .await?;

        Ok(items)
    }

    #[instrument(skip(db))]
    pub async fn update_cart_item(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCartItemDto,
    ) -> Result<CartItem, AppError> {
        let existing = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_ITEM_COLUMNS} FROM cart_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Cart item not found")))?;

        let quantity = dto.quantity.unwrap_or(existing.quantity);

        let cart_item = sqlx::query_as::<_, CartItem>(&format!(
            r#"UPDATE cart_items
               SET quantity = $1, updated_at = now()
               WHERE id = $2
               RETURNING {CART_ITEM_COLUMNS}"#
        ))
        .bind(quantity)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(cart_item)
    }

    #[instrument(skip(db))]
    pub async fn delete_cart_item(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Cart item not found")));
        }

        Ok(())
    }
}
