use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateOrderItemDto, OrderItem, UpdateOrderItemDto};

const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, price, created_at, updated_at";

pub struct OrderItemService;

impl OrderItemService {
    /// Inserts directly; a dangling order or product reference surfaces as a
    /// foreign key violation rather than a pre-check.
    #[instrument(skip(db))]
    pub async fn create_order_item(
        db: &PgPool,
        dto: CreateOrderItemDto,
    ) -> Result<OrderItem, AppError> {
        if dto.price < Decimal::ZERO {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Price must be non-negative"
            )));
        }

        let order_item = sqlx::query_as::<_, OrderItem>(&format!(
            r#"INSERT INTO order_items (order_id, product_id, quantity, price)
               VALUES ($1, $2, $3, $4)
               RETURNING {ORDER_ITEM_COLUMNS}"#
        ))
        .bind(dto.order_id)
        .bind(dto.product_id)
        .bind(dto.quantity)
        .bind(dto.price)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Referenced order or product does not exist"
                ));
            }
            AppError::from(e)
        })?;

        Ok(order_item)
    }

    #[instrument(skip(db))]
    pub async fn get_order_item(db: &PgPool, id: Uuid) -> Result<OrderItem, AppError> {
        let order_item = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Order item not found")))?;

        Ok(order_item)
    }

    #[instrument(skip(db))]
    pub async fn update_order_item(
        db: &PgPool,
        id: Uuid,
        dto: UpdateOrderItemDto,
    ) -> Result<OrderItem, AppError> {
        if let Some(price) = dto.price
            && price < Decimal::ZERO
        {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Price must be non-negative"
            )));
        }

        let existing = Self::get_order_item(db, id).await?;

        let quantity = dto.quantity.unwrap_or(existing.quantity);
        let price = dto.price.unwrap_or(existing.price);

        let order_item = sqlx::query_as::<_, OrderItem>(&format!(
            r#"UPDATE order_items
               SET quantity = $1, price = $2, updated_at = now()
               WHERE id = $3
               RETURNING {ORDER_ITEM_COLUMNS}"#
        ))
        .bind(quantity)
        .bind(price)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(order_item)
    }

    #[instrument(skip(db))]
    pub async fn delete_order_item(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Order item not found")));
        }

        Ok(())
    }
}
