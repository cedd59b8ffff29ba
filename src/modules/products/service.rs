use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateProductDto, Product, UpdateProductDto};

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, created_at, updated_at";

pub struct ProductService;

impl ProductService {
    #[instrument(skip(db))]
    pub async fn create_product(db: &PgPool, dto: CreateProductDto) -> Result<Product, AppError> {
        if dto.price < Decimal::ZERO {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Price must be non-negative"
            )));
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"INSERT INTO products (name, description, price, stock)
               VALUES ($1, $2, $3, $4)
               RETURNING {PRODUCT_COLUMNS}"#
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.stock)
        .fetch_one(db)
        .await?;

        Ok(product)
    }

    #[instrument(skip(db))]
    pub async fn get_products(db: &PgPool) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at"
        ))
        .fetch_all(db)
        .await?;

        Ok(products)
    }

    #[instrument(skip(db))]
    pub async fn get_product(db: &PgPool, id: Uuid) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Product not found")))?;

        Ok(product)
    }

    #[instrument(skip(db))]
    pub async fn update_product(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<Product, AppError> {
        if let Some(price) = dto.price
            && price < Decimal::ZERO
        {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Price must be non-negative"
            )));
        }

        let existing = Self::get_product(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let description = if dto.description.is_some() {
            dto.description
        } else {
            existing.description
        };
        let price = dto.price.unwrap_or(existing.price);
        let stock = dto.stock.unwrap_or(existing.stock);

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"UPDATE products
               SET name = $1, description = $2, price = $3, stock = $4, updated_at = now()
               WHERE id = $5
               RETURNING {PRODUCT_COLUMNS}"#
        ))
        .bind(&name)
        .bind(&description)
        .bind(price)
        .bind(stock)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(product)
    }

    #[instrument(skip(db))]
    pub async fn delete_product(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Product not found")));
        }

        Ok(())
    }
}
