use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use storefront::modules::users::model::UserRole;
use storefront::utils::password::hash_password;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Create a test user with the given role ("admin" or "user").
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    role: &str,
) -> TestUser {
    // Low cost keeps the suite fast; production cost comes from config.
    let hashed = hash_password(password, 4).unwrap();

    let role = match role {
        "admin" => UserRole::Admin,
        _ => UserRole::User,
    };

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (name, username, email, password, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind("Test User")
    .bind("testuser")
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_product(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    price: Decimal,
    stock: i32,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO products (name, description, price, stock)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind("Test product description")
    .bind(price)
    .bind(stock)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_cart(tx: &mut Transaction<'_, Postgres>, user_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO carts (user_id)
        VALUES ($1)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_order(tx: &mut Transaction<'_, Postgres>, user_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO orders (user_id, status, total_amount)
        VALUES ($1, 'PENDING', $2)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(Decimal::new(10000, 2))
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
