use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::config::security::SecurityConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    LoginRequest, LoginResponse, RegisterResponse, RegisterUserDto, UpdateUserDto, User, UserRole,
};

const USER_COLUMNS: &str = "id, name, username, email, role, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterUserDto,
        jwt_config: &JwtConfig,
        security_config: &SecurityConfig,
    ) -> Result<RegisterResponse, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&dto.email)
                .fetch_one(db)
                .await?;

        if exists {
            return Err(AppError::bad_request(anyhow::anyhow!("User already exists")));
        }

        let hashed_password = hash_password(&dto.password, security_config.bcrypt_cost)?;
        let role = if dto.is_admin {
            UserRole::Admin
        } else {
            UserRole::User
        };

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO users (name, username, email, password, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(&dto.name)
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // Registration raced another request for the same email.
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("User already exists"));
            }
            AppError::from(e)
        })?;

        let access_token = create_access_token(id, jwt_config)?;

        Ok(RegisterResponse { access_token, id })
    }

    #[instrument(skip(db))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct Credentials {
            id: Uuid,
            password: String,
        }

        // Unknown email and wrong password are indistinguishable to the
        // caller.
        let credentials =
            sqlx::query_as::<_, Credentials>("SELECT id, password FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| {
                    AppError::unauthorized(anyhow::anyhow!("Invalid email or password"))
                })?;

        let is_valid = verify_password(&dto.password, &credentials.password)?;

        if !is_valid {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let access_token = create_access_token(credentials.id, jwt_config)?;

        Ok(LoginResponse { access_token })
    }

    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserDto,
        security_config: &SecurityConfig,
    ) -> Result<User, AppError> {
        let existing = Self::get_user(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let hashed_password = hash_password(&dto.password, security_config.bcrypt_cost)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
               SET name = $1, email = $2, password = $3, updated_at = now()
               WHERE id = $4
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&name)
        .bind(&email)
        .bind(&hashed_password)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Email already in use"));
            }
            AppError::from(e)
        })?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }
}
