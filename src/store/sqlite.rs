use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use super::{email_not_found, email_taken, id_not_found, ProductStore, StoreError, UserStore};
use crate::models::{NewProduct, NewUser, Product, User};

#[derive(Clone)]
pub struct SqliteUserStore {
    db: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, user: NewUser) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (firstName, lastName, email, password) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&self.db)
        .await
        .map_err(|e| {
            // UNIQUE(email) is the only uniqueness check
            let duplicate = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                email_taken(&user.email)
            } else {
                StoreError::Storage(e)
            }
        })?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, "user inserted");
        Ok(id)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| email_not_found(email))
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| id_not_found(id))
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users")
            .fetch_all(&self.db)
            .await?;
        Ok(users)
    }
}

#[derive(Clone)]
pub struct SqliteProductStore {
    db: SqlitePool,
}

impl SqliteProductStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn add(&self, product: NewProduct) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO products (name, description, image, price, quantity) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.price)
        .bind(product.quantity)
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, "product inserted");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
            .fetch_all(&self.db)
            .await?;
        Ok(products)
    }
}
