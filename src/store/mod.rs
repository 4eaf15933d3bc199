//! Data access for users and products.
//!
//! Handlers only see the [`UserStore`] and [`ProductStore`] traits; the SQLite
//! implementations back the server and the in-memory ones stand in for tests.

use async_trait::async_trait;

use crate::models::{NewProduct, NewUser, Product, User};

pub mod memory;
pub mod sqlite;

pub use memory::{MemoryProductStore, MemoryUserStore};
pub use sqlite::{SqliteProductStore, SqliteUserStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user and returns its id. Fails with
    /// [`StoreError::AlreadyExists`] when the email is taken; the check and the
    /// insert are one atomic step.
    async fn create(&self, user: NewUser) -> Result<i64, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<User, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Every user, in no particular order.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn add(&self, product: NewProduct) -> Result<i64, StoreError>;

    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;
}

pub(crate) fn email_taken(email: &str) -> StoreError {
    StoreError::AlreadyExists(format!("user with email {email} already exists"))
}

pub(crate) fn email_not_found(email: &str) -> StoreError {
    StoreError::NotFound(format!("user with email: {email} not found"))
}

pub(crate) fn id_not_found(id: i64) -> StoreError {
    StoreError::NotFound(format!("user with id: {id} not found"))
}
