//! In-memory stores with the same contract as the SQLite ones.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{email_not_found, email_taken, id_not_found, ProductStore, StoreError, UserStore};
use crate::models::{NewProduct, NewUser, Product, User};

fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<i64, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(email_taken(&user.email));
        }

        let id = users.last().map_or(1, |u| u.id + 1);
        users.push(User {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now(),
        });
        Ok(id)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| email_not_found(email))
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| id_not_found(id))
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }
}

#[derive(Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn add(&self, product: NewProduct) -> Result<i64, StoreError> {
        let mut products = self.products.write().await;
        let id = products.last().map_or(1, |p| p.id + 1);
        products.push(Product {
            id,
            name: product.name,
            description: product.description,
            image: product.image,
            price: product.price,
            quantity: product.quantity,
            created_at: now(),
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.clone())
    }
}
