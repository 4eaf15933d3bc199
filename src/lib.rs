pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod store;

use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::{
    auth::{HashParams, TokenService},
    config::Config,
    store::{ProductStore, SqliteProductStore, SqliteUserStore, UserStore},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub tokens: Arc<TokenService>,
    pub hash_params: HashParams,
}

impl AppState {
    /// SQLite-backed state for the server.
    pub fn new(config: &Config, db: SqlitePool) -> Self {
        Self {
            users: Arc::new(SqliteUserStore::new(db.clone())),
            products: Arc::new(SqliteProductStore::new(db)),
            tokens: Arc::new(TokenService::from_config(config)),
            hash_params: config.hash_params,
        }
    }
}
