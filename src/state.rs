use std::sync::Arc;

use crate::{
    db::{DbPool, OrmConn},
    tokens::{RandomStringTokenGenerator, TokenGenerator},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub tokens: Arc<dyn TokenGenerator>,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn) -> Self {
        Self {
            pool,
            orm,
            tokens: Arc::new(RandomStringTokenGenerator::default()),
        }
    }
}
