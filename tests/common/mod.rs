#![allow(dead_code)]

use b2b_orders_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    state::AppState,
};

/// Connects to the test database, or returns `None` when none is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url, 4).await?;
    let orm = create_orm_conn(&database_url, 4).await?;
    run_migrations(&orm).await?;

    Ok(Some(AppState::new(pool, orm)))
}

/// An email no other run has used.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}
