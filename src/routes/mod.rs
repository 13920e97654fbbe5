use axum::Router;

use crate::state::AppState;

pub mod categories;
pub mod contacts;
pub mod doc;
pub mod health;
pub mod order_items;
pub mod orders;
pub mod params;
pub mod product_infos;
pub mod products;
pub mod shops;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/contacts", contacts::router())
        .nest("/shops", shops::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/parameters", products::parameters_router())
        .nest("/product-infos", product_infos::router())
        .nest("/orders", orders::router())
        .nest("/order-items", order_items::router())
}
