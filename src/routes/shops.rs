use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CategoryList, CreateShopRequest, ShopList, UpdateShopRequest},
    error::AppResult,
    models::Shop,
    response::ApiResponse,
    routes::params::ListQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shops).post(create_shop))
        .route(
            "/{id}",
            get(get_shop).patch(update_shop).delete(delete_shop),
        )
        .route("/{id}/categories", get(list_shop_categories))
}

#[utoipa::path(
    get,
    path = "/api/shops",
    params(ListQuery),
    responses(
        (status = 200, description = "List shops", body = ApiResponse<ShopList>)
    ),
    tag = "Shops"
)]
pub async fn list_shops(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<ShopList>>> {
    let resp = catalog_service::list_shops(&state, query.pagination()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Create shop", body = ApiResponse<Shop>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Shops"
)]
pub async fn create_shop(
    State(state): State<AppState>,
    Json(payload): Json<CreateShopRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Shop>>)> {
    let resp = catalog_service::create_shop(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Get shop", body = ApiResponse<Shop>),
        (status = 404, description = "Shop not found")
    ),
    tag = "Shops"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Shop>>> {
    let resp = catalog_service::get_shop(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = UpdateShopRequest,
    responses(
        (status = 200, description = "Updated shop", body = ApiResponse<Shop>),
        (status = 404, description = "Shop not found")
    ),
    tag = "Shops"
)]
pub async fn update_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShopRequest>,
) -> AppResult<Json<ApiResponse<Shop>>> {
    let resp = catalog_service::update_shop(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Deleted shop with its listings"),
        (status = 404, description = "Shop not found")
    ),
    tag = "Shops"
)]
pub async fn delete_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_shop(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}/categories",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Categories offered by the shop", body = ApiResponse<CategoryList>),
        (status = 404, description = "Shop not found")
    ),
    tag = "Shops"
)]
pub async fn list_shop_categories(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_shop_categories(&state, id).await?;
    Ok(Json(resp))
}
