use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::product_infos::{CreateProductInfoRequest, ProductInfoList, UpdateProductInfoRequest},
    error::AppResult,
    models::ProductInfo,
    response::ApiResponse,
    routes::params::ProductInfoQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_product_infos).post(create_product_info))
        .route(
            "/{id}",
            get(get_product_info)
                .patch(update_product_info)
                .delete(delete_product_info),
        )
}

#[utoipa::path(
    get,
    path = "/api/product-infos",
    params(ProductInfoQuery),
    responses(
        (status = 200, description = "List shop listings", body = ApiResponse<ProductInfoList>)
    ),
    tag = "Product infos"
)]
pub async fn list_product_infos(
    State(state): State<AppState>,
    Query(query): Query<ProductInfoQuery>,
) -> AppResult<Json<ApiResponse<ProductInfoList>>> {
    let resp = product_service::list_product_infos(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/product-infos",
    request_body = CreateProductInfoRequest,
    responses(
        (status = 201, description = "Create shop listing", body = ApiResponse<ProductInfo>),
        (status = 400, description = "Validation failed or unknown product/shop")
    ),
    tag = "Product infos"
)]
pub async fn create_product_info(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductInfoRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductInfo>>)> {
    let resp = product_service::create_product_info(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/product-infos/{id}",
    params(("id" = Uuid, Path, description = "Product info ID")),
    responses(
        (status = 200, description = "Get shop listing", body = ApiResponse<ProductInfo>),
        (status = 404, description = "Listing not found")
    ),
    tag = "Product infos"
)]
pub async fn get_product_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductInfo>>> {
    let resp = product_service::get_product_info(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/product-infos/{id}",
    params(("id" = Uuid, Path, description = "Product info ID")),
    request_body = UpdateProductInfoRequest,
    responses(
        (status = 200, description = "Updated shop listing", body = ApiResponse<ProductInfo>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Listing not found")
    ),
    tag = "Product infos"
)]
pub async fn update_product_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductInfoRequest>,
) -> AppResult<Json<ApiResponse<ProductInfo>>> {
    let resp = product_service::update_product_info(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/product-infos/{id}",
    params(("id" = Uuid, Path, description = "Product info ID")),
    responses(
        (status = 200, description = "Deleted shop listing"),
        (status = 404, description = "Listing not found")
    ),
    tag = "Product infos"
)]
pub async fn delete_product_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_product_info(&state, id).await?;
    Ok(Json(resp))
}
