use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CreateParameterRequest, CreateProductRequest, ParameterList, ProductList},
    error::AppResult,
    models::{Parameter, Product},
    response::ApiResponse,
    routes::params::ListQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
}

pub fn parameters_router() -> Router<AppState> {
    Router::new().route("/", get(list_parameters).post(create_parameter))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ListQuery),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query.pagination()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Validation failed or unknown category")
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/parameters",
    params(ListQuery),
    responses(
        (status = 200, description = "List parameters", body = ApiResponse<ParameterList>)
    ),
    tag = "Products"
)]
pub async fn list_parameters(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<ParameterList>>> {
    let resp = product_service::list_parameters(&state, query.pagination()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/parameters",
    request_body = CreateParameterRequest,
    responses(
        (status = 201, description = "Create parameter", body = ApiResponse<Parameter>),
        (status = 400, description = "Validation failed or name taken")
    ),
    tag = "Products"
)]
pub async fn create_parameter(
    State(state): State<AppState>,
    Json(payload): Json<CreateParameterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Parameter>>)> {
    let resp = product_service::create_parameter(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
