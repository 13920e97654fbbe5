use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{patch, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderItemRequest, UpdateOrderItemRequest},
    error::AppResult,
    models::{OrderItem, OrderItemDetail},
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_order_item))
        .route("/{id}", patch(update_order_item).delete(delete_order_item))
}

#[utoipa::path(
    post,
    path = "/api/order-items",
    request_body = CreateOrderItemRequest,
    responses(
        (status = 201, description = "Add a line to an order", body = ApiResponse<OrderItemDetail>),
        (status = 400, description = "Validation failed or unknown order/listing")
    ),
    tag = "Orders"
)]
pub async fn add_order_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderItemDetail>>)> {
    let resp = order_service::add_order_item(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/order-items/{id}",
    params(("id" = Uuid, Path, description = "Order item ID")),
    request_body = UpdateOrderItemRequest,
    responses(
        (status = 200, description = "Updated line", body = ApiResponse<OrderItem>),
        (status = 404, description = "Order item not found")
    ),
    tag = "Orders"
)]
pub async fn update_order_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderItemRequest>,
) -> AppResult<Json<ApiResponse<OrderItem>>> {
    let resp = order_service::update_order_item(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/order-items/{id}",
    params(("id" = Uuid, Path, description = "Order item ID")),
    responses(
        (status = 200, description = "Deleted line"),
        (status = 404, description = "Order item not found")
    ),
    tag = "Orders"
)]
pub async fn delete_order_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = order_service::delete_order_item(&state, id).await?;
    Ok(Json(resp))
}
