use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{entity::orders::OrderStatus, models::OrderSummary};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub user: Uuid,
    #[serde(default)]
    pub status: OrderStatus,
    /// Delivery contact; must belong to `user`.
    pub contact: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    /// `null` detaches the delivery contact.
    #[serde(default, deserialize_with = "super::nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub contact: Option<Option<Uuid>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItemRequest {
    /// Write-only reference to the owning order.
    pub order: Uuid,
    pub product_info: Uuid,
    #[validate(range(min = 0))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderItemRequest {
    #[validate(range(min = 0))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderSummary>,
}
