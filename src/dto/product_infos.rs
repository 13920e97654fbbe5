use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::ProductInfo;

/// Upper bound for prices, keeping `quantity * price` sums within i64.
pub const MAX_PRICE: i64 = i32::MAX as i64;

/// A parameter attached by name; unknown names create the parameter.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductParameterInput {
    #[validate(length(min = 1, max = 50))]
    pub parameter: String,
    #[validate(length(min = 1, max = 50))]
    pub value: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductInfoRequest {
    pub product: Uuid,
    pub shop: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0, max = MAX_PRICE))]
    pub price: i64,
    #[validate(range(min = 0, max = MAX_PRICE))]
    pub price_rrc: i64,
    #[serde(default)]
    #[validate(nested)]
    pub product_parameters: Vec<ProductParameterInput>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductInfoRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, max = MAX_PRICE))]
    pub price: Option<i64>,
    #[validate(range(min = 0, max = MAX_PRICE))]
    pub price_rrc: Option<i64>,
    /// When present, replaces every parameter of the listing.
    #[validate(nested)]
    pub product_parameters: Option<Vec<ProductParameterInput>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductInfoList {
    pub items: Vec<ProductInfo>,
}
