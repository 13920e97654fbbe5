//! Requests and lists for shops, categories, products and parameters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Category, Parameter, Product, Shop};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShopRequest {
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    #[validate(url, length(max = 200))]
    pub url: Option<String>,
    pub state: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateShopRequest {
    #[validate(length(min = 1, max = 40))]
    pub name: Option<String>,
    /// `null` clears the url.
    #[serde(default, deserialize_with = "super::nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(url, length(max = 200))]
    pub url: Option<Option<String>>,
    pub state: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopList {
    pub items: Vec<Shop>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    /// Shops offering this category.
    #[serde(default)]
    pub shops: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetCategoryShopsRequest {
    pub shops: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    pub category: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateParameterRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParameterList {
    pub items: Vec<Parameter>,
}
