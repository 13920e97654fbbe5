//! Read-side representations of the persisted entities.
//!
//! Each type is the wire shape of one entity. Write-only fields (owning user
//! of a contact, the order an item belongs to, passwords) are deliberately
//! absent here and only appear on the request types in [`crate::dto`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    categories, contacts, order_items, orders::OrderStatus, parameters, product_infos,
    product_parameters, shops, users,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: Uuid,
    pub city: String,
    pub street: String,
    pub building: String,
    pub apartment: String,
    pub phone: String,
}

impl From<contacts::Model> for Contact {
    fn from(model: contacts::Model) -> Self {
        Self {
            id: model.id,
            city: model.city,
            street: model.street,
            building: model.building,
            apartment: model.apartment,
            phone: model.phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub is_active: bool,
    pub contacts: Vec<Contact>,
}

impl User {
    pub fn from_parts(model: users::Model, contacts: Vec<contacts::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            company: model.company,
            position: model.position,
            is_active: model.is_active,
            contacts: contacts.into_iter().map(Contact::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub state: bool,
}

impl From<shops::Model> for Shop {
    fn from(model: shops::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            url: model.url,
            state: model.state,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Parameter {
    pub id: Uuid,
    pub name: String,
}

impl From<parameters::Model> for Parameter {
    fn from(model: parameters::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// A product with its category flattened to the category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

impl Product {
    pub fn from_parts(
        model: crate::entity::products::Model,
        category: Option<categories::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: category.map(|c| c.name).unwrap_or_default(),
        }
    }
}

/// A `parameter: value` pair attached to a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductParameter {
    pub parameter: String,
    pub value: String,
}

impl ProductParameter {
    /// Picks the rows belonging to `product_info_id` out of a batch loaded for
    /// several listings.
    pub fn for_listing(
        product_info_id: Uuid,
        rows: &[(product_parameters::Model, Option<parameters::Model>)],
    ) -> Vec<Self> {
        rows.iter()
            .filter(|(pp, _)| pp.product_info_id == product_info_id)
            .map(|(pp, parameter)| Self {
                parameter: parameter
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                value: pp.value.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductInfo {
    pub id: Uuid,
    pub product: Product,
    pub name: String,
    pub shop: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub price_rrc: i64,
    pub product_parameters: Vec<ProductParameter>,
}

impl ProductInfo {
    pub fn from_parts(
        model: product_infos::Model,
        product: Product,
        product_parameters: Vec<ProductParameter>,
    ) -> Self {
        Self {
            id: model.id,
            product,
            name: model.name,
            shop: model.shop_id,
            quantity: model.quantity,
            price: model.price,
            price_rrc: model.price_rrc,
            product_parameters,
        }
    }
}

/// Order line with the listing referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_info: Uuid,
    pub quantity: i32,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            product_info: model.product_info_id,
            quantity: model.quantity,
        }
    }
}

/// Order line with the full listing nested.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub product_info: ProductInfo,
    pub quantity: i32,
}

impl OrderItemDetail {
    pub fn from_parts(model: order_items::Model, product_info: ProductInfo) -> Self {
        Self {
            id: model.id,
            product_info,
            quantity: model.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub ordered_items: Vec<OrderItemDetail>,
    pub status: OrderStatus,
    pub dt: DateTime<Utc>,
    pub total_sum: i64,
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderSummary {
    pub id: Uuid,
    pub status: OrderStatus,
    pub dt: DateTime<Utc>,
    pub total_sum: i64,
    pub contact: Option<Uuid>,
}
