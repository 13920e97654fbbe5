use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Contact;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactRequest {
    /// Owning user. Accepted here, never echoed back.
    pub user: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub street: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub building: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub apartment: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub street: Option<String>,
    #[validate(length(max = 100))]
    pub building: Option<String>,
    #[validate(length(max = 50))]
    pub apartment: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactList {
    pub items: Vec<Contact>,
}
