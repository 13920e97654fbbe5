use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::contacts::{ContactList, CreateContactRequest, UpdateContactRequest},
    entity::{
        contacts::{ActiveModel as ContactActive, Column as ContactCol, Entity as Contacts},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::Contact,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_contact(
    state: &AppState,
    payload: CreateContactRequest,
) -> AppResult<ApiResponse<Contact>> {
    payload.validate()?;
    if Users::find_by_id(payload.user).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest(format!("User {} does not exist", payload.user)));
    }

    let contact = ContactActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(payload.user),
        city: Set(payload.city),
        street: Set(payload.street),
        building: Set(payload.building),
        apartment: Set(payload.apartment),
        phone: Set(payload.phone),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(contact_id = %contact.id, user_id = %contact.user_id, "contact created");

    Ok(ApiResponse::success(
        "Contact created",
        Contact::from(contact),
        Some(Meta::empty()),
    ))
}

pub async fn list_contacts(state: &AppState, user_id: Uuid) -> AppResult<ApiResponse<ContactList>> {
    if Users::find_by_id(user_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let items: Vec<Contact> = Contacts::find()
        .filter(ContactCol::UserId.eq(user_id))
        .order_by_asc(ContactCol::City)
        .order_by_asc(ContactCol::Street)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Contact::from)
        .collect();

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Contacts",
        ContactList { items },
        Some(meta),
    ))
}

pub async fn update_contact(
    state: &AppState,
    id: Uuid,
    payload: UpdateContactRequest,
) -> AppResult<ApiResponse<Contact>> {
    payload.validate()?;
    let existing = Contacts::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: ContactActive = existing.into();
    if let Some(city) = payload.city {
        active.city = Set(city);
    }
    if let Some(street) = payload.street {
        active.street = Set(street);
    }
    if let Some(building) = payload.building {
        active.building = Set(building);
    }
    if let Some(apartment) = payload.apartment {
        active.apartment = Set(apartment);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    let contact = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        Contact::from(contact),
        Some(Meta::empty()),
    ))
}

pub async fn delete_contact(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Contacts::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(contact_id = %id, "contact deleted");

    Ok(ApiResponse::deleted())
}
