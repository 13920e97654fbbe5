use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::users::{ConfirmEmailRequest, CreateUserRequest, UpdateUserRequest},
    entity::{
        confirm_email_tokens::{
            ActiveModel as TokenActive, Column as TokenCol, Entity as ConfirmEmailTokens,
            Model as TokenModel,
        },
        contacts::Entity as Contacts,
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    tokens::TokenGenerator,
};

const EMAIL_TAKEN: &str = "Email is already taken";

pub async fn register_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    payload.validate()?;
    ensure_email_free(state, &payload.email, None).await?;

    let password_hash = hash_password(&payload.password)?;

    let txn = state.orm.begin().await?;
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        company: Set(payload.company),
        position: Set(payload.position),
        is_active: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await
    .map_err(|e| AppError::on_unique_violation(e, EMAIL_TAKEN))?;

    issue_token(&txn, state.tokens.as_ref(), user.id, None).await?;
    txn.commit().await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(ApiResponse::success(
        "User created",
        User::from_parts(user, Vec::new()),
        Some(Meta::empty()),
    ))
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<User>> {
    let user = find_user(state, id).await?;
    let data = with_contacts(state, user).await?;
    Ok(ApiResponse::success("User", data, None))
}

pub async fn update_user(
    state: &AppState,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    payload.validate()?;
    let existing = find_user(state, id).await?;

    if let Some(email) = payload.email.as_deref().filter(|e| *e != existing.email) {
        ensure_email_free(state, email, Some(id)).await?;
    }

    let mut active: UserActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(password) = payload.password {
        active.password_hash = Set(hash_password(&password)?);
    }
    if let Some(company) = payload.company {
        active.company = Set(company);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    let user = active
        .update(&state.orm)
        .await
        .map_err(|e| AppError::on_unique_violation(e, EMAIL_TAKEN))?;

    tracing::info!(user_id = %user.id, "user updated");

    let data = with_contacts(state, user).await?;
    Ok(ApiResponse::success("Updated", data, Some(Meta::empty())))
}

pub async fn delete_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = %id, "user deleted");

    Ok(ApiResponse::deleted())
}

/// Activates the account owning `email` when `token` is one of its keys.
/// All outstanding keys of the user are consumed.
pub async fn confirm_email(
    state: &AppState,
    payload: ConfirmEmailRequest,
) -> AppResult<ApiResponse<User>> {
    payload.validate()?;
    let invalid = || AppError::BadRequest("Invalid email or token".into());

    let user = Users::find()
        .filter(UserCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(invalid)?;

    let txn = state.orm.begin().await?;
    let token = ConfirmEmailTokens::find()
        .filter(
            Condition::all()
                .add(TokenCol::UserId.eq(user.id))
                .add(TokenCol::Key.eq(payload.token.as_str())),
        )
        .one(&txn)
        .await?;
    if token.is_none() {
        return Err(invalid());
    }

    let mut active: UserActive = user.into();
    active.is_active = Set(true);
    let user = active.update(&txn).await?;

    ConfirmEmailTokens::delete_many()
        .filter(TokenCol::UserId.eq(user.id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    tracing::info!(user_id = %user.id, "email confirmed");

    let data = with_contacts(state, user).await?;
    Ok(ApiResponse::success("Email confirmed", data, Some(Meta::empty())))
}

/// Stores a confirmation token for `user_id`. A missing or empty `key` is
/// replaced by one from `generator`.
pub async fn issue_token<C>(
    conn: &C,
    generator: &dyn TokenGenerator,
    user_id: Uuid,
    key: Option<String>,
) -> AppResult<TokenModel>
where
    C: ConnectionTrait,
{
    let key = key
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| generator.generate_token());

    let token = TokenActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        created_at: Set(Utc::now().into()),
        key: Set(key),
    }
    .insert(conn)
    .await?;

    Ok(token)
}

async fn find_user(state: &AppState, id: Uuid) -> AppResult<UserModel> {
    match Users::find_by_id(id).one(&state.orm).await? {
        Some(u) => Ok(u),
        None => Err(AppError::NotFound),
    }
}

async fn with_contacts(state: &AppState, user: UserModel) -> AppResult<User> {
    let contacts = user.find_related(Contacts).all(&state.orm).await?;
    Ok(User::from_parts(user, contacts))
}

async fn ensure_email_free(state: &AppState, email: &str, except: Option<Uuid>) -> AppResult<()> {
    let mut condition = Condition::all().add(UserCol::Email.eq(email));
    if let Some(id) = except {
        condition = condition.add(UserCol::Id.ne(id));
    }
    let exist = Users::find().filter(condition).one(&state.orm).await?;
    if exist.is_some() {
        return Err(AppError::BadRequest(EMAIL_TAKEN.to_string()));
    }
    Ok(())
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}
