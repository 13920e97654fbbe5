mod common;

use b2b_orders_api::{
    dto::{
        contacts::{CreateContactRequest, UpdateContactRequest},
        users::{ConfirmEmailRequest, CreateUserRequest, UpdateUserRequest},
    },
    entity::{
        confirm_email_tokens::{Column as TokenCol, Entity as ConfirmEmailTokens},
        contacts::Entity as Contacts,
    },
    error::AppError,
    services::{contact_service, user_service},
    tokens::RandomStringTokenGenerator,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

// Registration issues a confirmation key; keys are unique; confirming consumes
// them; contacts hang off the user and never echo the owner back.
#[tokio::test]
async fn registration_confirmation_and_contacts() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let email = common::unique_email("buyer");
    let user = user_service::register_user(
        &state,
        CreateUserRequest {
            name: "Buyer".into(),
            email: email.clone(),
            password: "correct-horse".into(),
            company: "Acme".into(),
            position: "Purchasing".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(!user.is_active);
    assert!(user.contacts.is_empty());

    let duplicate = user_service::register_user(
        &state,
        CreateUserRequest {
            name: "Again".into(),
            email: email.clone(),
            password: "another-password".into(),
            company: "Acme".into(),
            position: "Purchasing".into(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

    // Racing registrations for one address: exactly one wins, the other is a 400.
    let racing_email = common::unique_email("race");
    let racer = |name: &str| CreateUserRequest {
        name: name.into(),
        email: racing_email.clone(),
        password: "racing-password".into(),
        company: "Acme".into(),
        position: "Purchasing".into(),
    };
    let (a, b) = tokio::join!(
        user_service::register_user(&state, racer("Left")),
        user_service::register_user(&state, racer("Right")),
    );
    let (winner, loser) = match (a, b) {
        (Ok(w), Err(l)) | (Err(l), Ok(w)) => (w, l),
        (a, b) => anyhow::bail!("expected one winner, got {:?} / {:?}", a.is_ok(), b.is_ok()),
    };
    assert!(matches!(loser, AppError::BadRequest(_)));

    let too_long = user_service::register_user(
        &state,
        CreateUserRequest {
            name: "Long".into(),
            email: format!("{}@{}.com", "a".repeat(64), std::array::from_fn::<String, 4, _>(|_| "b".repeat(50)).join(".")),
            password: "long-enough-password".into(),
            company: "Acme".into(),
            position: "Purchasing".into(),
        },
    )
    .await;
    assert!(matches!(too_long, Err(AppError::Validation(_))));

    let short = user_service::register_user(
        &state,
        CreateUserRequest {
            name: "Short".into(),
            email: common::unique_email("short"),
            password: "short".into(),
            company: "Acme".into(),
            position: "Purchasing".into(),
        },
    )
    .await;
    assert!(matches!(short, Err(AppError::Validation(_))));

    let issued = ConfirmEmailTokens::find()
        .filter(TokenCol::UserId.eq(user.id))
        .all(&state.orm)
        .await?;
    assert_eq!(issued.len(), 1);
    assert!(!issued[0].key.is_empty());

    // Reusing a key is refused by the store.
    let generator = RandomStringTokenGenerator::default();
    let clash = user_service::issue_token(
        &state.orm,
        &generator,
        user.id,
        Some(issued[0].key.clone()),
    )
    .await;
    assert!(clash.is_err());

    // An empty key is replaced by a generated one.
    let second = user_service::issue_token(&state.orm, &generator, user.id, Some(String::new()))
        .await?;
    assert!(!second.key.is_empty());
    assert_ne!(second.key, issued[0].key);

    let wrong = user_service::confirm_email(
        &state,
        ConfirmEmailRequest {
            email: email.clone(),
            token: "definitely-not-the-key".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::BadRequest(_))));

    let confirmed = user_service::confirm_email(
        &state,
        ConfirmEmailRequest {
            email: email.clone(),
            token: issued[0].key.clone(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(confirmed.is_active);
    assert_eq!(
        ConfirmEmailTokens::find()
            .filter(TokenCol::UserId.eq(user.id))
            .count(&state.orm)
            .await?,
        0
    );

    let contact = contact_service::create_contact(
        &state,
        CreateContactRequest {
            user: user.id,
            city: "Kazan".into(),
            street: "Baumana".into(),
            building: "12".into(),
            apartment: "4".into(),
            phone: "+79990001122".into(),
        },
    )
    .await?
    .data
    .unwrap();
    let body = serde_json::to_value(&contact)?;
    assert!(body.get("user").is_none());

    let contact = contact_service::update_contact(
        &state,
        contact.id,
        UpdateContactRequest {
            apartment: Some(String::new()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(contact.apartment, "");

    let fetched = user_service::update_user(
        &state,
        user.id,
        UpdateUserRequest {
            position: Some("Head of purchasing".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(fetched.position, "Head of purchasing");
    assert_eq!(fetched.contacts.len(), 1);
    assert_eq!(fetched.contacts[0].id, contact.id);

    user_service::delete_user(&state, winner.data.unwrap().id).await?;

    // Removing the user takes contacts and outstanding tokens along.
    user_service::delete_user(&state, user.id).await?;
    assert!(Contacts::find_by_id(contact.id).one(&state.orm).await?.is_none());
    assert!(matches!(
        user_service::get_user(&state, user.id).await,
        Err(AppError::NotFound)
    ));

    Ok(())
}
