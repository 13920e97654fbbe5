use std::{collections::HashSet, str::FromStr};

use b2b_orders_api::{
    dto::{
        contacts::CreateContactRequest,
        catalog::UpdateShopRequest,
        orders::{CreateOrderItemRequest, CreateOrderRequest, UpdateOrderRequest},
        product_infos::{CreateProductInfoRequest, MAX_PRICE},
        users::CreateUserRequest,
    },
    entity::{
        categories, contacts,
        orders::OrderStatus,
        parameters, product_infos, product_parameters, products, users,
    },
    models::{Contact, Order, Product, ProductInfo, ProductParameter, User},
    tokens::{RandomStringTokenGenerator, TokenGenerator},
};
use chrono::Utc;
use sea_orm::Iterable;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

fn contact_model(user_id: Uuid) -> contacts::Model {
    contacts::Model {
        id: Uuid::new_v4(),
        user_id,
        city: "Kazan".into(),
        street: "Baumana".into(),
        building: "12".into(),
        apartment: String::new(),
        phone: "+79990001122".into(),
    }
}

fn user_request(password: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: "Ivan".into(),
        email: "ivan@example.com".into(),
        password: password.into(),
        company: "Acme".into(),
        position: "Buyer".into(),
    }
}

#[test]
fn contact_output_never_carries_the_owner() {
    let user_id = Uuid::new_v4();
    let value = serde_json::to_value(Contact::from(contact_model(user_id))).unwrap();

    let keys: HashSet<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        HashSet::from(["id", "city", "street", "building", "apartment", "phone"])
    );
    assert!(!value.to_string().contains(&user_id.to_string()));
}

#[test]
fn contact_input_accepts_the_owner() {
    let user_id = Uuid::new_v4();
    let req: CreateContactRequest = serde_json::from_value(json!({
        "user": user_id,
        "city": "Kazan",
        "street": "Baumana",
        "phone": "+79990001122"
    }))
    .unwrap();
    assert_eq!(req.user, user_id);
    assert_eq!(req.building, "");
    assert_eq!(req.apartment, "");
    assert!(req.validate().is_ok());

    let missing_user = serde_json::from_value::<CreateContactRequest>(json!({
        "city": "Kazan",
        "street": "Baumana",
        "phone": "+79990001122"
    }));
    assert!(missing_user.is_err());
}

#[test]
fn short_password_is_rejected() {
    let err = user_request("123456789").validate().unwrap_err();
    assert!(err.field_errors().contains_key("password"));

    assert!(user_request("1234567890").validate().is_ok());
}

#[test]
fn blank_company_and_position_are_rejected() {
    let mut req = user_request("long-enough-password");
    req.company = String::new();
    req.position = String::new();
    let err = req.validate().unwrap_err();
    assert!(err.field_errors().contains_key("company"));
    assert!(err.field_errors().contains_key("position"));
}

#[test]
fn email_longer_than_the_column_is_rejected() {
    // Local part and every domain label are within their own limits.
    let label = "b".repeat(50);
    let email = format!("{}@{label}.{label}.{label}.{label}.com", "a".repeat(64));
    assert_eq!(email.len(), 272);

    let mut req = user_request("long-enough-password");
    req.email = email;
    let err = req.validate().unwrap_err();
    assert!(err.field_errors().contains_key("email"));
}

#[test]
fn invalid_email_is_rejected() {
    let mut req = user_request("long-enough-password");
    req.email = "not-an-email".into();
    let err = req.validate().unwrap_err();
    assert!(err.field_errors().contains_key("email"));
}

#[test]
fn user_output_hides_password_and_nests_contacts() {
    let user = users::Model {
        id: Uuid::new_v4(),
        name: "Ivan".into(),
        email: "ivan@example.com".into(),
        password_hash: "$argon2id$v=19$secret".into(),
        company: "Acme".into(),
        position: "Buyer".into(),
        is_active: false,
        created_at: Utc::now().into(),
    };
    let contacts = vec![contact_model(user.id), contact_model(user.id)];

    let value = serde_json::to_value(User::from_parts(user, contacts)).unwrap();
    let obj = value.as_object().unwrap();
    assert!(!obj.contains_key("password"));
    assert!(!obj.contains_key("password_hash"));
    assert!(!value.to_string().contains("argon2"));
    assert_eq!(obj["contacts"].as_array().unwrap().len(), 2);
}

#[test]
fn order_status_accepts_exactly_seven_values() {
    let names: Vec<&str> = OrderStatus::iter().map(|s| s.as_str()).collect();
    assert_eq!(
        names,
        ["basket", "new", "confirmed", "assembled", "sent", "delivered", "canceled"]
    );

    for name in &names {
        let req: CreateOrderRequest = serde_json::from_value(json!({
            "user": Uuid::new_v4(),
            "status": name
        }))
        .unwrap();
        assert_eq!(req.status.as_str(), *name);
        assert_eq!(OrderStatus::from_str(name).unwrap(), req.status);
    }

    for bad in ["paid", "BASKET", "", "true"] {
        let rejected = serde_json::from_value::<CreateOrderRequest>(json!({
            "user": Uuid::new_v4(),
            "status": bad
        }));
        assert!(rejected.is_err(), "status {bad:?} should be rejected");
        assert!(OrderStatus::from_str(bad).is_err());
    }

    let boolean = serde_json::from_value::<UpdateOrderRequest>(json!({ "status": true }));
    assert!(boolean.is_err());
}

#[test]
fn new_orders_default_to_basket() {
    let req: CreateOrderRequest = serde_json::from_value(json!({ "user": Uuid::new_v4() })).unwrap();
    assert_eq!(req.status, OrderStatus::Basket);
    assert!(req.contact.is_none());
}

#[test]
fn negative_amounts_are_rejected() {
    let req: CreateProductInfoRequest = serde_json::from_value(json!({
        "product": Uuid::new_v4(),
        "shop": Uuid::new_v4(),
        "name": "Phone",
        "quantity": 1,
        "price": -5,
        "price_rrc": 10
    }))
    .unwrap();
    let err = req.validate().unwrap_err();
    assert!(err.field_errors().contains_key("price"));

    let item = CreateOrderItemRequest {
        order: Uuid::new_v4(),
        product_info: Uuid::new_v4(),
        quantity: -1,
    };
    assert!(item.validate().is_err());
}

#[test]
fn prices_are_capped() {
    let listing = |price: i64| {
        serde_json::from_value::<CreateProductInfoRequest>(json!({
            "product": Uuid::new_v4(),
            "shop": Uuid::new_v4(),
            "name": "Phone",
            "quantity": i32::MAX,
            "price": price,
            "price_rrc": price
        }))
        .unwrap()
    };
    assert!(listing(MAX_PRICE).validate().is_ok());

    let err = listing(i64::MAX).validate().unwrap_err();
    assert!(err.field_errors().contains_key("price"));
    assert!(err.field_errors().contains_key("price_rrc"));
}

#[test]
fn product_parameters_are_validated_when_nested() {
    let req: CreateProductInfoRequest = serde_json::from_value(json!({
        "product": Uuid::new_v4(),
        "shop": Uuid::new_v4(),
        "name": "Phone",
        "quantity": 1,
        "price": 5,
        "price_rrc": 10,
        "product_parameters": [{ "parameter": "", "value": "red" }]
    }))
    .unwrap();
    assert!(req.validate().is_err());
}

#[test]
fn parameter_value_is_required() {
    let req: CreateProductInfoRequest = serde_json::from_value(json!({
        "product": Uuid::new_v4(),
        "shop": Uuid::new_v4(),
        "name": "Phone",
        "quantity": 1,
        "price": 5,
        "price_rrc": 10,
        "product_parameters": [{ "parameter": "color", "value": "" }]
    }))
    .unwrap();
    assert!(req.validate().is_err());
}

#[test]
fn patch_null_clears_and_absent_keeps() {
    let absent: UpdateOrderRequest = serde_json::from_value(json!({ "status": "new" })).unwrap();
    assert_eq!(absent.contact, None);

    let cleared: UpdateOrderRequest = serde_json::from_value(json!({ "contact": null })).unwrap();
    assert_eq!(cleared.contact, Some(None));

    let id = Uuid::new_v4();
    let set: UpdateOrderRequest = serde_json::from_value(json!({ "contact": id })).unwrap();
    assert_eq!(set.contact, Some(Some(id)));

    let shop: UpdateShopRequest = serde_json::from_value(json!({ "url": null })).unwrap();
    assert_eq!(shop.url, Some(None));
    assert!(shop.validate().is_ok());

    let shop: UpdateShopRequest = serde_json::from_value(json!({ "url": "not a url" })).unwrap();
    assert!(shop.validate().is_err());
}

#[test]
fn product_flattens_category_name() {
    let category = categories::Model {
        id: Uuid::new_v4(),
        name: "Smartphones".into(),
    };
    let product = products::Model {
        id: Uuid::new_v4(),
        category_id: category.id,
        name: "Pixel".into(),
    };

    let value = serde_json::to_value(Product::from_parts(product, Some(category))).unwrap();
    assert_eq!(value["name"], "Pixel");
    assert_eq!(value["category"], "Smartphones");
}

#[test]
fn listing_nests_exactly_its_own_parameters() {
    let color = parameters::Model {
        id: Uuid::new_v4(),
        name: "color".into(),
    };
    let memory = parameters::Model {
        id: Uuid::new_v4(),
        name: "memory".into(),
    };
    let info_id = Uuid::new_v4();
    let other_info_id = Uuid::new_v4();
    let row = |product_info_id: Uuid, parameter: &parameters::Model, value: &str| {
        (
            product_parameters::Model {
                id: Uuid::new_v4(),
                product_info_id,
                parameter_id: parameter.id,
                value: value.into(),
            },
            Some(parameter.clone()),
        )
    };
    let rows = vec![
        row(info_id, &color, "black"),
        row(other_info_id, &color, "white"),
        row(info_id, &memory, "128 GB"),
    ];

    let parameters = ProductParameter::for_listing(info_id, &rows);
    assert_eq!(
        parameters,
        vec![
            ProductParameter {
                parameter: "color".into(),
                value: "black".into()
            },
            ProductParameter {
                parameter: "memory".into(),
                value: "128 GB".into()
            },
        ]
    );

    let info = product_infos::Model {
        id: info_id,
        product_id: Uuid::new_v4(),
        shop_id: Uuid::new_v4(),
        name: "Pixel 9 black".into(),
        quantity: 3,
        price: 79_900,
        price_rrc: 84_900,
    };
    let product = Product {
        id: info.product_id,
        name: "Pixel 9".into(),
        category: "Smartphones".into(),
    };
    let shop_id = info.shop_id;
    let value = serde_json::to_value(ProductInfo::from_parts(info, product, parameters)).unwrap();
    assert_eq!(value["shop"], json!(shop_id));
    assert_eq!(value["product"]["category"], "Smartphones");
    assert_eq!(value["product_parameters"].as_array().unwrap().len(), 2);
    assert_eq!(value["product_parameters"][1]["parameter"], "memory");

    assert!(ProductParameter::for_listing(Uuid::new_v4(), &rows).is_empty());
}

#[test]
fn order_output_shape() {
    let order = Order {
        id: Uuid::new_v4(),
        ordered_items: Vec::new(),
        status: OrderStatus::Confirmed,
        dt: Utc::now(),
        total_sum: 0,
        contact: None,
    };
    let value = serde_json::to_value(order).unwrap();
    assert_eq!(value["status"], "confirmed");
    assert_eq!(value["total_sum"], 0);
    assert!(value["contact"].is_null());
    assert!(value["ordered_items"].as_array().unwrap().is_empty());
    assert!(value.get("dt").is_some());
}

#[test]
fn generated_keys_do_not_repeat() {
    let generator = RandomStringTokenGenerator::default();
    let keys: HashSet<String> = (0..1_000).map(|_| generator.generate_token()).collect();
    assert_eq!(keys.len(), 1_000);
    assert!(keys.iter().all(|k| !k.is_empty() && k.len() <= 64));
}
