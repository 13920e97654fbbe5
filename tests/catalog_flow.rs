mod common;

use b2b_orders_api::{
    dto::{
        catalog::{
            CreateCategoryRequest, CreateParameterRequest, CreateProductRequest,
            CreateShopRequest, SetCategoryShopsRequest, UpdateShopRequest,
        },
        orders::{CreateOrderItemRequest, CreateOrderRequest},
        product_infos::{CreateProductInfoRequest, ProductParameterInput, UpdateProductInfoRequest},
        users::CreateUserRequest,
    },
    entity::{
        order_items::Entity as OrderItems,
        orders::OrderStatus,
        product_infos::Entity as ProductInfos,
        product_parameters::{Column as ProductParamCol, Entity as ProductParameters},
    },
    error::AppError,
    models::ProductParameter,
    routes::params::ProductInfoQuery,
    services::{catalog_service, order_service, product_service, user_service},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

fn params(pairs: &[(&str, &str)]) -> Vec<ProductParameterInput> {
    pairs
        .iter()
        .map(|(parameter, value)| ProductParameterInput {
            parameter: parameter.to_string(),
            value: value.to_string(),
        })
        .collect()
}

// Catalog flow: shop + category + listing with parameters, then the shop is
// removed and everything hanging off its listings goes with it.
#[tokio::test]
async fn listing_parameters_and_shop_cascade() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let shop = catalog_service::create_shop(
        &state,
        CreateShopRequest {
            name: "Cascade shop".into(),
            url: Some("https://cascade.example.com".into()),
            state: true,
        },
    )
    .await?
    .data
    .unwrap();
    let other_shop = catalog_service::create_shop(
        &state,
        CreateShopRequest {
            name: "Survivor shop".into(),
            url: None,
            state: false,
        },
    )
    .await?
    .data
    .unwrap();

    // An explicit null drops the url; omitting it keeps the current value.
    let renamed = catalog_service::update_shop(
        &state,
        shop.id,
        UpdateShopRequest {
            name: Some("Cascade shop 2".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(renamed.url.as_deref(), Some("https://cascade.example.com"));
    let cleared = catalog_service::update_shop(
        &state,
        shop.id,
        UpdateShopRequest {
            url: Some(None),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert!(cleared.url.is_none());

    let category = catalog_service::create_category(
        &state,
        CreateCategoryRequest {
            name: "Phones".into(),
            shops: vec![shop.id, shop.id],
        },
    )
    .await?
    .data
    .unwrap();

    let linked = catalog_service::list_shop_categories(&state, shop.id)
        .await?
        .data
        .unwrap();
    assert_eq!(linked.items.len(), 1);
    assert_eq!(linked.items[0].id, category.id);

    let relinked = catalog_service::set_category_shops(
        &state,
        category.id,
        SetCategoryShopsRequest {
            shops: vec![shop.id, other_shop.id],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(relinked.items.len(), 2);

    let product = product_service::create_product(
        &state,
        CreateProductRequest {
            name: "Handset".into(),
            category: category.id,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(product.category, "Phones");

    let info = product_service::create_product_info(
        &state,
        CreateProductInfoRequest {
            product: product.id,
            shop: shop.id,
            name: "Handset, black".into(),
            quantity: 5,
            price: 1_000,
            price_rrc: 1_200,
            product_parameters: params(&[("color", "black"), ("memory", "64 GB")]),
        },
    )
    .await?
    .data
    .unwrap();
    let surviving_info = product_service::create_product_info(
        &state,
        CreateProductInfoRequest {
            product: product.id,
            shop: other_shop.id,
            name: "Handset, white".into(),
            quantity: 1,
            price: 990,
            price_rrc: 1_200,
            product_parameters: params(&[("color", "white")]),
        },
    )
    .await?
    .data
    .unwrap();

    // Two listings introducing the same new parameter at once share one row.
    let finish = format!("finish-{}", Uuid::new_v4().simple());
    let listing = |name: &str| CreateProductInfoRequest {
        product: product.id,
        shop: other_shop.id,
        name: name.into(),
        quantity: 1,
        price: 990,
        price_rrc: 1_200,
        product_parameters: params(&[(finish.as_str(), "matte")]),
    };
    let (first, second) = tokio::join!(
        product_service::create_product_info(&state, listing("Handset, matte")),
        product_service::create_product_info(&state, listing("Handset, matte 2")),
    );
    let (first, second) = (first?.data.unwrap(), second?.data.unwrap());
    assert_eq!(first.product_parameters[0].parameter, finish);
    assert_eq!(second.product_parameters[0].parameter, finish);

    let duplicate = product_service::create_parameter(
        &state,
        CreateParameterRequest {
            name: finish.clone(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

    // Nested parameters match the rows linked to the listing, and nothing else.
    let fetched = product_service::get_product_info(&state, info.id)
        .await?
        .data
        .unwrap();
    assert_eq!(fetched.product.name, "Handset");
    assert_eq!(fetched.shop, shop.id);
    let mut names: Vec<_> = fetched
        .product_parameters
        .iter()
        .map(|p| p.parameter.as_str())
        .collect();
    names.sort();
    assert_eq!(names, ["color", "memory"]);
    let linked_rows = ProductParameters::find()
        .filter(ProductParamCol::ProductInfoId.eq(info.id))
        .count(&state.orm)
        .await?;
    assert_eq!(linked_rows as usize, fetched.product_parameters.len());

    // Replacing parameters drops the old ones.
    let updated = product_service::update_product_info(
        &state,
        info.id,
        UpdateProductInfoRequest {
            price: Some(950),
            product_parameters: Some(params(&[("color", "graphite")])),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.price, 950);
    assert_eq!(
        updated.product_parameters,
        vec![ProductParameter {
            parameter: "color".into(),
            value: "graphite".into()
        }]
    );

    let by_shop = product_service::list_product_infos(
        &state,
        ProductInfoQuery {
            shop: Some(shop.id),
            category: Some(category.id),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(by_shop.items.len(), 1);
    assert_eq!(by_shop.items[0].id, info.id);

    // An order line pointing at the listing that is about to disappear.
    let user = user_service::register_user(
        &state,
        CreateUserRequest {
            name: "Cascade".into(),
            email: common::unique_email("cascade"),
            password: "cascade-password".into(),
            company: "Acme".into(),
            position: "Buyer".into(),
        },
    )
    .await?
    .data
    .unwrap();
    let order = order_service::create_order(
        &state,
        CreateOrderRequest {
            user: user.id,
            status: OrderStatus::Basket,
            contact: None,
        },
    )
    .await?
    .data
    .unwrap();
    let item = order_service::add_order_item(
        &state,
        CreateOrderItemRequest {
            order: order.id,
            product_info: info.id,
            quantity: 2,
        },
    )
    .await?
    .data
    .unwrap();

    catalog_service::delete_shop(&state, shop.id).await?;

    assert!(ProductInfos::find_by_id(info.id).one(&state.orm).await?.is_none());
    assert_eq!(
        ProductParameters::find()
            .filter(ProductParamCol::ProductInfoId.eq(info.id))
            .count(&state.orm)
            .await?,
        0
    );
    assert!(OrderItems::find_by_id(item.id).one(&state.orm).await?.is_none());

    // The other shop's listing is untouched, and so is the order itself.
    assert!(ProductInfos::find_by_id(surviving_info.id).one(&state.orm).await?.is_some());
    assert!(order_service::get_order(&state, order.id).await.is_ok());

    let remaining = catalog_service::list_shop_categories(&state, other_shop.id)
        .await?
        .data
        .unwrap();
    assert_eq!(remaining.items.len(), 1);

    assert!(matches!(
        catalog_service::get_shop(&state, shop.id).await,
        Err(AppError::NotFound)
    ));

    catalog_service::delete_category(&state, category.id).await?;
    assert!(ProductInfos::find_by_id(surviving_info.id).one(&state.orm).await?.is_none());
    catalog_service::delete_shop(&state, other_shop.id).await?;
    user_service::delete_user(&state, user.id).await?;

    Ok(())
}
