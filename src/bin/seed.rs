use anyhow::anyhow;
use b2b_orders_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        catalog::{CreateCategoryRequest, CreateProductRequest, CreateShopRequest},
        product_infos::{CreateProductInfoRequest, ProductParameterInput},
        users::CreateUserRequest,
    },
    response::ApiResponse,
    services::{catalog_service, product_service, user_service},
    state::AppState,
};
use uuid::Uuid;

const SHOPS: [(&str, &str); 2] = [
    ("Northwind Wholesale", "https://northwind.example.com"),
    ("Contoso Supply", "https://contoso.example.com"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    let orm = create_orm_conn(&config.database_url, 2).await?;
    run_migrations(&orm).await?;
    let state = AppState::new(pool, orm);

    let seeded: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM shops WHERE name = $1")
        .bind(SHOPS[0].0)
        .fetch_optional(&state.pool)
        .await?;
    if seeded.is_some() {
        println!("Catalog already seeded, nothing to do");
        return Ok(());
    }

    let mut shop_ids = Vec::new();
    for (name, url) in SHOPS {
        let shop = data(
            catalog_service::create_shop(
                &state,
                CreateShopRequest {
                    name: name.into(),
                    url: Some(url.into()),
                    state: true,
                },
            )
            .await?,
        )?;
        shop_ids.push(shop.id);
    }

    let phones = data(
        catalog_service::create_category(
            &state,
            CreateCategoryRequest {
                name: "Smartphones".into(),
                shops: shop_ids.clone(),
            },
        )
        .await?,
    )?;
    let accessories = data(
        catalog_service::create_category(
            &state,
            CreateCategoryRequest {
                name: "Accessories".into(),
                shops: vec![shop_ids[1]],
            },
        )
        .await?,
    )?;

    let listings = [
        (phones.id, "Pixel 9", shop_ids[0], 14, 79_900, 84_900, vec![("color", "black"), ("memory", "128 GB")]),
        (phones.id, "Pixel 9", shop_ids[1], 3, 78_500, 84_900, vec![("color", "porcelain"), ("memory", "256 GB")]),
        (accessories.id, "USB-C charger 30W", shop_ids[1], 120, 1_900, 2_490, vec![("color", "white")]),
    ];

    for (category, product_name, shop, quantity, price, price_rrc, parameters) in listings {
        let product = data(
            product_service::create_product(
                &state,
                CreateProductRequest {
                    name: product_name.into(),
                    category,
                },
            )
            .await?,
        )?;
        product_service::create_product_info(
            &state,
            CreateProductInfoRequest {
                product: product.id,
                shop,
                name: product_name.into(),
                quantity,
                price,
                price_rrc,
                product_parameters: parameters
                    .into_iter()
                    .map(|(parameter, value)| ProductParameterInput {
                        parameter: parameter.into(),
                        value: value.into(),
                    })
                    .collect(),
            },
        )
        .await?;
    }
    println!("Seeded catalog");

    let user = data(
        user_service::register_user(
            &state,
            CreateUserRequest {
                name: "Demo Buyer".into(),
                email: "buyer@example.com".into(),
                password: "buyer-password".into(),
                company: "Demo LLC".into(),
                position: "Purchasing manager".into(),
            },
        )
        .await?,
    )?;

    println!("Seed completed. Buyer ID: {}", user.id);
    Ok(())
}

fn data<T>(resp: ApiResponse<T>) -> anyhow::Result<T> {
    resp.data.ok_or_else(|| anyhow!("empty response: {}", resp.message))
}
