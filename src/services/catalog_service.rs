//! Shops and categories, including the many-to-many link between them.

use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::catalog::{
        CategoryList, CreateCategoryRequest, CreateShopRequest, SetCategoryShopsRequest, ShopList,
        UpdateShopRequest,
    },
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories},
        shop_categories::{
            ActiveModel as ShopCategoryActive, Column as ShopCategoryCol,
            Entity as ShopCategories,
        },
        shops::{ActiveModel as ShopActive, Column as ShopCol, Entity as Shops},
    },
    error::{AppError, AppResult},
    models::{Category, Shop},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn create_shop(
    state: &AppState,
    payload: CreateShopRequest,
) -> AppResult<ApiResponse<Shop>> {
    payload.validate()?;
    let shop = ShopActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        url: Set(payload.url),
        state: Set(payload.state),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(shop_id = %shop.id, "shop created");

    Ok(ApiResponse::success(
        "Shop created",
        Shop::from(shop),
        Some(Meta::empty()),
    ))
}

pub async fn list_shops(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ShopList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Shops::find().order_by_asc(ShopCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Shop::from)
        .collect();

    Ok(ApiResponse::success(
        "Shops",
        ShopList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_shop(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Shop>> {
    let shop = Shops::find_by_id(id).one(&state.orm).await?;
    match shop {
        Some(s) => Ok(ApiResponse::success("Shop", Shop::from(s), None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn update_shop(
    state: &AppState,
    id: Uuid,
    payload: UpdateShopRequest,
) -> AppResult<ApiResponse<Shop>> {
    payload.validate()?;
    let existing = Shops::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: ShopActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(url) = payload.url {
        active.url = Set(url);
    }
    if let Some(flag) = payload.state {
        active.state = Set(flag);
    }
    let shop = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        Shop::from(shop),
        Some(Meta::empty()),
    ))
}

/// Deletes the shop. Its listings, their parameters and any order lines
/// referencing them go with it through the FK cascade.
pub async fn delete_shop(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Shops::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(shop_id = %id, "shop deleted");

    Ok(ApiResponse::deleted())
}

pub async fn list_shop_categories(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<CategoryList>> {
    let shop = Shops::find_by_id(id).one(&state.orm).await?;
    let shop = match shop {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let items: Vec<Category> = shop
        .find_related(Categories)
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(meta),
    ))
}

pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    payload.validate()?;
    let shop_ids = dedup(&payload.shops);

    let txn = state.orm.begin().await?;
    ensure_shops_exist(&txn, &shop_ids).await?;

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
    }
    .insert(&txn)
    .await?;
    link_shops(&txn, category.id, &shop_ids).await?;
    txn.commit().await?;

    tracing::info!(category_id = %category.id, shops = shop_ids.len(), "category created");

    Ok(ApiResponse::success(
        "Category created",
        Category::from(category),
        Some(Meta::empty()),
    ))
}

pub async fn list_categories(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CategoryList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Categories::find().order_by_asc(CategoryCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_category(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Category>> {
    let category = Categories::find_by_id(id).one(&state.orm).await?;
    match category {
        Some(c) => Ok(ApiResponse::success("Category", Category::from(c), None)),
        None => Err(AppError::NotFound),
    }
}

/// Replaces the set of shops linked to a category.
pub async fn set_category_shops(
    state: &AppState,
    id: Uuid,
    payload: SetCategoryShopsRequest,
) -> AppResult<ApiResponse<ShopList>> {
    let shop_ids = dedup(&payload.shops);

    let txn = state.orm.begin().await?;
    let category = Categories::find_by_id(id).one(&txn).await?;
    let category = match category {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    ensure_shops_exist(&txn, &shop_ids).await?;

    ShopCategories::delete_many()
        .filter(ShopCategoryCol::CategoryId.eq(category.id))
        .exec(&txn)
        .await?;
    link_shops(&txn, category.id, &shop_ids).await?;

    let items: Vec<Shop> = category
        .find_related(Shops)
        .order_by_asc(ShopCol::Name)
        .all(&txn)
        .await?
        .into_iter()
        .map(Shop::from)
        .collect();
    txn.commit().await?;

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Shops linked",
        ShopList { items },
        Some(meta),
    ))
}

pub async fn delete_category(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(category_id = %id, "category deleted");

    Ok(ApiResponse::deleted())
}

fn dedup(ids: &[Uuid]) -> Vec<Uuid> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

async fn ensure_shops_exist<C: ConnectionTrait>(conn: &C, shop_ids: &[Uuid]) -> AppResult<()> {
    if shop_ids.is_empty() {
        return Ok(());
    }
    let found = Shops::find()
        .filter(ShopCol::Id.is_in(shop_ids.iter().copied()))
        .count(conn)
        .await?;
    if found as usize != shop_ids.len() {
        return Err(AppError::BadRequest("Unknown shop in shops".into()));
    }
    Ok(())
}

async fn link_shops<C: ConnectionTrait>(
    conn: &C,
    category_id: Uuid,
    shop_ids: &[Uuid],
) -> AppResult<()> {
    if shop_ids.is_empty() {
        return Ok(());
    }
    let links = shop_ids.iter().map(|shop_id| ShopCategoryActive {
        shop_id: Set(*shop_id),
        category_id: Set(category_id),
    });
    ShopCategories::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
