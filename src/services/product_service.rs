//! Products, parameters and per-shop product listings.

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
    sea_query::OnConflict,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        catalog::{CreateParameterRequest, CreateProductRequest, ParameterList, ProductList},
        product_infos::{
            CreateProductInfoRequest, ProductInfoList, ProductParameterInput,
            UpdateProductInfoRequest,
        },
    },
    entity::{
        categories::Entity as Categories,
        parameters::{
            ActiveModel as ParameterActive, Column as ParamCol, Entity as Parameters,
            Model as ParameterModel,
        },
        product_infos::{
            self, ActiveModel as InfoActive, Column as InfoCol, Entity as ProductInfos,
            Model as InfoModel,
        },
        product_parameters::{
            ActiveModel as ProductParamActive, Column as ProductParamCol,
            Entity as ProductParameters,
        },
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products},
        shops::Entity as Shops,
    },
    error::{AppError, AppResult},
    models::{Parameter, Product, ProductInfo, ProductParameter},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, ProductInfoQuery},
    state::AppState,
};

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let category = Categories::find_by_id(payload.category)
        .one(&state.orm)
        .await?;
    let category = match category {
        Some(c) => c,
        None => {
            return Err(AppError::BadRequest(format!(
                "Category {} does not exist",
                payload.category
            )));
        }
    };

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        category_id: Set(category.id),
        name: Set(payload.name),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok(ApiResponse::success(
        "Product created",
        Product::from_parts(product, Some(category)),
        Some(Meta::empty()),
    ))
}

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Products::find().order_by_asc(ProdCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .find_also_related(Categories)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(product, category)| Product::from_parts(product, category))
        .collect();

    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .find_also_related(Categories)
        .one(&state.orm)
        .await?;
    match result {
        Some((product, category)) => Ok(ApiResponse::success(
            "Product",
            Product::from_parts(product, category),
            None,
        )),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_parameter(
    state: &AppState,
    payload: CreateParameterRequest,
) -> AppResult<ApiResponse<Parameter>> {
    payload.validate()?;
    let exist = Parameters::find()
        .filter(ParamCol::Name.eq(payload.name.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest(format!(
            "Parameter {} already exists",
            payload.name
        )));
    }

    let name = payload.name;
    let parameter = ParameterActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.clone()),
    }
    .insert(&state.orm)
    .await
    .map_err(|e| AppError::on_unique_violation(e, format!("Parameter {name} already exists")))?;

    Ok(ApiResponse::success(
        "Parameter created",
        Parameter::from(parameter),
        Some(Meta::empty()),
    ))
}

pub async fn list_parameters(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ParameterList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Parameters::find().order_by_asc(ParamCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Parameter::from)
        .collect();

    Ok(ApiResponse::success(
        "Parameters",
        ParameterList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn create_product_info(
    state: &AppState,
    payload: CreateProductInfoRequest,
) -> AppResult<ApiResponse<ProductInfo>> {
    payload.validate()?;
    ensure_unique_parameters(&payload.product_parameters)?;

    if Products::find_by_id(payload.product).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Product {} does not exist",
            payload.product
        )));
    }
    if Shops::find_by_id(payload.shop).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Shop {} does not exist",
            payload.shop
        )));
    }

    let txn = state.orm.begin().await?;
    let info = InfoActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(payload.product),
        shop_id: Set(payload.shop),
        name: Set(payload.name),
        quantity: Set(payload.quantity),
        price: Set(payload.price),
        price_rrc: Set(payload.price_rrc),
    }
    .insert(&txn)
    .await?;
    attach_parameters(&txn, info.id, &payload.product_parameters).await?;
    txn.commit().await?;

    tracing::info!(
        product_info_id = %info.id,
        shop_id = %info.shop_id,
        parameters = payload.product_parameters.len(),
        "product info created"
    );

    let data = load_product_info(&state.orm, info).await?;
    Ok(ApiResponse::success(
        "Product info created",
        data,
        Some(Meta::empty()),
    ))
}

pub async fn list_product_infos(
    state: &AppState,
    query: ProductInfoQuery,
) -> AppResult<ApiResponse<ProductInfoList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(shop) = query.shop {
        condition = condition.add(InfoCol::ShopId.eq(shop));
    }
    let mut finder = ProductInfos::find();
    if let Some(category) = query.category {
        finder = finder.join(JoinType::InnerJoin, product_infos::Relation::Products.def());
        condition = condition.add(ProdCol::CategoryId.eq(category));
    }
    let finder = finder
        .filter(condition)
        .order_by_asc(InfoCol::Name)
        .order_by_asc(InfoCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;
    let infos = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = load_product_infos(&state.orm, infos).await?;

    Ok(ApiResponse::success(
        "Product infos",
        ProductInfoList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_product_info(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductInfo>> {
    let info = ProductInfos::find_by_id(id).one(&state.orm).await?;
    let info = match info {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };
    let data = load_product_info(&state.orm, info).await?;
    Ok(ApiResponse::success("Product info", data, None))
}

pub async fn update_product_info(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductInfoRequest,
) -> AppResult<ApiResponse<ProductInfo>> {
    payload.validate()?;
    if let Some(parameters) = payload.product_parameters.as_deref() {
        ensure_unique_parameters(parameters)?;
    }

    let txn = state.orm.begin().await?;
    let existing = ProductInfos::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let mut active: InfoActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(price_rrc) = payload.price_rrc {
        active.price_rrc = Set(price_rrc);
    }
    let info = active.update(&txn).await?;

    if let Some(parameters) = payload.product_parameters {
        ProductParameters::delete_many()
            .filter(ProductParamCol::ProductInfoId.eq(info.id))
            .exec(&txn)
            .await?;
        attach_parameters(&txn, info.id, &parameters).await?;
    }
    txn.commit().await?;

    let data = load_product_info(&state.orm, info).await?;
    Ok(ApiResponse::success("Updated", data, Some(Meta::empty())))
}

pub async fn delete_product_info(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = ProductInfos::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(product_info_id = %id, "product info deleted");

    Ok(ApiResponse::deleted())
}

pub(crate) async fn load_product_info<C: ConnectionTrait>(
    conn: &C,
    info: InfoModel,
) -> AppResult<ProductInfo> {
    let mut items = load_product_infos(conn, vec![info]).await?;
    items
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("product info vanished while loading")))
}

/// Builds the nested representation of several listings with two batched
/// queries: one for products with their categories, one for parameters.
pub(crate) async fn load_product_infos<C: ConnectionTrait>(
    conn: &C,
    infos: Vec<InfoModel>,
) -> AppResult<Vec<ProductInfo>> {
    if infos.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: HashSet<Uuid> = infos.iter().map(|i| i.product_id).collect();
    let info_ids: Vec<Uuid> = infos.iter().map(|i| i.id).collect();

    let products: HashMap<Uuid, Product> = Products::find()
        .filter(ProdCol::Id.is_in(product_ids))
        .find_also_related(Categories)
        .all(conn)
        .await?
        .into_iter()
        .map(|(product, category)| (product.id, Product::from_parts(product, category)))
        .collect();

    let parameter_rows = ProductParameters::find()
        .filter(ProductParamCol::ProductInfoId.is_in(info_ids))
        .find_also_related(Parameters)
        .order_by_asc(ParamCol::Name)
        .all(conn)
        .await?;

    infos
        .into_iter()
        .map(|info| {
            let product = products.get(&info.product_id).cloned().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "product {} of listing {} is missing",
                    info.product_id,
                    info.id
                ))
            })?;
            let parameters = ProductParameter::for_listing(info.id, &parameter_rows);
            Ok(ProductInfo::from_parts(info, product, parameters))
        })
        .collect()
}

fn ensure_unique_parameters(parameters: &[ProductParameterInput]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for p in parameters {
        if !seen.insert(p.parameter.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Parameter {} given more than once",
                p.parameter
            )));
        }
    }
    Ok(())
}

async fn attach_parameters<C: ConnectionTrait>(
    conn: &C,
    product_info_id: Uuid,
    parameters: &[ProductParameterInput],
) -> AppResult<()> {
    for input in parameters {
        let parameter = get_or_create_parameter(conn, &input.parameter).await?;
        ProductParamActive {
            id: Set(Uuid::new_v4()),
            product_info_id: Set(product_info_id),
            parameter_id: Set(parameter.id),
            value: Set(input.value.clone()),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn get_or_create_parameter<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> AppResult<ParameterModel> {
    // A concurrent writer may introduce the same name; the insert then
    // yields to it and the select below picks its row.
    Parameters::insert(ParameterActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    })
    .on_conflict(OnConflict::column(ParamCol::Name).do_nothing().to_owned())
    .exec_without_returning(conn)
    .await?;

    Parameters::find()
        .filter(ParamCol::Name.eq(name))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("parameter {name} vanished after insert")))
}
