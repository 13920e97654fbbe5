use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::orders::{
        CreateOrderItemRequest, CreateOrderRequest, OrderList, UpdateOrderItemRequest,
        UpdateOrderRequest,
    },
    entity::{
        contacts::{Entity as Contacts, Model as ContactModel},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        product_infos::{Column as InfoCol, Entity as ProductInfos},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::{Contact, Order, OrderItem, OrderItemDetail, OrderSummary},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::product_service::{load_product_info, load_product_infos},
    state::AppState,
};

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    if Users::find_by_id(payload.user).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "User {} does not exist",
            payload.user
        )));
    }
    let contact = match payload.contact {
        Some(contact_id) => Some(find_user_contact(state, payload.user, contact_id).await?),
        None => None,
    };

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(payload.user),
        contact_id: Set(contact.as_ref().map(|c| c.id)),
        status: Set(payload.status),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(order_id = %order.id, user_id = %order.user_id, status = %order.status, "order created");

    Ok(ApiResponse::success(
        "Order created",
        Order {
            id: order.id,
            ordered_items: Vec::new(),
            status: order.status,
            dt: order.created_at.with_timezone(&Utc),
            total_sum: 0,
            contact: contact.map(Contact::from),
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(query.user));
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let totals = order_totals(&state.pool, &ids).await?;

    let items = orders
        .into_iter()
        .map(|order| OrderSummary {
            id: order.id,
            status: order.status,
            dt: order.created_at.with_timezone(&Utc),
            total_sum: totals.get(&order.id).copied().unwrap_or(0),
            contact: order.contact_id,
        })
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let data = order_detail(state, order).await?;
    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

pub async fn update_order(
    state: &AppState,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if let Some(Some(contact_id)) = payload.contact {
        find_user_contact(state, existing.user_id, contact_id).await?;
    }

    let previous = existing.status;
    let mut active: OrderActive = existing.into();
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(contact_id) = payload.contact {
        active.contact_id = Set(contact_id);
    }
    let order = active.update(&state.orm).await?;

    if previous != order.status {
        tracing::info!(order_id = %order.id, from = %previous, to = %order.status, "order status changed");
    }

    let data = order_detail(state, order).await?;
    Ok(ApiResponse::success("Order updated", data, Some(Meta::empty())))
}

pub async fn delete_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(order_id = %id, "order deleted");

    Ok(ApiResponse::deleted())
}

/// Adds a line to an order. The line's shop is the shop of the listing.
pub async fn add_order_item(
    state: &AppState,
    payload: CreateOrderItemRequest,
) -> AppResult<ApiResponse<OrderItemDetail>> {
    payload.validate()?;
    if Orders::find_by_id(payload.order).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Order {} does not exist",
            payload.order
        )));
    }
    let info = ProductInfos::find_by_id(payload.product_info)
        .one(&state.orm)
        .await?;
    let info = match info {
        Some(i) => i,
        None => {
            return Err(AppError::BadRequest(format!(
                "Product info {} does not exist",
                payload.product_info
            )));
        }
    };

    let item = OrderItemActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(payload.order),
        product_info_id: Set(info.id),
        shop_id: Set(info.shop_id),
        quantity: Set(payload.quantity),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(order_id = %item.order_id, order_item_id = %item.id, "order item added");

    let product_info = load_product_info(&state.orm, info).await?;
    Ok(ApiResponse::success(
        "Order item created",
        OrderItemDetail::from_parts(item, product_info),
        Some(Meta::empty()),
    ))
}

pub async fn update_order_item(
    state: &AppState,
    id: Uuid,
    payload: UpdateOrderItemRequest,
) -> AppResult<ApiResponse<OrderItem>> {
    payload.validate()?;
    let existing = OrderItems::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let mut active: OrderItemActive = existing.into();
    active.quantity = Set(payload.quantity);
    let item = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        OrderItem::from(item),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order_item(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = OrderItems::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::deleted())
}

/// Σ quantity × price over the lines of each order. Orders without lines are
/// absent from the map.
pub async fn order_totals(pool: &DbPool, order_ids: &[Uuid]) -> AppResult<HashMap<Uuid, i64>> {
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT oi.order_id, COALESCE(SUM(oi.quantity::BIGINT * pi.price), 0)::BIGINT
        FROM order_items oi
        JOIN product_infos pi ON pi.id = oi.product_info_id
        WHERE oi.order_id = ANY($1)
        GROUP BY oi.order_id
        "#,
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

async fn order_detail(state: &AppState, order: OrderModel) -> AppResult<Order> {
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::Id)
        .all(&state.orm)
        .await?;

    let infos = ProductInfos::find()
        .filter(InfoCol::Id.is_in(items.iter().map(|i| i.product_info_id)))
        .all(&state.orm)
        .await?;
    let infos: HashMap<Uuid, _> = load_product_infos(&state.orm, infos)
        .await?
        .into_iter()
        .map(|info| (info.id, info))
        .collect();

    let ordered_items = items
        .into_iter()
        .map(|item| {
            let info = infos.get(&item.product_info_id).cloned().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "listing {} of order item {} is missing",
                    item.product_info_id,
                    item.id
                ))
            })?;
            Ok(OrderItemDetail::from_parts(item, info))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let contact = match order.contact_id {
        Some(contact_id) => Contacts::find_by_id(contact_id)
            .one(&state.orm)
            .await?
            .map(Contact::from),
        None => None,
    };

    let totals = order_totals(&state.pool, &[order.id]).await?;

    Ok(Order {
        id: order.id,
        ordered_items,
        status: order.status,
        dt: order.created_at.with_timezone(&Utc),
        total_sum: totals.get(&order.id).copied().unwrap_or(0),
        contact,
    })
}

async fn find_user_contact(
    state: &AppState,
    user_id: Uuid,
    contact_id: Uuid,
) -> AppResult<ContactModel> {
    let contact = Contacts::find_by_id(contact_id).one(&state.orm).await?;
    match contact {
        Some(c) if c.user_id == user_id => Ok(c),
        _ => Err(AppError::BadRequest(format!(
            "Contact {contact_id} does not belong to user {user_id}"
        ))),
    }
}
