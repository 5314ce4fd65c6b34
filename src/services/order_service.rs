use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use crate::{
    cursor::Cursor,
    dto::orders::{CreateOrderRequest, CreateOrderResponse, OrdersPage},
    entity::{
        items::{Column as ItemCol, Entity as Items},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        tables::{Column as TableCol, Entity as Tables},
        tenants::{Column as TenantCol, Entity as Tenants},
    },
    error::{AppError, AppResult},
    models::{Order, OrderItem, OrderStatus, PaidStatus},
};

pub const DEFAULT_PAGE_LIMIT: u64 = 20;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Limits outside `1..=MAX_PAGE_LIMIT` fall back to the default rather than
/// being clamped to the nearest bound.
fn normalize_limit(limit: Option<i64>) -> u64 {
    match limit {
        Some(l) if l > 0 && l as u64 <= MAX_PAGE_LIMIT => l as u64,
        _ => DEFAULT_PAGE_LIMIT,
    }
}

/// Persist a guest order and all of its lines atomically.
///
/// Tenant and table are resolved first; every line's item is then resolved
/// inside the transaction, scoped to the tenant and required to be active.
/// Any miss aborts the whole order. Item name and price are snapshotted onto
/// the order lines.
pub async fn create_guest_order(
    db: &DatabaseConnection,
    req: &CreateOrderRequest,
) -> AppResult<CreateOrderResponse> {
    if req.items.is_empty() {
        return Err(AppError::bad_request("order must contain at least one item"));
    }

    let tenant = Tenants::find()
        .filter(TenantCol::Code.eq(req.tenant.as_str()))
        .one(db)
        .await?;
    let tenant = match tenant {
        Some(t) => t,
        None => {
            tracing::warn!(tenant_code = %req.tenant, "tenant lookup failed");
            return Err(AppError::not_found(format!("tenant {}", req.tenant)));
        }
    };

    let table = Tables::find()
        .filter(
            Condition::all()
                .add(TableCol::Token.eq(req.table_token.as_str()))
                .add(TableCol::TenantId.eq(tenant.id))
                .add(TableCol::IsActive.eq(true)),
        )
        .one(db)
        .await?;
    let table = match table {
        Some(t) => t,
        None => {
            tracing::warn!(tenant_id = %tenant.id, table_token = %req.table_token, "table lookup failed");
            return Err(AppError::not_found("table"));
        }
    };

    // Dropping `txn` on any early return rolls the whole order back.
    let txn = db.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant.id),
        table_id: Set(table.id),
        guest_session_id: Set(req.guest_session_id.clone()),
        note: Set(req.note.clone()),
        status: Set(OrderStatus::Waiting.as_str().into()),
        paid_status: Set(PaidStatus::Unpaid.as_str().into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    for (line_no, line) in req.items.iter().enumerate() {
        let item = Items::find()
            .filter(
                Condition::all()
                    .add(ItemCol::Id.eq(line.item_id))
                    .add(ItemCol::TenantId.eq(tenant.id))
                    .add(ItemCol::IsActive.eq(true)),
            )
            .one(&txn)
            .await?;
        let item = match item {
            Some(i) => i,
            None => {
                tracing::warn!(tenant_id = %tenant.id, item_id = %line.item_id, "menu item lookup failed");
                return Err(AppError::not_found(format!("item {}", line.item_id)));
            }
        };

        OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            line_no: Set(line_no as i32),
            item_id: Set(item.id),
            name: Set(item.name),
            qty: Set(line.qty),
            unit_price: Set(item.price),
            options: Set(line.options.clone()),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        tenant_id = %tenant.id,
        table_id = %table.id,
        lines = req.items.len(),
        "guest order created"
    );

    Ok(CreateOrderResponse {
        order_id: order.id,
        status: OrderStatus::Waiting,
    })
}

/// One page of a tenant's orders, newest first by `(created_at, id)`.
///
/// A cursor that fails to decode is ignored and the first page is returned.
pub async fn list_admin(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    status: Option<OrderStatus>,
    cursor: Option<&str>,
    limit: Option<i64>,
) -> AppResult<OrdersPage> {
    let limit = normalize_limit(limit);

    let mut condition = Condition::all().add(OrderCol::TenantId.eq(tenant_id));
    if let Some(status) = status {
        condition = condition.add(OrderCol::Status.eq(status.as_str()));
    }

    if let Some(token) = cursor.filter(|c| !c.is_empty()) {
        match Cursor::decode(token) {
            Some(cursor) => {
                let at: DateTimeWithTimeZone = cursor.created_at.into();
                condition = condition.add(
                    Condition::any().add(OrderCol::CreatedAt.lt(at)).add(
                        Condition::all()
                            .add(OrderCol::CreatedAt.eq(at))
                            .add(OrderCol::Id.lt(cursor.id)),
                    ),
                );
            }
            None => tracing::debug!(%tenant_id, "ignoring undecodable cursor"),
        }
    }

    let mut rows = Orders::find()
        .filter(condition)
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id)
        .limit(limit + 1)
        .all(db)
        .await?;

    let next_cursor = if rows.len() as u64 > limit {
        rows.truncate(limit as usize);
        rows.last()
            .map(|last| Cursor::new(last.created_at.with_timezone(&Utc), last.id).encode())
    } else {
        None
    };

    let data = attach_items(db, rows).await?;

    tracing::debug!(
        %tenant_id,
        status = status.map(|s| s.as_str()),
        count = data.len(),
        has_next = next_cursor.is_some(),
        "orders listed"
    );

    Ok(OrdersPage {
        data,
        next_cursor,
        limit,
    })
}

/// Set an order's status. Any of the known statuses is accepted regardless of
/// the current one.
pub async fn update_status(
    db: &DatabaseConnection,
    tenant_id: Uuid,
    order_id: Uuid,
    status: OrderStatus,
) -> AppResult<Order> {
    let existing = find_order_model(db, tenant_id, order_id).await?;
    let previous = existing.status.clone();

    let mut active: OrderActive = existing.into();
    active.status = Set(status.as_str().into());
    let order = active.update(db).await?;

    tracing::info!(
        %tenant_id,
        %order_id,
        from = %previous,
        to = %status,
        "order status updated"
    );

    let mut orders = attach_items(db, vec![order]).await?;
    orders
        .pop()
        .ok_or_else(|| AppError::not_found(format!("order {order_id}")))
}

pub async fn get_order(db: &DatabaseConnection, tenant_id: Uuid, order_id: Uuid) -> AppResult<Order> {
    let order = find_order_model(db, tenant_id, order_id).await?;
    let mut orders = attach_items(db, vec![order]).await?;
    orders
        .pop()
        .ok_or_else(|| AppError::not_found(format!("order {order_id}")))
}

async fn find_order_model<C: ConnectionTrait>(
    db: &C,
    tenant_id: Uuid,
    order_id: Uuid,
) -> AppResult<OrderModel> {
    Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::Id.eq(order_id))
                .add(OrderCol::TenantId.eq(tenant_id)),
        )
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("order {order_id}")))
}

async fn attach_items<C: ConnectionTrait>(db: &C, orders: Vec<OrderModel>) -> AppResult<Vec<Order>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for line in OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(ids))
        .order_by_asc(OrderItemCol::OrderId)
        .order_by_asc(OrderItemCol::LineNo)
        .all(db)
        .await?
    {
        by_order
            .entry(line.order_id)
            .or_default()
            .push(order_item_from_entity(line));
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            order_from_entity(order, items)
        })
        .collect())
}

fn order_from_entity(model: OrderModel, items: Vec<OrderItem>) -> Order {
    Order {
        id: model.id,
        tenant_id: model.tenant_id,
        table_id: model.table_id,
        guest_session_id: model.guest_session_id,
        note: model.note,
        status: model.status,
        paid_status: model.paid_status,
        created_at: model.created_at.with_timezone(&Utc),
        items,
    }
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        item_id: model.item_id,
        name: model.name,
        qty: model.qty,
        unit_price: model.unit_price,
        options: model.options,
    }
}
