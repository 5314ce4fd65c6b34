mod common;

use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use qrmenu_api::{
    dto::orders::{CreateOrderItem, CreateOrderRequest, UpdateOrderStatusRequest},
    error::AppError,
    middleware::auth::AdminUser,
    models::{Order, OrderStatus},
    routes::params::OrderListQuery,
    services::{admin_order_service, order_service},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

async fn seed_orders(
    orm: &DatabaseConnection,
    tenant_id: Uuid,
    table_id: Uuid,
    count: usize,
) -> anyhow::Result<Vec<Uuid>> {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        // Pairs of orders share a timestamp so the id tie-break is exercised.
        let created_at = base + Duration::seconds((i / 2) as i64);
        ids.push(common::insert_order_at(orm, tenant_id, table_id, "waiting", created_at).await?);
    }
    Ok(ids)
}

fn assert_strictly_descending(orders: &[Order]) {
    for pair in orders.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.created_at, a.id) > (b.created_at, b.id),
            "{} ({}) should sort before {} ({})",
            a.id,
            a.created_at,
            b.id,
            b.created_at
        );
    }
}

#[tokio::test]
async fn cursor_paging_returns_every_order_once() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let table_id = common::add_table(&state.orm, acme.tenant_id, "tok-8", true).await?;
    let inserted = seed_orders(&state.orm, acme.tenant_id, table_id, 25).await?;

    let mut seen = Vec::new();
    let mut page_sizes = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = order_service::list_admin(
            &state.orm,
            acme.tenant_id,
            None,
            cursor.as_deref(),
            Some(10),
        )
        .await?;
        page_sizes.push(page.data.len());
        seen.extend(page.data);
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(page_sizes, vec![10, 10, 5]);
    assert_eq!(seen.len(), 25);
    assert_strictly_descending(&seen);

    let seen_ids: HashSet<Uuid> = seen.iter().map(|o| o.id).collect();
    let inserted_ids: HashSet<Uuid> = inserted.into_iter().collect();
    assert_eq!(seen_ids, inserted_ids);
    Ok(())
}

#[tokio::test]
async fn full_last_page_has_no_cursor() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let table_id = common::add_table(&state.orm, acme.tenant_id, "tok-8", true).await?;
    seed_orders(&state.orm, acme.tenant_id, table_id, 10).await?;

    let page = order_service::list_admin(&state.orm, acme.tenant_id, None, None, Some(10)).await?;
    assert_eq!(page.data.len(), 10);
    assert!(page.next_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn malformed_cursor_behaves_like_first_page() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let table_id = common::add_table(&state.orm, acme.tenant_id, "tok-8", true).await?;
    seed_orders(&state.orm, acme.tenant_id, table_id, 7).await?;

    let first = order_service::list_admin(&state.orm, acme.tenant_id, None, None, Some(5)).await?;
    for garbage in ["not-a-cursor", "%%%", "MjAyNC0wMS0wMQ", "abc="] {
        let page =
            order_service::list_admin(&state.orm, acme.tenant_id, None, Some(garbage), Some(5))
                .await?;
        let ids: Vec<Uuid> = page.data.iter().map(|o| o.id).collect();
        let expected: Vec<Uuid> = first.data.iter().map(|o| o.id).collect();
        assert_eq!(ids, expected, "cursor {garbage:?}");
        assert_eq!(page.next_cursor, first.next_cursor);
    }
    Ok(())
}

#[tokio::test]
async fn orders_created_between_pages_do_not_shift_the_cursor() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let table_id = common::add_table(&state.orm, acme.tenant_id, "tok-8", true).await?;
    seed_orders(&state.orm, acme.tenant_id, table_id, 6).await?;

    let first = order_service::list_admin(&state.orm, acme.tenant_id, None, None, Some(3)).await?;
    let newcomer = common::insert_order_at(
        &state.orm,
        acme.tenant_id,
        table_id,
        "waiting",
        Utc::now(),
    )
    .await?;

    let second = order_service::list_admin(
        &state.orm,
        acme.tenant_id,
        None,
        first.next_cursor.as_deref(),
        Some(3),
    )
    .await?;

    let first_ids: HashSet<Uuid> = first.data.iter().map(|o| o.id).collect();
    assert_eq!(second.data.len(), 3);
    assert!(second.data.iter().all(|o| !first_ids.contains(&o.id)));
    assert!(second.data.iter().all(|o| o.id != newcomer));
    assert!(second.next_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn listing_is_scoped_to_tenant_and_status() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-a").await?;
    let bistro = common::seed_tenant(&state.orm, "bistro", "tok-b").await?;
    let acme_table = common::add_table(&state.orm, acme.tenant_id, "tok-a2", true).await?;
    let bistro_table = common::add_table(&state.orm, bistro.tenant_id, "tok-b2", true).await?;

    let now = Utc::now();
    common::insert_order_at(&state.orm, acme.tenant_id, acme_table, "waiting", now).await?;
    let done =
        common::insert_order_at(&state.orm, acme.tenant_id, acme_table, "done", now).await?;
    common::insert_order_at(&state.orm, bistro.tenant_id, bistro_table, "done", now).await?;

    let all = order_service::list_admin(&state.orm, acme.tenant_id, None, None, None).await?;
    assert_eq!(all.data.len(), 2);
    assert!(all.data.iter().all(|o| o.tenant_id == acme.tenant_id));

    let admin = common::admin_for(acme.tenant_id);
    let filtered = admin_order_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            status: Some("done".into()),
            ..Default::default()
        },
    )
    .await?;
    let page = filtered.data.expect("page");
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, done);

    let meta = filtered.meta.expect("meta");
    assert_eq!(meta.limit, Some(20));
    assert_eq!(meta.count, Some(1));
    assert_eq!(meta.next_cursor, None);
    Ok(())
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;

    let err = admin_order_service::list_orders(
        &state,
        &common::admin_for(acme.tenant_id),
        OrderListQuery {
            status: Some("shipped".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn out_of_range_limit_falls_back_to_default() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let table_id = common::add_table(&state.orm, acme.tenant_id, "tok-8", true).await?;
    seed_orders(&state.orm, acme.tenant_id, table_id, 25).await?;

    for limit in [Some(0), Some(-1), Some(500), None] {
        let page =
            order_service::list_admin(&state.orm, acme.tenant_id, None, None, limit).await?;
        assert_eq!(page.data.len(), 20, "limit {limit:?}");
        assert!(page.next_cursor.is_some());
    }
    Ok(())
}

#[tokio::test]
async fn status_update_returns_order_with_items() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let espresso = common::add_item(&state.orm, &acme, "espresso", 3500, true).await?;

    let created = order_service::create_guest_order(
        &state.orm,
        &CreateOrderRequest {
            tenant: "acme".into(),
            table_token: "tok-7".into(),
            guest_session_id: "g1".into(),
            note: None,
            items: vec![CreateOrderItem {
                item_id: espresso,
                qty: 1,
                options: None,
            }],
        },
    )
    .await?;

    let admin = common::admin_for(acme.tenant_id);
    let updated = admin_order_service::update_order_status(
        &state,
        &admin,
        created.order_id,
        UpdateOrderStatusRequest {
            status: "processing".into(),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(updated.status, "processing");
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].name, "espresso");

    // Transitions are not constrained: a finished order can be reopened.
    for status in [OrderStatus::Done, OrderStatus::Waiting] {
        let order =
            order_service::update_status(&state.orm, acme.tenant_id, created.order_id, status)
                .await?;
        assert_eq!(order.status, status.as_str());
    }
    Ok(())
}

#[tokio::test]
async fn status_update_is_tenant_scoped() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-a").await?;
    let bistro = common::seed_tenant(&state.orm, "bistro", "tok-b").await?;
    let table_id = common::add_table(&state.orm, acme.tenant_id, "tok-a2", true).await?;
    let order_id =
        common::insert_order_at(&state.orm, acme.tenant_id, table_id, "waiting", Utc::now())
            .await?;

    let err = order_service::update_status(
        &state.orm,
        bistro.tenant_id,
        order_id,
        OrderStatus::Canceled,
    )
    .await
    .unwrap_err();
    assert!(err.is_not_found());

    let untouched = admin_order_service::get_order(&state, &common::admin_for(acme.tenant_id), order_id)
        .await?
        .data
        .expect("order");
    assert_eq!(untouched.status, "waiting");

    let hidden = admin_order_service::get_order(&state, &common::admin_for(bistro.tenant_id), order_id)
        .await
        .unwrap_err();
    assert!(hidden.is_not_found());

    let missing =
        order_service::update_status(&state.orm, acme.tenant_id, Uuid::new_v4(), OrderStatus::Done)
            .await
            .unwrap_err();
    assert!(missing.is_not_found());
    Ok(())
}

#[tokio::test]
async fn status_update_rejects_empty_and_unknown_values() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let admin = common::admin_for(acme.tenant_id);

    for status in ["", "   ", "shipped"] {
        let err = admin_order_service::update_order_status(
            &state,
            &admin,
            Uuid::new_v4(),
            UpdateOrderStatusRequest {
                status: status.into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)), "status {status:?}");
    }
    Ok(())
}

#[tokio::test]
async fn non_admin_role_is_forbidden() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let staff = AdminUser {
        role: "staff".into(),
        ..common::admin_for(acme.tenant_id)
    };

    let err = admin_order_service::list_orders(&state, &staff, OrderListQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}

#[tokio::test]
async fn list_meta_reports_the_limit_the_engine_applied() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let acme = common::seed_tenant(&state.orm, "acme", "tok-7").await?;
    let table_id = common::add_table(&state.orm, acme.tenant_id, "tok-8", true).await?;
    seed_orders(&state.orm, acme.tenant_id, table_id, 12).await?;
    let admin = common::admin_for(acme.tenant_id);

    for (requested, applied, returned) in [(Some(7), 7, 7), (Some(500), 20, 12), (None, 20, 12)] {
        let resp = admin_order_service::list_orders(
            &state,
            &admin,
            OrderListQuery {
                limit: requested,
                ..Default::default()
            },
        )
        .await?;
        let page = resp.data.expect("page");
        assert_eq!(page.limit, applied, "limit {requested:?}");
        assert_eq!(page.data.len(), returned);

        let meta = resp.meta.expect("meta");
        assert_eq!(meta.limit, Some(applied));
        assert_eq!(meta.count, Some(returned as u64));
    }
    Ok(())
}
