use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        items::{PatchItemRequest, SetItemAvailabilityRequest},
        menu::MenuResponse,
        orders::{
            CreateOrderItem, CreateOrderRequest, CreateOrderResponse, OrdersPage,
            UpdateOrderStatusRequest,
        },
        tables::TableResolution,
    },
    models::{Category, Item, Order, OrderItem, OrderStatus, PaidStatus, Table, Tenant},
    response::{ApiResponse, Meta},
    routes::{admin, health, menu, orders, params, tables},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        menu::get_menu,
        tables::resolve_table,
        orders::create_order,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        admin::patch_item,
        admin::set_item_availability
    ),
    components(
        schemas(
            Tenant,
            Table,
            Category,
            Item,
            Order,
            OrderItem,
            OrderStatus,
            PaidStatus,
            MenuResponse,
            TableResolution,
            CreateOrderRequest,
            CreateOrderItem,
            CreateOrderResponse,
            OrdersPage,
            UpdateOrderStatusRequest,
            PatchItemRequest,
            SetItemAvailabilityRequest,
            params::OrderListQuery,
            health::HealthData,
            Meta,
            ApiResponse<MenuResponse>,
            ApiResponse<TableResolution>,
            ApiResponse<CreateOrderResponse>,
            ApiResponse<OrdersPage>,
            ApiResponse<Order>,
            ApiResponse<Item>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "Public menu endpoints"),
        (name = "Tables", description = "QR table resolution"),
        (name = "Orders", description = "Guest order placement"),
        (name = "Admin", description = "Tenant administration endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
