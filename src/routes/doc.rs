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
    audit::{AuditEntry, AuditList},
    core::{
        cart::Cart,
        dashboard::{CommunityOrderCount, DashboardSummary, ProductDemand, RouteMarker},
        inventory::StockLevel,
        visibility::Capabilities,
    },
    dto::{
        auth::{LoginRequest, LoginResponse, SessionInfo},
        cart::{AddToCartRequest, CartLine, CartView, UpdateCartItemRequest},
        catalog::{CommunityList, ProductList, ZoneList},
        dashboard::{DashboardData, RouteList},
        inventory::{InventoryAdjustRequest, InventoryList, InventoryRow, LowStockQuery},
        orders::{CreateOrderRequest, OrderList, OrderSummary, UpdateOrderStatusRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList, UserProfile},
    },
    models::{Community, InventoryItem, Order, OrderProduct, OrderStatus, Product, Role, Zone},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, catalog, dashboard, health, inventory, orders, params, users},
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
        auth::login,
        auth::logout,
        auth::me,
        catalog::list_products,
        catalog::get_product,
        catalog::list_communities,
        catalog::list_zones,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order_status,
        orders::get_order_summary,
        inventory::list_inventory,
        inventory::list_low_stock,
        inventory::adjust_inventory,
        users::list_users,
        users::create_user,
        users::update_user,
        users::delete_user,
        dashboard::dashboard,
        dashboard::route_inspection,
        admin::list_audit
    ),
    components(
        schemas(
            Zone,
            Community,
            Role,
            Product,
            InventoryItem,
            OrderProduct,
            OrderStatus,
            Order,
            Cart,
            Capabilities,
            StockLevel,
            AuditEntry,
            AuditList,
            LoginRequest,
            LoginResponse,
            SessionInfo,
            UserProfile,
            UserList,
            CreateUserRequest,
            UpdateUserRequest,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartLine,
            CartView,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            OrderList,
            OrderSummary,
            InventoryRow,
            InventoryList,
            InventoryAdjustRequest,
            LowStockQuery,
            ProductList,
            CommunityList,
            ZoneList,
            DashboardSummary,
            CommunityOrderCount,
            ProductDemand,
            RouteMarker,
            DashboardData,
            RouteList,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            params::UserListQuery,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<CartView>,
            ApiResponse<InventoryList>,
            ApiResponse<UserList>,
            ApiResponse<ProductList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login, logout and current session"),
        (name = "Catalog", description = "Products, communities and zones"),
        (name = "Cart", description = "Session cart of a community manager"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Inventory", description = "Stock per community"),
        (name = "Users", description = "User directory"),
        (name = "Dashboard", description = "Scoped counters and route inspection"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
