pub mod auth;
pub mod estimate;
pub mod inventory;
pub mod order;
pub mod product;
pub mod report;
pub mod transaction;
pub mod user;
pub mod vendor;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::db::{
    estimate_store::EstimateStore, inventory_store::InventoryStore, order_store::OrderStore,
    product_store::ProductStore, report_store::ReportStore, transaction_store::TransactionStore,
    user_store::UserStore, vendor_store::VendorStore, DbPool,
};

/// Shared state for all handlers: one store per table, each holding a
/// clone of the pool
#[derive(Clone)]
pub struct AppState {
    pub user_store: UserStore,
    pub vendor_store: VendorStore,
    pub product_store: ProductStore,
    pub inventory_store: InventoryStore,
    pub order_store: OrderStore,
    pub estimate_store: EstimateStore,
    pub transaction_store: TransactionStore,
    pub report_store: ReportStore,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            user_store: UserStore::new(pool.clone()),
            vendor_store: VendorStore::new(pool.clone()),
            product_store: ProductStore::new(pool.clone()),
            inventory_store: InventoryStore::new(pool.clone()),
            order_store: OrderStore::new(pool.clone()),
            estimate_store: EstimateStore::new(pool.clone()),
            transaction_store: TransactionStore::new(pool.clone()),
            report_store: ReportStore::new(pool),
        }
    }
}

/// Build the API router over the shared state
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/users",
            get(user::get_all_users).post(user::create_user),
        )
        .route(
            "/api/users/{id}",
            get(user::get_user_by_id)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        .route(
            "/api/vendors",
            get(vendor::get_all_vendors).post(vendor::create_vendor),
        )
        .route(
            "/api/vendors/{id}",
            get(vendor::get_vendor_by_id)
                .put(vendor::update_vendor)
                .delete(vendor::delete_vendor),
        )
        .route(
            "/api/products",
            get(product::get_products).post(product::create_product),
        )
        .route(
            "/api/products/{id}",
            get(product::get_product_by_id)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route(
            "/api/inventory",
            get(inventory::get_inventory).put(inventory::update_inventory),
        )
        .route(
            "/api/orders",
            get(order::get_orders).post(order::create_order),
        )
        .route("/api/orders/today", get(order::get_today_orders))
        .route("/api/orders/detailed", get(order::get_detailed_orders))
        .route(
            "/api/orders/{id}",
            get(order::get_order_by_id)
                .put(order::update_order)
                .delete(order::delete_order),
        )
        .route(
            "/api/estimates",
            get(estimate::get_estimates).post(estimate::create_estimate),
        )
        .route(
            "/api/estimates/{id}",
            get(estimate::get_estimate_by_id)
                .put(estimate::update_estimate)
                .delete(estimate::delete_estimate),
        )
        .route(
            "/api/estimates/{id}/status",
            put(estimate::update_estimate_status).patch(estimate::update_estimate_status),
        )
        .route(
            "/api/transactions",
            get(transaction::get_all_transactions).post(transaction::create_transaction),
        )
        .route(
            "/api/transactions/{id}",
            get(transaction::get_transaction_by_id)
                .put(transaction::update_transaction)
                .delete(transaction::delete_transaction),
        )
        .route("/api/reports/sales", get(report::get_sales_report))
        .route("/api/reports/inventory", get(report::get_inventory_report))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
