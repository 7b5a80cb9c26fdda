use std::fs;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::handlers::{api_router, AppState};

// Helper to set up a seeded test database on a throwaway file
async fn setup_test_db() -> (String, DbPool) {
    let db_path = std::env::temp_dir().join(format!("vendor_management_test_{}.db", Uuid::new_v4()));
    let db_path = db_path.to_string_lossy().into_owned();
    let database_url = format!("sqlite://{db_path}");

    let pool = db::init_db_pool(&database_url, 5)
        .await
        .expect("Failed to initialize database");

    (db_path, pool)
}

// Helper to clean up a test database
fn teardown_test_db(db_path: &str) {
    let _ = fs::remove_file(db_path);
}

fn test_app(pool: DbPool) -> Router {
    api_router(AppState::new(pool))
}

// Send a request to the router and return status plus parsed JSON body
async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn estimate_id(pool: &DbPool, estimate_no: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM estimates WHERE estimate_no = ?")
        .bind(estimate_no)
        .fetch_one(pool)
        .await
        .expect("Failed to look up estimate");
    id
}

async fn count_rows(pool: &DbPool, table_sql: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(table_sql).fetch_one(pool).await.unwrap();
    count
}

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::db::{user_store::UserStore, vendor_store::VendorStore};
    use crate::models::user::{NewUser, Role, UserChanges};
    use crate::models::vendor::{NewVendor, VendorChanges};

    #[tokio::test]
    async fn test_create_and_get_vendor() {
        let (db_path, pool) = setup_test_db().await;
        let store = VendorStore::new(pool);

        let created = store
            .create_vendor(NewVendor {
                name: "Acme Wholesale".to_string(),
                contact_person: Some("Carol King".to_string()),
                email: Some("carol@acme.example".to_string()),
                phone: Some("555-2468".to_string()),
                address: None,
                notes: Some("Net 30 terms".to_string()),
            })
            .await
            .expect("Failed to create vendor");

        let fetched = store
            .get_vendor_by_id(created.id)
            .await
            .expect("Failed to fetch vendor")
            .expect("Vendor missing after insert");

        assert_eq!(fetched.name, "Acme Wholesale");
        assert_eq!(fetched.contact_person.as_deref(), Some("Carol King"));
        assert_eq!(fetched.phone.as_deref(), Some("555-2468"));
        assert_eq!(fetched.notes.as_deref(), Some("Net 30 terms"));
        assert!(fetched.created_at.is_some());
        assert!(fetched.updated_at.is_none());

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_update_writes_only_supplied_fields() {
        let (db_path, pool) = setup_test_db().await;
        let store = VendorStore::new(pool);

        // Vendor 1 is the seeded "ABC Supplies"
        let updated = store
            .update_vendor(
                1,
                VendorChanges {
                    phone: Some("555-0000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update vendor")
            .expect("Seeded vendor missing");

        assert_eq!(updated.phone.as_deref(), Some("555-0000"));
        assert_eq!(updated.name, "ABC Supplies");
        assert_eq!(updated.contact_person.as_deref(), Some("John Doe"));
        assert!(updated.updated_at.is_some());

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_update_nonexistent_returns_none() {
        let (db_path, pool) = setup_test_db().await;
        let store = VendorStore::new(pool.clone());

        let before = count_rows(&pool, "SELECT COUNT(*) FROM vendors").await;
        let result = store
            .update_vendor(
                9999,
                VendorChanges {
                    name: Some("Ghost Vendor".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Update should not error");

        assert!(result.is_none());
        assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM vendors").await, before);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (db_path, pool) = setup_test_db().await;
        let store = VendorStore::new(pool);

        let created = store
            .create_vendor(NewVendor {
                name: "Short Lived".to_string(),
                contact_person: None,
                email: None,
                phone: None,
                address: None,
                notes: None,
            })
            .await
            .expect("Failed to create vendor");

        assert!(store.delete_vendor(created.id).await.unwrap());
        assert!(!store.delete_vendor(created.id).await.unwrap());

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let (db_path, pool) = setup_test_db().await;
        let store = UserStore::new(pool);

        let user = store
            .create_user(NewUser {
                username: "tester".to_string(),
                password: "secret123".to_string(),
                name: Some("Test User".to_string()),
                email: None,
                role: Role::Employee,
            })
            .await
            .expect("Failed to create user");

        assert_ne!(user.password_hash, "secret123");
        assert!(user.password_hash.starts_with("$argon2"));

        let verified = store
            .verify_credentials("tester", "secret123")
            .await
            .expect("Verification should not error");
        assert!(verified.is_some());

        let rejected = store
            .verify_credentials("tester", "wrong-password")
            .await
            .expect("Verification should not error");
        assert!(rejected.is_none());

        let unknown = store
            .verify_credentials("nobody", "secret123")
            .await
            .expect("Verification should not error");
        assert!(unknown.is_none());

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let (db_path, pool) = setup_test_db().await;
        let store = UserStore::new(pool);

        let updated = store
            .update_user(
                2,
                UserChanges {
                    password: Some("new-password".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update user")
            .expect("Seeded employee missing");

        assert!(updated.password_hash.starts_with("$argon2"));
        assert!(store
            .verify_credentials("employee", "new-password")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .verify_credentials("employee", "employee123")
            .await
            .unwrap()
            .is_none());

        teardown_test_db(&db_path);
    }
}

#[cfg(test)]
mod composite_tests {
    use super::*;
    use crate::db::{
        estimate_store::EstimateStore, inventory_store::InventoryStore, order_store::OrderStore,
        product_store::ProductStore,
    };
    use crate::models::estimate::{EstimateStatus, NewEstimate, NewEstimateProduct};
    use crate::models::order::{NewOrder, NewOrderItem};
    use crate::models::product::NewProduct;

    fn sample_order(items: Vec<NewOrderItem>, total: f64) -> NewOrder {
        NewOrder {
            order_number: "ORD-100".to_string(),
            date: "2026-08-07".to_string(),
            vendor_id: 1,
            total,
            status: "pending".to_string(),
            payment_status: Some("unpaid".to_string()),
            payment_method: Some("cash".to_string()),
            created_by: 1,
            items,
        }
    }

    #[tokio::test]
    async fn test_create_order_writes_items_and_ledger() {
        let (db_path, pool) = setup_test_db().await;
        let store = OrderStore::new(pool.clone());

        let order = store
            .create_order(sample_order(
                vec![
                    NewOrderItem {
                        product_id: 1,
                        quantity: 4,
                        price: 25.0,
                        total: 100.0,
                    },
                    NewOrderItem {
                        product_id: 2,
                        quantity: 2,
                        price: 45.0,
                        total: 90.0,
                    },
                ],
                190.0,
            ))
            .await
            .expect("Failed to create order");

        assert_eq!(order.total, 190.0);

        let items = count_rows(
            &pool,
            &format!("SELECT COUNT(*) FROM order_items WHERE order_id = {}", order.id),
        )
        .await;
        assert_eq!(items, 2);

        let ledger = count_rows(
            &pool,
            &format!(
                "SELECT COUNT(*) FROM transactions WHERE transaction_type = 'purchase' AND related_id = {}",
                order.id
            ),
        )
        .await;
        assert_eq!(ledger, 1);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_create_order_rolls_back_on_failure() {
        let (db_path, pool) = setup_test_db().await;
        let store = OrderStore::new(pool.clone());

        let orders_before = count_rows(&pool, "SELECT COUNT(*) FROM orders").await;
        let items_before = count_rows(&pool, "SELECT COUNT(*) FROM order_items").await;
        let ledger_before = count_rows(&pool, "SELECT COUNT(*) FROM transactions").await;

        // Second item references a missing product, violating its FK
        let result = store
            .create_order(sample_order(
                vec![
                    NewOrderItem {
                        product_id: 1,
                        quantity: 1,
                        price: 25.0,
                        total: 25.0,
                    },
                    NewOrderItem {
                        product_id: 9999,
                        quantity: 1,
                        price: 10.0,
                        total: 10.0,
                    },
                ],
                35.0,
            ))
            .await;

        assert!(result.is_err());
        assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM orders").await, orders_before);
        assert_eq!(
            count_rows(&pool, "SELECT COUNT(*) FROM order_items").await,
            items_before
        );
        assert_eq!(
            count_rows(&pool, "SELECT COUNT(*) FROM transactions").await,
            ledger_before
        );

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_update_inventory_appends_ledger_entry() {
        let (db_path, pool) = setup_test_db().await;
        let store = InventoryStore::new(pool.clone());

        // Product 1 is seeded at quantity 50
        let inventory = store
            .update_inventory(1, 45, Some("Warehouse A"), 1)
            .await
            .expect("Failed to update inventory");

        assert_eq!(inventory.quantity, 45);

        let entries = count_rows(
            &pool,
            "SELECT COUNT(*) FROM transactions WHERE transaction_type = 'inventory' \
             AND description = 'Product quantity updated from 50 to 45'",
        )
        .await;
        assert_eq!(entries, 1);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_update_inventory_creates_missing_row() {
        let (db_path, pool) = setup_test_db().await;
        let products = ProductStore::new(pool.clone());
        let store = InventoryStore::new(pool.clone());

        let product = products
            .create_product(NewProduct {
                code: "P004".to_string(),
                name: "Product D".to_string(),
                size: None,
                category: Some("Electronics".to_string()),
                price: 80.0,
                cost: Some(55.0),
                description: None,
            })
            .await
            .expect("Failed to create product");

        assert!(store
            .get_inventory_by_product(product.id)
            .await
            .unwrap()
            .is_none());

        let inventory = store
            .update_inventory(product.id, 10, Some("Warehouse C"), 1)
            .await
            .expect("Failed to update inventory");

        assert_eq!(inventory.product_id, product.id);
        assert_eq!(inventory.quantity, 10);

        let entries = count_rows(
            &pool,
            "SELECT COUNT(*) FROM transactions WHERE transaction_type = 'inventory' \
             AND description = 'Product quantity updated from 0 to 10'",
        )
        .await;
        assert_eq!(entries, 1);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_add_estimate_attaches_products() {
        let (db_path, pool) = setup_test_db().await;
        let store = EstimateStore::new(pool);

        let estimate = store
            .add_estimate(NewEstimate {
                estimate_no: "EST-100".to_string(),
                date: "2026-08-07".to_string(),
                order_no: String::new(),
                customer_name: "Alice Green".to_string(),
                assigned_agent: "Agent Miller".to_string(),
                status: EstimateStatus::Pending,
                total_amount: 350.0,
                created_by: 1,
                products: vec![NewEstimateProduct {
                    product_id: 1,
                    quantity: 2,
                    rate: 175.0,
                    amount: 350.0,
                }],
            })
            .await
            .expect("Failed to add estimate");

        assert_eq!(estimate.estimate.total_amount, 350.0);
        assert_eq!(estimate.products.len(), 1);
        assert_eq!(estimate.products[0].product_code, "P001");
        assert_eq!(estimate.products[0].name, "Product A");

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_update_estimate_replaces_product_set() {
        let (db_path, pool) = setup_test_db().await;
        let store = EstimateStore::new(pool.clone());

        // EST-002 is seeded with a single line item for product 3
        let id = estimate_id(&pool, "EST-002").await;

        let updated = store
            .update_estimate(
                id,
                NewEstimate {
                    estimate_no: "EST-002".to_string(),
                    date: "2026-08-07".to_string(),
                    order_no: String::new(),
                    customer_name: "Jane Smith".to_string(),
                    assigned_agent: "Agent Johnson".to_string(),
                    status: EstimateStatus::Pending,
                    total_amount: 550.0,
                    created_by: 1,
                    products: vec![
                        NewEstimateProduct {
                            product_id: 1,
                            quantity: 2,
                            rate: 25.0,
                            amount: 50.0,
                        },
                        NewEstimateProduct {
                            product_id: 2,
                            quantity: 1,
                            rate: 500.0,
                            amount: 500.0,
                        },
                    ],
                },
            )
            .await
            .expect("Failed to update estimate")
            .expect("Seeded estimate missing");

        assert_eq!(updated.products.len(), 2);
        assert!(updated.products.iter().all(|p| p.product_id != 3));
        assert_eq!(updated.estimate.total_amount, 550.0);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_update_estimate_missing_returns_none() {
        let (db_path, pool) = setup_test_db().await;
        let store = EstimateStore::new(pool.clone());

        let before = count_rows(&pool, "SELECT COUNT(*) FROM estimate_products").await;
        let result = store
            .update_estimate(
                9999,
                NewEstimate {
                    estimate_no: "EST-404".to_string(),
                    date: "2026-08-07".to_string(),
                    order_no: String::new(),
                    customer_name: "Nobody".to_string(),
                    assigned_agent: "Agent Nobody".to_string(),
                    status: EstimateStatus::Pending,
                    total_amount: 0.0,
                    created_by: 1,
                    products: Vec::new(),
                },
            )
            .await
            .expect("Update should not error");

        assert!(result.is_none());
        assert_eq!(
            count_rows(&pool, "SELECT COUNT(*) FROM estimate_products").await,
            before
        );

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_get_detailed_orders_joins_vendor_and_items() {
        let (db_path, pool) = setup_test_db().await;
        let store = OrderStore::new(pool);

        let detailed = store
            .get_detailed_orders()
            .await
            .expect("Failed to fetch detailed orders");

        let ord1 = detailed
            .iter()
            .find(|o| o.order.order_number == "ORD-001")
            .expect("Seeded order missing");

        assert_eq!(ord1.vendor_name.as_deref(), Some("ABC Supplies"));
        assert_eq!(ord1.vendor_contact.as_deref(), Some("John Doe"));
        assert_eq!(ord1.items.len(), 2);
        assert!(ord1.items.iter().any(|i| i.product_code == "P001"));

        teardown_test_db(&db_path);
    }
}

#[cfg(test)]
mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_products_includes_inventory() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, body) = send_json(&app, "GET", "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);

        let products = body.as_array().expect("Expected a product array");
        assert_eq!(products.len(), 3);

        let p001 = products
            .iter()
            .find(|p| p["code"] == "P001")
            .expect("Seeded product missing");
        assert_eq!(p001["quantity"], 50);
        assert_eq!(p001["location"], "Warehouse A");

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_get_estimate_returns_joined_products() {
        let (db_path, pool) = setup_test_db().await;
        let id = estimate_id(&pool, "EST-001").await;
        let app = test_app(pool);

        let (status, body) = send_json(&app, "GET", &format!("/api/estimates/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        // total_amount comes back exactly as stored, not recomputed
        assert_eq!(body["total_amount"], 1250.0);
        assert_eq!(body["status"], "packed");

        let products = body["products"].as_array().expect("Expected line items");
        assert_eq!(products.len(), 2);

        let first = products
            .iter()
            .find(|p| p["productCode"] == "P001")
            .expect("Line item for P001 missing");
        assert_eq!(first["name"], "Product A");
        assert_eq!(first["quantity"], 3);
        assert_eq!(first["rate"], 250.0);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_get_estimate_missing_returns_404() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, body) = send_json(&app, "GET", "/api/estimates/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Estimate not found");

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_create_estimate_requires_fields() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/estimates",
            Some(json!({
                "estimate_no": "EST-200",
                "date": "2026-08-07",
                "customer_name": "",
                "assigned_agent": "Agent Miller",
                "total_amount": 100.0
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Missing required fields"));

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_create_estimate_roundtrip() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/estimates",
            Some(json!({
                "estimate_no": "EST-200",
                "date": "2026-08-07",
                "order_no": "ORD-001",
                "customer_name": "Dana White",
                "assigned_agent": "Agent Miller",
                "total_amount": 500.0,
                "products": [
                    { "product_id": 2, "quantity": 1, "rate": 500.0, "amount": 500.0 }
                ]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        let id = body["id"].as_i64().expect("Expected the new estimate id");

        let (status, body) = send_json(&app, "GET", &format!("/api/estimates/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["estimate_no"], "EST-200");
        assert_eq!(body["status"], "pending");
        assert_eq!(body["products"].as_array().unwrap().len(), 1);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_estimate_status_update_roundtrip() {
        let (db_path, pool) = setup_test_db().await;
        let id = estimate_id(&pool, "EST-002").await;
        let app = test_app(pool);

        let (status, body) = send_json(
            &app,
            "PATCH",
            &format!("/api/estimates/{id}/status"),
            Some(json!({ "status": "packed" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["id"], id);
        assert_eq!(body["status"], "packed");

        let (_, body) = send_json(&app, "GET", &format!("/api/estimates/{id}"), None).await;
        assert_eq!(body["status"], "packed");

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_estimate_status_rejects_unknown_value() {
        let (db_path, pool) = setup_test_db().await;
        let id = estimate_id(&pool, "EST-002").await;
        let app = test_app(pool);

        let (status, body) = send_json(
            &app,
            "PATCH",
            &format!("/api/estimates/{id}/status"),
            Some(json!({ "status": "archived" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid status value"));

        let (_, body) = send_json(&app, "GET", &format!("/api/estimates/{id}"), None).await;
        assert_eq!(body["status"], "pending");

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_estimate_status_missing_returns_404() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, _) = send_json(
            &app,
            "PUT",
            "/api/estimates/9999/status",
            Some(json!({ "status": "packed" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_delete_estimate() {
        let (db_path, pool) = setup_test_db().await;
        let id = estimate_id(&pool, "EST-003").await;
        let app = test_app(pool);

        let (status, _) = send_json(&app, "DELETE", &format!("/api/estimates/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send_json(&app, "GET", &format!("/api/estimates/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_login_success_hides_hash() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "admin", "password": "admin123" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["username"], "admin");
        assert_eq!(body["user"]["role"], "admin");
        assert!(body["user"].get("password_hash").is_none());
        assert!(body["user"].get("password").is_none());

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "admin", "password": "nope" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body.get("user").is_none());

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_sales_report_groups_and_filters() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        // Both seeded orders share today's date
        let (status, body) = send_json(&app, "GET", "/api/reports/sales", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["count"], 2);
        assert_eq!(rows[0]["total"], 815.0);

        let (status, body) =
            send_json(&app, "GET", "/api/reports/sales?status=completed", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["count"], 1);
        assert_eq!(rows[0]["total"], 215.0);

        let (status, body) =
            send_json(&app, "GET", "/api/reports/sales?vendorId=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_inventory_report_groups_by_category() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool);

        let (status, body) = send_json(&app, "GET", "/api/reports/inventory", None).await;
        assert_eq!(status, StatusCode::OK);

        let categories = body.as_array().unwrap();
        assert_eq!(categories.len(), 3);

        let electronics = categories
            .iter()
            .find(|c| c["category"] == "Electronics")
            .expect("Electronics category missing");
        assert_eq!(electronics["count"], 1);
        assert_eq!(electronics["value"], 1250.0);
        assert_eq!(electronics["items"].as_array().unwrap().len(), 1);
        assert_eq!(electronics["items"][0]["code"], "P001");

        teardown_test_db(&db_path);
    }

    #[tokio::test]
    async fn test_inventory_update_via_api() {
        let (db_path, pool) = setup_test_db().await;
        let app = test_app(pool.clone());

        let (status, body) = send_json(
            &app,
            "PUT",
            "/api/inventory",
            Some(json!({
                "productId": 2,
                "quantity": 25,
                "location": "Warehouse B",
                "userId": 1
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quantity"], 25);
        assert_eq!(body["location"], "Warehouse B");

        let entries = count_rows(
            &pool,
            "SELECT COUNT(*) FROM transactions WHERE transaction_type = 'inventory' \
             AND description = 'Product quantity updated from 30 to 25'",
        )
        .await;
        assert_eq!(entries, 1);

        teardown_test_db(&db_path);
    }
}
