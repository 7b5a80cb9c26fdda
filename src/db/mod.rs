use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::time::Duration;

pub mod estimate_store;
pub mod inventory_store;
pub mod order_store;
pub mod product_store;
pub mod report_store;
pub mod transaction_store;
pub mod user_store;
pub mod vendor_store;

pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str, max_pool_size: u32) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_pool_size)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await?;

    setup_database(&pool).await?;

    Ok(pool)
}

/// Set up the database schema and sample data on first run. The presence
/// of the `settings` table marks an already-initialized database.
async fn setup_database(pool: &DbPool) -> Result<()> {
    let initialized: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'settings'")
            .fetch_optional(pool)
            .await?;

    if initialized.is_some() {
        return Ok(());
    }

    tracing::info!("Initializing database for first time use");
    create_schema(pool).await?;
    seed_sample_data(pool).await?;

    Ok(())
}

async fn create_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            name TEXT,
            email TEXT,
            role TEXT NOT NULL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE vendors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            contact_person TEXT,
            email TEXT,
            phone TEXT,
            address TEXT,
            notes TEXT,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL,
            size TEXT,
            category TEXT,
            price REAL NOT NULL,
            cost REAL,
            description TEXT,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE inventory (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            location TEXT,
            last_updated TEXT DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_number TEXT UNIQUE NOT NULL,
            date TEXT NOT NULL,
            vendor_id INTEGER NOT NULL,
            total REAL NOT NULL,
            status TEXT NOT NULL,
            payment_status TEXT,
            payment_method TEXT,
            created_by INTEGER NOT NULL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT,
            FOREIGN KEY (vendor_id) REFERENCES vendors(id),
            FOREIGN KEY (created_by) REFERENCES users(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE order_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            price REAL NOT NULL,
            total REAL NOT NULL,
            FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE,
            FOREIGN KEY (product_id) REFERENCES products(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE estimates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            estimate_no TEXT UNIQUE NOT NULL,
            date TEXT NOT NULL,
            order_no TEXT,
            customer_name TEXT NOT NULL,
            assigned_agent TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            total_amount REAL NOT NULL DEFAULT 0,
            created_by INTEGER NOT NULL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT,
            FOREIGN KEY (created_by) REFERENCES users(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE estimate_products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            estimate_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            rate REAL NOT NULL,
            amount REAL NOT NULL,
            FOREIGN KEY (estimate_id) REFERENCES estimates(id) ON DELETE CASCADE,
            FOREIGN KEY (product_id) REFERENCES products(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            transaction_type TEXT NOT NULL,
            date TEXT NOT NULL,
            amount REAL,
            related_id INTEGER,
            description TEXT,
            created_by INTEGER NOT NULL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (created_by) REFERENCES users(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert the default accounts and sample rows in a single transaction
async fn seed_sample_data(pool: &DbPool) -> Result<()> {
    let admin_hash = user_store::hash_password("admin123")?;
    let employee_hash = user_store::hash_password("employee123")?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, name, email, role)
        VALUES
            (?, ?, 'Admin User', 'admin@example.com', 'admin'),
            (?, ?, 'Sample Employee', 'employee@example.com', 'employee');
        "#,
    )
    .bind("admin")
    .bind(&admin_hash)
    .bind("employee")
    .bind(&employee_hash)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO vendors (name, contact_person, email, phone, address)
        VALUES
            ('ABC Supplies', 'John Doe', 'john@abcsupplies.com', '555-1234', '123 Supplier St'),
            ('XYZ Products', 'Jane Smith', 'jane@xyzproducts.com', '555-5678', '456 Vendor Ave'),
            ('LMN Goods', 'Bob Johnson', 'bob@lmngoods.com', '555-9012', '789 Distributor Rd');
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO products (code, name, size, category, price, cost, description)
        VALUES
            ('P001', 'Product A', 'Medium', 'Electronics', 25, 15, 'Sample product A'),
            ('P002', 'Product B', 'Large', 'Clothing', 45, 30, 'Sample product B'),
            ('P003', 'Product C', 'Small', 'Food', 60, 40, 'Sample product C');
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO inventory (product_id, quantity, location)
        VALUES
            (1, 50, 'Warehouse A'),
            (2, 30, 'Warehouse A'),
            (3, 20, 'Warehouse B');
        "#,
    )
    .execute(&mut *tx)
    .await?;

    let order1 = sqlx::query(
        r#"
        INSERT INTO orders (order_number, date, vendor_id, total, status, payment_status, payment_method, created_by)
        VALUES ('ORD-001', datetime('now'), 1, 215, 'completed', 'paid', 'credit', 1);
        "#,
    )
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    sqlx::query(
        r#"
        INSERT INTO order_items (order_id, product_id, quantity, price, total)
        VALUES (?, 1, 5, 25, 125), (?, 2, 2, 45, 90);
        "#,
    )
    .bind(order1)
    .bind(order1)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO transactions (transaction_type, date, amount, related_id, description, created_by)
        VALUES ('purchase', datetime('now'), 215, ?, 'Purchase from ABC Supplies', 1);
        "#,
    )
    .bind(order1)
    .execute(&mut *tx)
    .await?;

    let order2 = sqlx::query(
        r#"
        INSERT INTO orders (order_number, date, vendor_id, total, status, payment_status, payment_method, created_by)
        VALUES ('ORD-002', datetime('now'), 2, 600, 'pending', 'unpaid', 'cash', 1);
        "#,
    )
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    sqlx::query(
        r#"
        INSERT INTO order_items (order_id, product_id, quantity, price, total)
        VALUES (?, 3, 10, 60, 600);
        "#,
    )
    .bind(order2)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO transactions (transaction_type, date, amount, related_id, description, created_by)
        VALUES ('inventory', datetime('now'), 0, 1, 'Product A quantity updated from 45 to 50', 1);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO estimates (estimate_no, date, order_no, customer_name, assigned_agent, status, total_amount, created_by)
        VALUES
            ('EST-001', datetime('now', '-5 days'), 'ORD-001', 'John Doe', 'Agent Smith', 'packed', 1250, 1),
            ('EST-002', datetime('now', '-2 days'), '', 'Jane Smith', 'Agent Johnson', 'pending', 2000, 1),
            ('EST-003', datetime('now', '-1 days'), 'ORD-002', 'Robert Brown', 'Agent Davis', 'pending', 900, 1);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO estimate_products (estimate_id, product_id, quantity, rate, amount)
        SELECT e.id, ep.product_id, ep.quantity, ep.rate, ep.amount
        FROM estimates e
        JOIN (
            SELECT 'EST-001' AS estimate_no, 1 AS product_id, 3 AS quantity, 250.0 AS rate, 750.0 AS amount
            UNION ALL SELECT 'EST-001', 2, 1, 500.0, 500.0
            UNION ALL SELECT 'EST-002', 3, 2, 1000.0, 2000.0
            UNION ALL SELECT 'EST-003', 1, 1, 250.0, 250.0
            UNION ALL SELECT 'EST-003', 2, 1, 500.0, 500.0
            UNION ALL SELECT 'EST-003', 3, 1, 150.0, 150.0
        ) ep ON ep.estimate_no = e.estimate_no;
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO settings (key, value) VALUES ('initialized', 'true');")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
