use dealership_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

const DEALER_EMAIL: &str = "contact@central-motors.example.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;

    let dealer_id = ensure_dealer(&pool).await?;
    let manufacturer_id = ensure_manufacturer(&pool, "VinFast", "Vietnam").await?;
    seed_catalog(&pool, manufacturer_id).await?;

    ensure_user(&pool, "Admin", "admin@example.com", "admin123", "Admin", None, None, None).await?;
    ensure_user(
        &pool,
        "EVM Staff",
        "evm@example.com",
        "evm123",
        "EvmStaff",
        None,
        Some(manufacturer_id),
        None,
    )
    .await?;
    ensure_user(
        &pool,
        "Dealer Staff",
        "staff@example.com",
        "staff123",
        "DealerStaff",
        Some(dealer_id),
        None,
        None,
    )
    .await?;
    let customer_id = ensure_customer(&pool, dealer_id, "Nguyen Van A", "customer@example.com").await?;
    ensure_user(
        &pool,
        "Nguyen Van A",
        "customer@example.com",
        "customer123",
        "Customer",
        Some(dealer_id),
        None,
        Some(customer_id),
    )
    .await?;

    println!("Seed completed. Dealer ID: {dealer_id}, Customer ID: {customer_id}");
    Ok(())
}

async fn ensure_dealer(pool: &DbPool) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO dealers (id, name, email, phone, address)
        VALUES ($1, 'Central Motors', $2, '0901000000', '1 Main Street')
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(DEALER_EMAIL)
    .fetch_one(pool)
    .await?;
    println!("Ensured dealer Central Motors");
    Ok(id)
}

async fn ensure_manufacturer(pool: &DbPool, name: &str, country: &str) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM manufacturers WHERE lower(name) = lower($1)")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO manufacturers (id, name, country) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(country)
    .fetch_one(pool)
    .await?;
    println!("Ensured manufacturer {name}");
    Ok(id)
}

async fn seed_catalog(pool: &DbPool, manufacturer_id: Uuid) -> anyhow::Result<()> {
    let catalog = vec![
        ("VF 8", "SUV", vec![("Eco", "White", 1_090_000_000_i64), ("Plus", "Red", 1_270_000_000)]),
        ("VF 5", "Crossover", vec![("Plus", "Yellow", 458_000_000)]),
    ];

    for (model_name, category, variants) in catalog {
        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM vehicle_models WHERE manufacturer_id = $1 AND lower(name) = lower($2)",
        )
        .bind(manufacturer_id)
        .bind(model_name)
        .fetch_optional(pool)
        .await?;
        if existing.is_some() {
            continue;
        }

        let (model_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO vehicle_models (id, manufacturer_id, name, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(manufacturer_id)
        .bind(model_name)
        .bind(category)
        .fetch_one(pool)
        .await?;

        for (version, color, price) in variants {
            sqlx::query(
                r#"
                INSERT INTO vehicle_variants (id, model_id, version, color, product_year, price, quantity)
                VALUES ($1, $2, $3, $4, 2025, $5, 5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(model_id)
            .bind(version)
            .bind(color)
            .bind(price)
            .execute(pool)
            .await?;
        }
    }

    println!("Seeded catalog");
    Ok(())
}

async fn ensure_customer(
    pool: &DbPool,
    dealer_id: Uuid,
    full_name: &str,
    email: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM customers WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO customers (id, dealer_id, full_name, email) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(dealer_id)
    .bind(full_name)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn ensure_user(
    pool: &DbPool,
    full_name: &str,
    email: &str,
    password: &str,
    role: &str,
    dealer_id: Option<Uuid>,
    manufacturer_id: Option<Uuid>,
    customer_id: Option<Uuid>,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, full_name, email, password_hash, role, dealer_id, manufacturer_id, customer_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(full_name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(dealer_id)
    .bind(manufacturer_id)
    .bind(customer_id)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(id)
}
