use axum_bookstore_api::{config::AppConfig, db::create_pool, security};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin-pass-123", "ADMIN").await?;
    let user_id = ensure_user(&pool, "reader@example.com", "reader-pass-123", "USER").await?;
    seed_books(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash =
        security::hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, name, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(email.split('@').next().unwrap_or("user"))
    .bind(role)
    .fetch_optional(pool)
    .await?;

    // If the user already exists, fetch its id.
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_books(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let books = vec![
        (
            "The Rust Programming Language",
            "Steve Klabnik,Carol Nichols",
            "IT,Programming",
            "9781718503106",
            28000,
            40,
        ),
        (
            "Designing Data-Intensive Applications",
            "Martin Kleppmann",
            "IT,Databases",
            "9781449373320",
            42000,
            25,
        ),
        (
            "The Pragmatic Programmer",
            "David Thomas,Andrew Hunt",
            "IT,Craft",
            "9780135957059",
            35000,
            30,
        ),
        (
            "Dune",
            "Frank Herbert",
            "Fiction,Science Fiction",
            "9780441172719",
            12000,
            100,
        ),
    ];

    for (title, authors, categories, isbn, price, stock) in books {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, authors, categories, isbn, price, stock_quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (isbn) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(authors)
        .bind(categories)
        .bind(isbn)
        .bind(price)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded books");
    Ok(())
}
