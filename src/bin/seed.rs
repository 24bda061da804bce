use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_rentals_web::db::create_pool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")?;

    let pool = create_pool(&database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let owner_id = ensure_owner(&pool, "demo@example.com", "demo123", "Demo Owner").await?;
    seed_houses(&pool, owner_id).await?;

    println!("Seed completed. Owner ID: {owner_id}");
    Ok(())
}

async fn ensure_owner(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    name: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO owners (id, name, email, password_hash, phone)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind("555-0100")
    .fetch_optional(pool)
    .await?;

    // If the owner already exists, fetch the id.
    let owner_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM owners WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured owner {email}");
    Ok(owner_id)
}

async fn seed_houses(pool: &sqlx::PgPool, owner_id: Uuid) -> anyhow::Result<()> {
    // Fixed ids keep the seed idempotent across runs.
    let houses = vec![
        (
            "11111111-1111-1111-1111-111111111101",
            "Sunny studio near the park",
            "1BHK",
            9_500_i64,
            "14 Rose Lane",
            "Compact and bright, ideal for one person.",
        ),
        (
            "11111111-1111-1111-1111-111111111102",
            "Family flat with balcony",
            "2BHK",
            16_000,
            "8 Hill View Road",
            "Two bedrooms, morning sun, close to schools.",
        ),
        (
            "11111111-1111-1111-1111-111111111103",
            "Spacious corner house",
            "3BHK",
            27_500,
            "2 Lakeside Avenue",
            "Three bedrooms and a garden patch.",
        ),
    ];

    for (id, title, bhk_type, rent, address, description) in houses {
        sqlx::query(
            r#"
            INSERT INTO houses (id, title, bhk_type, rent, address, description, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(Uuid::parse_str(id)?)
        .bind(title)
        .bind(bhk_type)
        .bind(rent)
        .bind(address)
        .bind(description)
        .bind(owner_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded houses");
    Ok(())
}
