use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::auth::{LoginForm, RegisterForm},
    error::{AppError, AppResult},
    models::Owner,
};

pub async fn register_owner(pool: &DbPool, payload: RegisterForm) -> AppResult<Owner> {
    let RegisterForm {
        name,
        email,
        password,
        phone,
    } = payload;

    // Convenience pre-check for a friendly message; the UNIQUE constraint
    // on owners.email is what actually enforces the invariant.
    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM owners WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;

    if exist.is_some() {
        return Err(AppError::EmailTaken);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let id = Uuid::new_v4();
    let phone = phone.filter(|p| !p.is_empty());

    let result = sqlx::query_as::<_, Owner>(
        "INSERT INTO owners (id, name, email, password_hash, phone) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(id)
    .bind(name.as_str())
    .bind(email.as_str())
    .bind(password_hash)
    .bind(phone)
    .fetch_one(pool)
    .await;

    match result {
        Ok(owner) => {
            tracing::info!(owner_id = %owner.id, "owner registered");
            Ok(owner)
        }
        Err(err) if is_unique_violation(&err) => Err(AppError::EmailTaken),
        Err(err) => Err(err.into()),
    }
}

/// Returns the owner on a correct email + password pair, `None` otherwise.
/// The two failure cases are indistinguishable to the caller.
pub async fn verify_login(pool: &DbPool, payload: LoginForm) -> AppResult<Option<Owner>> {
    let LoginForm { email, password } = payload;

    let owner: Option<Owner> = sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;

    let Some(owner) = owner else {
        return Ok(None);
    };

    let parsed_hash = PasswordHash::new(&owner.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(None);
    }

    Ok(Some(owner))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
