use anyhow::{Result, bail};
use sqlx::PgPool;

use campus_auth::Role;
use campus_core::hash_password;

/// Creates an account holding the administrator profile. Fails when the email
/// is taken.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<i64> {
    let password_hash = hash_password(password, bcrypt_cost)
        .map_err(|e| e.error.context("Failed to hash password"))?;

    let mut tx = db.begin().await?;

    let user_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, password)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&password_hash)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(user_id) = user_id else {
        tx.rollback().await?;
        bail!("User with this email already exists");
    };

    sqlx::query("INSERT INTO associated (id_user, id_profile) VALUES ($1, $2)")
        .bind(user_id)
        .bind(Role::Admin.id())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user_id)
}
