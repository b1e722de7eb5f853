use std::time::Instant;

use anyhow::Result;
use campus_auth::Role;
use fake::Fake;
use fake::faker::name::en::Name;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};

use super::SEED_EMAIL_DOMAIN;
use super::models::UserSeed;

// 3 params per user
const USER_BATCH_SIZE: usize = 1000;
const PROFILE_BATCH_SIZE: usize = 2000;

pub fn generate_users(role: Role, count: usize, password_hash: &str) -> Vec<UserSeed> {
    let prefix = role.label().to_lowercase();

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let name: String = Name().fake();
            let local = name
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(".");

            UserSeed {
                email: format!("{}+{}{}@{}", local, prefix, idx, SEED_EMAIL_DOMAIN),
                name,
                password_hash: password_hash.to_string(),
                role,
            }
        })
        .collect()
}

/// Inserts `count` users holding `role` and returns their ids.
pub async fn seed_users(
    db: &PgPool,
    role: Role,
    count: usize,
    password_hash: &str,
) -> Result<Vec<i64>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let start = Instant::now();
    println!("👥 Seeding {} {} users...", count, role.label());

    let users = generate_users(role, count, password_hash);

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(USER_BATCH_SIZE) {
        ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }
    for chunk in ids.chunks(PROFILE_BATCH_SIZE) {
        assign_profile_chunk(&mut tx, chunk, role).await?;
    }
    tx.commit().await?;

    println!("   ✓ Inserted {} users in {:?}", ids.len(), start.elapsed());
    Ok(ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<i64>> {
    let mut query = String::from("INSERT INTO users (name, email, password) VALUES ");
    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 3;
        query.push_str(&format!(
            "(${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3
        ));
    }
    query.push_str(" ON CONFLICT (email) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar::<_, i64>(&query);
    for user in users {
        q = q.bind(&user.name).bind(&user.email).bind(&user.password_hash);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

async fn assign_profile_chunk(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[i64],
    role: Role,
) -> Result<()> {
    let mut query = String::from("INSERT INTO associated (id_user, id_profile) VALUES ");
    for i in 0..user_ids.len() {
        if i > 0 {
            query.push_str(", ");
        }
        query.push_str(&format!("(${}, {})", i + 1, role.id()));
    }
    query.push_str(" ON CONFLICT DO NOTHING");

    let mut q = sqlx::query(&query);
    for user_id in user_ids {
        q = q.bind(user_id);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

/// Deletes every user under the seed domain. Run after the seeded courses are
/// gone, since teachers of remaining classes cannot be deleted.
pub async fn clear_users(db: &PgPool) -> Result<u64> {
    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_users_are_unique_and_marked() {
        let users = generate_users(Role::Student, 50, "hash");
        assert_eq!(users.len(), 50);

        let mut emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), 50);

        assert!(users.iter().all(|u| u.email.ends_with(SEED_EMAIL_DOMAIN)));
        assert!(users.iter().all(|u| u.role == Role::Student));
    }
}
