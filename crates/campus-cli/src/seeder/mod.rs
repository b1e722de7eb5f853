//! Fake data for local development.
//!
//! Seeded rows are recognizable so they can be removed again: users get an
//! email under [`SEED_EMAIL_DOMAIN`] and courses a description starting with
//! [`SEED_COURSE_MARKER`].

pub mod courses;
pub mod models;
pub mod users;

use std::time::Instant;

use anyhow::Result;
use campus_auth::Role;
use campus_core::hash_password;
use sqlx::PgPool;

pub use models::{SeedConfig, SeedSummary};

pub const SEED_EMAIL_DOMAIN: &str = "seed.campus.test";
pub const SEED_COURSE_MARKER: &str = "[seed]";
pub const SEED_PASSWORD: &str = "password123";

/// Seeds users, courses, classes and enrolments in that order.
pub async fn seed_all(db: &PgPool, config: SeedConfig, bcrypt_cost: u32) -> Result<SeedSummary> {
    let start = Instant::now();
    println!("🌱 Seeding database...");

    let password_hash = hash_password(SEED_PASSWORD, bcrypt_cost)
        .map_err(|e| e.error.context("Failed to hash password"))?;

    let admins = users::seed_users(db, Role::Admin, config.admins, &password_hash).await?;
    let teachers = users::seed_users(db, Role::Teacher, config.teachers, &password_hash).await?;
    let students = users::seed_users(db, Role::Student, config.students, &password_hash).await?;

    let course_ids = courses::seed_courses(db, config.courses, config.max_students).await?;
    let class_ids = courses::seed_classes(
        db,
        &course_ids,
        &teachers,
        config.classes_per_course,
        config.max_students,
    )
    .await?;
    let enrolments =
        courses::seed_enrolments(db, &class_ids, &students, config.students_per_class).await?;

    let summary = SeedSummary {
        users: admins.len() + teachers.len() + students.len(),
        courses: course_ids.len(),
        classes: class_ids.len(),
        enrolments,
    };

    println!("\n✅ Seeding finished in {:?}", start.elapsed());
    println!("   Users: {}", summary.users);
    println!("   Courses: {}", summary.courses);
    println!("   Classes: {}", summary.classes);
    println!("   Enrolments: {}", summary.enrolments);
    println!("   Password for every seeded user: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Removes seeded courses (with their classes and coursework) and then the
/// seeded users.
pub async fn clear_all(db: &PgPool) -> Result<()> {
    let start = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let courses = courses::clear_courses(db).await?;
    let users = users::clear_users(db).await?;

    println!(
        "   ✓ Deleted {} courses and {} users in {:?}",
        courses,
        users,
        start.elapsed()
    );
    Ok(())
}
