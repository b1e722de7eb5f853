//! # Campus CLI
//!
//! Administrative helpers and database seeding for Campus development
//! environments.
//!
//! ## Usage
//!
//! ```ignore
//! use campus_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::default().with_courses(8);
//! seed_all(&pool, config, 10).await?;
//! ```

pub mod admin;
pub mod seeder;
