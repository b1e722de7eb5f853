use anyhow::Result;
use campus_cli::admin::create_admin;
use campus_cli::seeder::{self, SeedConfig};
use campus_config::{DatabaseConfig, PasswordConfig};
use campus_db::init_db_pool;
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(about = "Campus CLI - Administrative tools for Campus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users, courses, classes and enrolments
    Seed {
        #[arg(long, default_value = "1")]
        admins: usize,

        #[arg(long, default_value = "6")]
        teachers: usize,

        #[arg(long, default_value = "120")]
        students: usize,

        #[arg(short = 'c', long, default_value = "5")]
        courses: usize,

        /// Classes per course, one teacher each
        #[arg(long, default_value = "2")]
        classes: usize,

        /// Students enrolled in each class
        #[arg(long, default_value = "20")]
        per_class: usize,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Remove seeded data (real accounts are kept)
    ClearSeed,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    let bcrypt_cost = PasswordConfig::from_env().cost;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password, bcrypt_cost).await,
        Commands::Seed {
            admins,
            teachers,
            students,
            courses,
            classes,
            per_class,
            yes,
        } => {
            let config = SeedConfig::default()
                .with_users(admins, teachers, students)
                .with_courses(courses)
                .with_classes(classes, per_class);
            handle_seed(&pool, config, bcrypt_cost, yes).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    bcrypt_cost: u32,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    match create_admin(pool, &name, &email, &password, bcrypt_cost).await {
        Ok(id) => {
            println!("\n✅ Administrator created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", email);
            println!("   Name: {}", name);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating administrator: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig, bcrypt_cost: u32, yes: bool) -> Result<()> {
    if !yes {
        let proceed = Confirm::new()
            .with_prompt(format!(
                "Seed {} users and {} courses?",
                config.admins + config.teachers + config.students,
                config.courses
            ))
            .default(true)
            .interact()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Err(e) = seeder::seed_all(pool, config, bcrypt_cost).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
