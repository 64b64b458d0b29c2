use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use schooldesk_auth::Role;
use schooldesk_cli::{admin, seeder};
use schooldesk_config::{DatabaseConfig, PasswordConfig};
use schooldesk_db::{PgPool, PgStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "schooldesk-cli")]
#[command(about = "SchoolDesk CLI - Administrative tools for SchoolDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account with super admin rights
    CreateSuperadmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Role stored on the account
        #[arg(short = 'r', long, default_value = "Admin")]
        role: Role,
    },
    /// Seed the database with fake students
    SeedStudents {
        /// Number of students to create
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let db_config = DatabaseConfig::from_env().unwrap_or_else(|e| fail("Configuration error", e));
    let pool = init_db_pool(&db_config)
        .await
        .unwrap_or_else(|e| fail("Failed to connect to database", e));

    match cli.command {
        Commands::CreateSuperadmin {
            name,
            email,
            password,
            role,
        } => handle_create_superadmin(pool, name, email, password, role).await,
        Commands::SeedStudents { count } => handle_seed_students(&pool, count).await,
        Commands::Migrate => handle_migrate(&pool).await,
    }
}

async fn handle_create_superadmin(
    pool: PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Role,
) {
    let password_config =
        PasswordConfig::from_env().unwrap_or_else(|e| fail("Configuration error", e));

    let name = name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Name")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read name", e))
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read email", e))
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    let store = PgStore::new(pool);
    match admin::create_super_admin(
        &store,
        &name,
        &email,
        &password,
        role,
        password_config.bcrypt_cost,
    )
    .await
    {
        Ok(account) => {
            println!("\n✅ Super admin created successfully!");
            println!("   Email: {}", account.email);
            println!("   Name: {}", account.name);
            println!("   Role: {}", account.role);
        }
        Err(e) => fail("Error creating super admin", e),
    }
}

async fn handle_seed_students(pool: &PgPool, count: usize) {
    if let Err(e) = seeder::seed_students(pool, count).await {
        fail("Error seeding students", e);
    }
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => fail("Error running migrations", e),
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {context}: {err}");
    std::process::exit(1);
}
