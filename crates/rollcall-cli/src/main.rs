use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use rollcall_cli::admin::{NewAdmin, create_admin};
use rollcall_core::{generate_password, hash_password_with_cost};

/// Matches `bcrypt::DEFAULT_COST`.
const DEFAULT_HASH_COST: u32 = 12;

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Rollcall CLI - Administrative tools for Rollcall", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long, conflicts_with = "generate")]
        password: Option<String>,

        /// Generate a random password and print it once
        #[arg(short = 'g', long)]
        generate: bool,
    },
    /// Print a random password
    GeneratePassword {
        /// Password length (minimum 6)
        #[arg(short = 'n', long, default_value = "16")]
        length: usize,
    },
    /// Print the bcrypt hash of a password
    HashPassword {
        /// Password to hash (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// bcrypt cost; values outside 4..=31 fall back to the default
        #[arg(short = 'c', long, default_value_t = DEFAULT_HASH_COST)]
        cost: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
            generate,
        } => handle_create_admin(first_name, last_name, email, password, generate).await,
        Commands::GeneratePassword { length } => {
            println!("{}", generate_password(length));
            Ok(())
        }
        Commands::HashPassword { password, cost } => {
            let password = match password {
                Some(password) => password,
                None => Password::new().with_prompt("Password").interact()?,
            };
            let hash = hash_password_with_cost(&password, cost).map_err(|e| e.error)?;
            println!("{}", hash);
            Ok(())
        }
    }
}

async fn handle_create_admin(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    generate: bool,
) -> anyhow::Result<()> {
    let first_name = prompt_unless_given(first_name, "First name")?;
    let last_name = prompt_unless_given(last_name, "Last name")?;
    let email = prompt_unless_given(email, "Email address")?;

    let (password, generated) = match password {
        Some(password) => (password, false),
        None if generate => (generate_password(16), true),
        None => (
            Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact()?,
            false,
        ),
    };

    let pool = rollcall_db::init_db_pool().await?;
    let admin = NewAdmin {
        first_name,
        last_name,
        email,
        password,
    };

    match create_admin(&pool, &admin, DEFAULT_HASH_COST).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", admin.email);
            println!("   Name: {} {}", admin.first_name, admin.last_name);
            if generated {
                println!("   Password: {}", admin.password);
                println!("   (shown once; store it now)");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt_unless_given(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}
