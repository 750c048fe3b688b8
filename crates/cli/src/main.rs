//! Roster CLI - Local account management.
//!
//! # Usage
//!
//! ```bash
//! # Register the single admin and some users
//! roster register -n "Root" -e root@example.com -p 555-0100 --password hunter22 -r admin
//! roster register -n "A" -e a@example.com -p 555-0101 --password pass12
//!
//! # Log in and work with your own profile
//! roster login -e a@example.com --password pass12
//! roster profile show
//! roster profile edit --phone 555-0199
//!
//! # Admin-only account list
//! roster users list
//! roster users delete <ID>
//! ```
//!
//! # Commands
//!
//! - `register` - Create an account (does not log in)
//! - `login` / `logout` / `whoami` - Session management
//! - `profile show|edit` - Your own profile, or any profile as the admin
//! - `users list|edit|delete` - Admin-only account management

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::CommandError;
use commands::account::RegisterArgs;
use commands::profile::EditArgs;
use config::RosterConfig;

#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about = "Roster account management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Phone number
        #[arg(short, long)]
        phone: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,
    },
    /// Log in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in account
    Whoami,
    /// View or edit a profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Manage all accounts (admin only)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show a profile (defaults to your own)
    Show {
        /// Account ID
        id: Option<String>,
    },
    /// Edit a profile (defaults to your own)
    Edit {
        /// Account ID
        id: Option<String>,

        #[command(flatten)]
        fields: EditFields,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List every account
    List,
    /// Edit any account
    Edit {
        /// Account ID
        id: String,

        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete any account
    Delete {
        /// Account ID
        id: String,
    },
}

#[derive(Args)]
struct EditFields {
    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New phone number
    #[arg(long)]
    phone: Option<String>,

    /// New email address
    #[arg(long)]
    email: Option<String>,

    /// New password
    #[arg(long)]
    password: Option<String>,
}

impl From<EditFields> for EditArgs {
    fn from(fields: EditFields) -> Self {
        Self {
            name: fields.name,
            phone_number: fields.phone,
            email: fields.email,
            password: fields.password.map(SecretString::from),
        }
    }
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roster_cli=info,roster_accounts=info".into());

    // JSON output for log shipping, compact text otherwise
    let json = std::env::var("ROSTER_LOG_JSON").is_ok();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let config = RosterConfig::from_env()?;
    let roster = commands::open(&config).await?;

    match cli.command {
        Commands::Register {
            name,
            email,
            phone,
            password,
            role,
        } => {
            let args = RegisterArgs {
                name,
                email,
                phone_number: phone,
                password: SecretString::from(password),
                role,
            };
            commands::account::register(&roster, args).await?;
        }
        Commands::Login {
            email,
            password,
            role,
        } => {
            let password = SecretString::from(password);
            commands::account::login(&roster, &email, &password, &role).await?;
        }
        Commands::Logout => commands::account::logout(&roster).await?,
        Commands::Whoami => commands::account::whoami(&roster).await?,
        Commands::Profile { action } => match action {
            ProfileAction::Show { id } => commands::profile::show(&roster, id).await?,
            ProfileAction::Edit { id, fields } => {
                commands::profile::edit(&roster, id, fields.into()).await?;
            }
        },
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(&roster).await?,
            UsersAction::Edit { id, fields } => {
                commands::users::edit(&roster, id, fields.into()).await?;
            }
            UsersAction::Delete { id } => commands::users::delete(&roster, id).await?,
        },
    }
    Ok(())
}
