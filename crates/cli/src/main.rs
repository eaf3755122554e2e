//! Streuobst CLI - Catalog validation and cart inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate the configurator catalog
//! streuobst catalog check crates/storefront/content/catalog.yaml
//!
//! # Inspect and edit a cart kept in a local JSON key-value file
//! streuobst cart add bio-apfelsaft-1l
//! streuobst cart dec bio-apfelsaft-1l
//! streuobst cart apply remove:bio-apfelsaft-1l
//! streuobst cart show
//! streuobst cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `STREUOBST_CATALOG` - Catalog YAML (default: crates/storefront/content/catalog.yaml)
//! - `STREUOBST_CART_STORE` - Cart store file (default: .streuobst-cart.json)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use streuobst_core::ProductId;
use streuobst_core::cart::CartCommand;

mod commands;
mod file_storage;

#[derive(Parser)]
#[command(name = "streuobst")]
#[command(author, version, about = "Streuobst CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect and edit a locally stored cart
    Cart {
        #[command(flatten)]
        files: CartFiles,

        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a catalog file and list its products
    Check {
        /// Catalog YAML file
        #[arg(env = "STREUOBST_CATALOG", default_value = commands::DEFAULT_CATALOG)]
        file: PathBuf,
    },
}

#[derive(Args)]
struct CartFiles {
    /// Catalog YAML file products are added from
    #[arg(
        long,
        global = true,
        env = "STREUOBST_CATALOG",
        default_value = commands::DEFAULT_CATALOG
    )]
    catalog: PathBuf,

    /// JSON key-value file the cart blob is stored in
    #[arg(
        long,
        global = true,
        env = "STREUOBST_CART_STORE",
        default_value = commands::DEFAULT_STORE
    )]
    store: PathBuf,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart as the cart panel would
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove one unit of a product
    Dec {
        /// Product id
        id: ProductId,
    },
    /// Remove a product entirely
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Apply a raw `action:id` operation, as posted by the storefront
    Apply {
        /// Operation, e.g. `add:bio-apfelsaft-1l`
        op: CartCommand,
    },
}

impl CartAction {
    fn into_command(self) -> Option<CartCommand> {
        match self {
            Self::Show => None,
            Self::Add { id } => Some(CartCommand::Add(id)),
            Self::Dec { id } => Some(CartCommand::Decrement(id)),
            Self::Remove { id } => Some(CartCommand::Remove(id)),
            Self::Clear => Some(CartCommand::Clear),
            Self::Apply { op } => Some(op),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "streuobst_cli=info,streuobst_core=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { file } => commands::catalog::check(&file).await?,
        },
        Commands::Cart { files, action } => match action.into_command() {
            None => commands::cart::show(&files.catalog, &files.store).await?,
            Some(command) => {
                commands::cart::apply(&files.catalog, &files.store, &command).await?;
            }
        },
    }
    Ok(())
}
