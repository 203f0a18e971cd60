//! CapeBiz CLI - Terminal front end for the directory cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with VAT and totals
//! capebiz show
//!
//! # Add items
//! capebiz boost --business-id 42 --business-name "Joe's Plumbing"
//! capebiz subscribe professional
//! capebiz add --id v1 --type voucher --name "Gift voucher" --price 250
//!
//! # Edit lines (indices as shown by `capebiz show`)
//! capebiz update 0 3
//! capebiz decrement 0
//! capebiz remove 1
//! capebiz clear
//!
//! # Check out and print the payment URL
//! capebiz checkout
//! ```
//!
//! # Commands
//!
//! - `show`, `plans` - Read the cart and the plan catalog
//! - `add`, `boost`, `subscribe` - Add items
//! - `remove`, `update`, `increment`, `decrement`, `clear` - Edit the cart
//! - `checkout` - Send the cart to the checkout endpoint
//! - `track-view` - Record a business page view

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use capebiz_client::{ClientConfig, FileStorage};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "capebiz")]
#[command(author, version, about = "CapeBiz Connect cart tools")]
struct Cli {
    /// Cart storage file (overrides `CAPEBIZ_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,
    /// List subscription plans
    Plans,
    /// Add one unit of an item
    Add {
        /// Item ID
        #[arg(long)]
        id: String,

        /// Item type (`boost`, `subscription`, or any other kind)
        #[arg(long = "type", default_value = "boost")]
        kind: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price in rand
        #[arg(short, long)]
        price: Decimal,

        /// Human-readable duration (e.g. "7 days")
        #[arg(short, long)]
        duration: Option<String>,
    },
    /// Add a week-long boost for a business listing
    Boost {
        #[arg(long)]
        business_id: String,

        #[arg(long)]
        business_name: String,
    },
    /// Add a month of a subscription plan
    Subscribe {
        /// Plan code (see `capebiz plans`)
        plan: String,
    },
    /// Remove the line at INDEX
    Remove { index: usize },
    /// Set the quantity of the line at INDEX
    Update { index: usize, quantity: u32 },
    /// Add one to the quantity of the line at INDEX
    Increment { index: usize },
    /// Take one off the line at INDEX, removing it at zero
    Decrement { index: usize },
    /// Remove every line
    Clear,
    /// Check out and print the payment URL
    Checkout,
    /// Record a view of a business page
    TrackView { business_id: String },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = ClientConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "capebiz_cli=info,capebiz_client=info,capebiz_core=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = FileStorage::new(cli.storage.unwrap_or_else(|| config.storage_path.clone()));

    match cli.command {
        Commands::Show => commands::view::show(storage)?,
        Commands::Plans => commands::view::plans(),
        Commands::Add {
            id,
            kind,
            name,
            price,
            duration,
        } => commands::cart::add(storage, &id, &kind, &name, price, duration)?,
        Commands::Boost {
            business_id,
            business_name,
        } => commands::cart::boost(storage, &business_id, &business_name)?,
        Commands::Subscribe { plan } => commands::cart::subscribe(storage, &plan)?,
        Commands::Remove { index } => commands::cart::remove(storage, index)?,
        Commands::Update { index, quantity } => commands::cart::update(storage, index, quantity)?,
        Commands::Increment { index } => commands::cart::increment(storage, index)?,
        Commands::Decrement { index } => commands::cart::decrement(storage, index)?,
        Commands::Clear => commands::cart::clear(storage)?,
        Commands::Checkout => commands::checkout::checkout(config, storage).await?,
        Commands::TrackView { business_id } => {
            commands::checkout::track_view(config, &business_id).await?;
        }
    }
    Ok(())
}
