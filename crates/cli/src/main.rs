//! PlanetSmart CLI - drive a storefront session from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! ps-cli products --search bamboo --sort price-low
//! ps-cli products --category kitchen --badge organic --min-score 90
//!
//! # Compare conventional purchases with sustainable alternatives
//! ps-cli compare --category personal
//!
//! # Sign in (the session is kept under PLANETSMART_DATA_DIR)
//! ps-cli login -e shashank@gmail.com -p 123456
//! ps-cli whoami
//!
//! # Spend EcoPoints
//! ps-cli rewards
//! ps-cli claim 3
//! ```
//!
//! # Commands
//!
//! - `products` - Query the sustainable catalog
//! - `compare` - Show previous purchases and their sustainable alternatives
//! - `login` / `signup` / `logout` / `whoami` - Manage the persisted session
//! - `rewards` / `claim` - Browse and redeem rewards

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planetsmart_core::{EcoBadge, RewardId};
use planetsmart_storefront::catalog::{CategoryFilter, SortKey};
use planetsmart_storefront::config::StorefrontConfig;
use planetsmart_storefront::error::AppError;

mod commands;

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(author, version, about = "PlanetSmart storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the sustainable product catalog
    Products {
        /// Case-insensitive text matched against name, description and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category id (`home`, `personal`, `kitchen`, ...) or `all`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Lowest price, inclusive
        #[arg(long, default_value = "0")]
        min_price: Decimal,

        /// Highest price, inclusive
        #[arg(long, default_value = "200")]
        max_price: Decimal,

        /// Lowest sustainability score, inclusive
        #[arg(long, default_value_t = 0)]
        min_score: u8,

        /// Highest sustainability score, inclusive
        #[arg(long, default_value_t = 100)]
        max_score: u8,

        /// Only products with any of these badges (repeatable)
        #[arg(short, long)]
        badge: Vec<EcoBadge>,

        /// `featured`, `price-low`, `price-high`, `sustainability`, `impact` or `rating`
        #[arg(long, default_value = "sustainability")]
        sort: SortKey,
    },
    /// Show previous purchases next to their sustainable alternatives
    Compare {
        /// Category id or `all`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Log in with a registered account
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Signup {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out and forget the saved session
    Logout,
    /// Show the signed-in member
    Whoami,
    /// List rewards and which are unlocked
    Rewards,
    /// Redeem a reward with EcoPoints
    Claim {
        /// Reward ID as listed by `rewards`
        reward: RewardId,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
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

    tracing::info!("Sentry initialized");
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

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            report_failure(&AppError::from(e));
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "planetsmart_storefront=info,planetsmart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        e.report();
        report_failure(&e);
        std::process::exit(1);
    }
}

#[allow(clippy::print_stderr)]
fn report_failure(error: &AppError) {
    eprintln!("error: {}", error.public_message());
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), AppError> {
    match cli.command {
        Commands::Products {
            search,
            category,
            min_price,
            max_price,
            min_score,
            max_score,
            badge,
            sort,
        } => {
            let query = commands::catalog::ProductArgs {
                search,
                category,
                price: (min_price, max_price),
                score: (min_score, max_score),
                badges: badge,
                sort,
            };
            commands::catalog::products(query.into_query());
        }
        Commands::Compare { category } => commands::catalog::compare(category),
        Commands::Login { email, password } => {
            commands::account::login(config, &email, &password).await?;
        }
        Commands::Signup {
            name,
            email,
            password,
        } => commands::account::signup(config, &name, &email, &password).await?,
        Commands::Logout => commands::account::logout(config).await?,
        Commands::Whoami => commands::account::whoami(config).await?,
        Commands::Rewards => commands::rewards::list(config).await?,
        Commands::Claim { reward } => commands::rewards::claim(config, reward).await?,
    }
    Ok(())
}
