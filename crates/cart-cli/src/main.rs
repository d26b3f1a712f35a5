//! # shelf-cart
//!
//! Drive a storefront cart from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Point at the cart service (or write config/cart.toml)
//! export CART_API_BASE_URL=http://localhost:3000
//!
//! # Show the cart
//! shelf-cart show
//!
//! # Add one copy of book 42, then remove it again
//! shelf-cart update 42 1
//! shelf-cart update 42 -1
//!
//! # Check out
//! shelf-cart checkout
//! ```

use cart_core::{CartProvider, CartState, ProductId};
use cart_http::HttpCartGateway;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod render;

#[derive(Parser)]
#[command(name = "shelf-cart")]
#[command(author, version, about = "Inspect and update a storefront cart")]
struct Cli {
    /// TOML config file (default: config/cart.toml, then environment)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the cart
    Show,
    /// Send a quantity change for a product
    Update {
        /// Product (book) ID
        product_id: ProductId,

        /// Quantity change, passed to the service as-is
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Check out the current cart
    Checkout,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.json);

    let config = config::load_config(cli.config.as_deref())?;
    info!("Cart service: {}", config.cart_url());

    let gateway = HttpCartGateway::new(config)?;
    let provider = CartProvider::mount(Arc::new(gateway)).await;
    let store = provider.handle().store()?;

    store.subscribe(|state: &Arc<CartState>| {
        debug!(
            lines = state.lines.len(),
            loading = state.loading,
            error = state.error_message(),
            "cart changed"
        );
    });

    match cli.command {
        Commands::Show => {}
        Commands::Update { product_id, amount } => store.update_item(product_id, amount).await,
        Commands::Checkout => store.checkout().await,
    }

    let state = store.snapshot();
    print!("{}", render::render(&state));

    Ok(ExitCode::from(exit_status(&state)))
}

/// Non-zero when the cart recorded a failure; `render` has already printed it
fn exit_status(state: &CartState) -> u8 {
    u8::from(state.error.is_some())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
