//! Foodie cart CLI - inspect and edit a persisted cart.
//!
//! Commands:
//! - `foodie-cart show` - Show the cart
//! - `foodie-cart add` - Add one unit of an item
//! - `foodie-cart remove` - Remove a line
//! - `foodie-cart set-qty` - Set a line's quantity
//! - `foodie-cart coupons` - List redeemable coupons
//! - `foodie-cart apply` - Redeem a coupon code
//! - `foodie-cart drop-coupon` - Remove the applied coupon
//! - `foodie-cart clear` - Empty the cart
//! - `foodie-cart summary` - Show the checkout breakdown

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ApplyArgs, RemoveArgs, SetQtyArgs};

/// Foodie cart CLI - inspect and edit a persisted cart
#[derive(Parser)]
#[command(name = "foodie-cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding the persisted cart
    #[arg(short, long, global = true, default_value = ".foodie")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,

    /// Add one unit of an item
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Set a line's quantity (0 removes it)
    SetQty(SetQtyArgs),

    /// List redeemable coupons
    Coupons,

    /// Redeem a coupon code
    Apply(ApplyArgs),

    /// Remove the applied coupon
    DropCoupon,

    /// Empty the cart
    Clear,

    /// Show the checkout breakdown
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.store, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx),
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::SetQty(args) => commands::cart::set_qty(args, &ctx),
        Commands::Coupons => commands::coupons::list(&ctx),
        Commands::Apply(args) => commands::coupons::apply(args, &ctx),
        Commands::DropCoupon => commands::coupons::drop_coupon(&ctx),
        Commands::Clear => commands::cart::clear(&ctx),
        Commands::Summary => commands::summary::run(&ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "foodie_cart=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
