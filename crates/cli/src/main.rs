//! Green Hub cart CLI.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of product 3
//! gh-cart add --id 3 --name "Monstera" --price 450 --image /img/monstera.jpg --qty 2
//!
//! # Show the cart (or the stored JSON payload)
//! gh-cart list
//! gh-cart list --json
//!
//! # Change or drop a line
//! gh-cart set-qty 3 1
//! gh-cart remove 3
//!
//! # Place the order
//! gh-cart checkout --name "Somchai" --phone 0812345678 --address "Bangkok" --payment cod
//! ```
//!
//! # Commands
//!
//! - `list` - Show cart lines and subtotal
//! - `add` - Add a product snapshot
//! - `set-qty` - Set a line's quantity (zero or less removes it)
//! - `remove` - Remove a line
//! - `clear` - Empty the cart
//! - `checkout` - Place the order and empty the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use green_hub_cli::commands;
use green_hub_cli::{CliConfig, Context};
use green_hub_core::{PaymentMethod, Price, ProductId, ShippingDetails};

#[derive(Parser)]
#[command(name = "gh-cart")]
#[command(author, version, about = "Green Hub Shop cart")]
struct Cli {
    /// Directory holding the cart (overrides `GREEN_HUB_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    List {
        /// Print the stored JSON payload instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: Price,

        /// Image URL or path
        #[arg(long, default_value = "")]
        image: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Set the quantity of a cart line (zero or less removes it)
    SetQty {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a cart line
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Place the order and empty the cart
    Checkout {
        /// Recipient name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Shipping address
        #[arg(long)]
        address: String,

        /// Payment method (`cod`, `bank`, `credit`)
        #[arg(long, default_value = "cod")]
        payment: PaymentMethod,
    },
}

fn main() {
    // Defaults to info level for the CLI if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "green_hub_cli=info,green_hub_core=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print(output: &str) {
    print!("{output}");
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = CliConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    let ctx = Context::open(&config)?;

    let output = match cli.command {
        Commands::List { json } => commands::cart::list(&ctx, json)?,
        Commands::Add {
            id,
            name,
            price,
            image,
            qty,
        } => commands::cart::add(&ctx, id, name, price, image, qty),
        Commands::SetQty { id, qty } => commands::cart::set_qty(&ctx, id, qty),
        Commands::Remove { id } => commands::cart::remove(&ctx, id),
        Commands::Clear => commands::cart::clear(&ctx),
        Commands::Checkout {
            name,
            phone,
            address,
            payment,
        } => commands::checkout::run(
            &ctx,
            ShippingDetails {
                name,
                phone,
                address,
            },
            payment,
        )?,
    };
    Ok(output)
}
