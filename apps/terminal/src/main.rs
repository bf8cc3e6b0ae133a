//! # medstore Terminal Application Entry Point
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: warn (quiet console), override with RUST_LOG             │
//! │                                                                         │
//! │  2. Resolve Data Directory ───────────────────────────────────────────► │
//! │     • --data-dir flag, MEDSTORE_DATA_DIR, or the platform data dir      │
//! │                                                                         │
//! │  3. Open Stores ──────────────────────────────────────────────────────► │
//! │     • medicines.json / transactions.jsonl / sales_history.txt           │
//! │       (created lazily on first write)                                   │
//! │                                                                         │
//! │  4. Run Main Menu Loop ───────────────────────────────────────────────► │
//! │     • Admin Panel (password gated)                                      │
//! │     • Customer Panel (cart + checkout)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Menu actions report their own errors and the loop continues; only a
//! startup failure exits the process.

mod admin;
mod config;
mod customer;
mod error;
mod prompt;
mod render;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use error::AppError;
use medstore_store::{CatalogStore, ReceiptLog, TransactionLog};

/// Inventory and point-of-sale tool for a small medical store.
#[derive(Debug, Parser)]
#[command(name = "medstore", version, about)]
struct Args {
    /// Directory holding the catalog and transaction files
    /// (default: the platform data directory, or $MEDSTORE_DATA_DIR)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

/// Everything a menu action needs: configuration plus the three stores.
pub struct App {
    pub config: AppConfig,
    pub catalog: CatalogStore,
    pub transactions: TransactionLog,
    pub receipts: ReceiptLog,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let catalog = CatalogStore::new(config.catalog_path());
        let transactions = TransactionLog::new(config.transactions_path());
        let receipts = ReceiptLog::new(config.receipts_path());
        App {
            config,
            catalog,
            transactions,
            receipts,
        }
    }
}

fn main() {
    init_tracing();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = AppConfig::resolve(args.data_dir)?;
    info!(data_dir = %config.data_dir.display(), "starting medstore");

    let app = App::new(config);

    render::print_banner(&app.config.store_name);

    loop {
        println!();
        render::print_rule('-', 40);
        println!("          MAIN MENU");
        render::print_rule('-', 40);
        println!("1. Admin Panel");
        println!("2. Customer Panel");
        println!("0. Exit");

        match prompt::read_menu_choice("Enter your choice: ")? {
            Some(1) => admin::panel(&app)?,
            Some(2) => customer::panel(&app)?,
            Some(0) => {
                println!("\nGoodbye!");
                return Ok(());
            }
            _ => println!("\nInvalid choice! Please try again."),
        }
    }
}

/// Initializes the tracing subscriber.
///
/// The console doubles as the user interface, so the default filter is
/// quiet; `RUST_LOG=medstore=debug` surfaces store operations.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
