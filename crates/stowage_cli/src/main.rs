//! `stowage` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, resolve the data directory and open the store.
//! - Map each subcommand onto one `InventoryService` call.
//! - Report failures on stderr with a nonzero exit code.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;

use stowage_core::{
    default_log_level, init_logging, InventoryService, ItemAddress, ItemSize, SqliteStore,
};

const STORE_FILE_NAME: &str = "stowage.sqlite3";

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Track small items across binned storage locations")]
#[command(version)]
struct Cli {
    /// Directory holding the inventory database and logs
    #[arg(long, global = true, env = "STOWAGE_DIR")]
    data_dir: Option<PathBuf>,

    /// Exact path of the database file, overriding --data-dir
    #[arg(long, global = true, env = "STOWAGE_STORE_PATH")]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a storage location with a fixed number of bins
    AddLocation {
        name: String,
        #[arg(allow_negative_numbers = true)]
        num_bins: i64,
    },

    /// List all locations
    Locations,

    /// Add one item at LOCATION[/BIN]
    Add {
        address: ItemAddress,
        name: String,
        #[arg(value_parser = parse_size, default_value = "S")]
        size: ItemSize,
    },

    /// Add items line by line from standard input
    Quickadd { address: ItemAddress },

    /// Print the full sorted item listing
    Items,

    /// Revert the most recent committed change
    Undo,
}

fn parse_size(token: &str) -> Result<ItemSize, String> {
    token.parse::<ItemSize>().map_err(|err| err.to_string())
}

fn resolve_store_path(cli: &Cli) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(store_path) = &cli.store_path {
        return Ok(store_path.clone());
    }

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .ok_or("could not determine a data directory; set --data-dir or STOWAGE_DIR")?
            .join("stowage"),
    };

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join(STORE_FILE_NAME))
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let store_path = resolve_store_path(&cli)?;

    // Logging setup must never fail a command; commands stay usable even
    // when the log directory is read-only.
    if let Some(log_dir) = store_path.parent() {
        let _ = init_logging(default_log_level(), log_dir);
    }

    let store = SqliteStore::open(&store_path)?;
    let mut service = InventoryService::new(store);

    match cli.command {
        Command::AddLocation { name, num_bins } => {
            service.add_location(&name, num_bins)?;
        }
        Command::Locations => {
            for location in service.locations()? {
                println!("{} ({} bins)", location.name, location.num_bins);
            }
        }
        Command::Add {
            address,
            name,
            size,
        } => {
            let row = service.add_item(&address, &name, size)?;
            println!("{row}");
        }
        Command::Quickadd { address } => {
            let stdin = io::stdin();
            service.quickadd(&address, stdin.lock(), &mut io::stdout())?;
        }
        Command::Items => {
            for row in service.items()? {
                println!("{row}");
            }
        }
        Command::Undo => {
            service.undo()?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
