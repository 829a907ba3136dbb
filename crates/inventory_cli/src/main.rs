//! Command-line front end for the inventory.
//!
//! # Responsibility
//! - Map subcommands onto `InventoryService` operations.
//! - Render the inventory as a plain-text table.

mod table;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use inventory_core::{
    core_version, default_log_level, init_logging, InventoryService, ItemDraft, JsonFileStore,
    DEFAULT_DATA_FILE_NAME,
};
use log::info;
use std::path::PathBuf;
use uuid::Uuid;

/// Manage a local product inventory stored as JSON.
#[derive(Debug, Parser)]
#[command(name = "inventory", version, about, long_about = None)]
struct Cli {
    /// Inventory JSON file.
    #[arg(long, default_value = DEFAULT_DATA_FILE_NAME)]
    data_file: PathBuf,

    /// Directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every item.
    List,
    /// Show items whose fields contain TERM (case-insensitive).
    Search { term: String },
    /// Add a new item.
    Add(ItemFields),
    /// Replace the item at INDEX.
    Edit {
        index: usize,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Delete the item at INDEX, or by --id.
    Delete {
        #[arg(required_unless_present = "id", conflicts_with = "id")]
        index: Option<usize>,
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Print the core version.
    Version,
}

/// Raw item fields, coerced the same way the form input is.
#[derive(Debug, Clone, Args)]
struct ItemFields {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "0")]
    price: String,
    #[arg(long, default_value = "0")]
    quantity: String,
    #[arg(long, default_value = "")]
    unit: String,
}

impl From<ItemFields> for ItemDraft {
    fn from(fields: ItemFields) -> Self {
        ItemDraft {
            name: fields.name,
            category: fields.category,
            price: fields.price,
            quantity: fields.quantity,
            unit: fields.unit,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    start_logging(&cli)?;

    let store = JsonFileStore::new(&cli.data_file);
    store
        .ensure_data_file()
        .with_context(|| format!("failed to prepare `{}`", cli.data_file.display()))?;
    let mut service = InventoryService::open(store);

    match cli.command {
        Command::List => {
            let positions = (0..service.len()).collect::<Vec<_>>();
            print!("{}", table::render(service.items(), &positions));
        }
        Command::Search { term } => {
            let positions = service.search_positions(&term);
            print!("{}", table::render(service.items(), &positions));
        }
        Command::Add(fields) => {
            let item = ItemDraft::from(fields).into_item()?;
            let id = service.add_item(item)?;
            println!("added item {id}");
        }
        Command::Edit { index, fields } => {
            let item = ItemDraft::from(fields).into_item()?;
            service.edit_item(index, item)?;
            println!("updated item {index}");
        }
        Command::Delete { index, id } => {
            let removed = match (index, id) {
                (_, Some(id)) => service.delete_item_by_id(id)?,
                (Some(index), None) => service.delete_item(index)?,
                (None, None) => bail!("either INDEX or --id is required"),
            };
            println!("deleted `{}` ({})", removed.name, removed.id);
        }
        Command::Version => println!("inventory_core {}", core_version()),
    }
    Ok(())
}

fn start_logging(cli: &Cli) -> Result<()> {
    let Some(log_dir) = &cli.log_dir else {
        return Ok(());
    };
    let log_dir = if log_dir.is_absolute() {
        log_dir.clone()
    } else {
        std::env::current_dir()
            .context("failed to resolve working directory")?
            .join(log_dir)
    };
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().as_str().to_string());

    init_logging(&level, &log_dir.to_string_lossy()).map_err(anyhow::Error::msg)?;
    info!(
        "event=cli_start module=cli status=ok data_file={}",
        cli.data_file.display()
    );
    Ok(())
}
