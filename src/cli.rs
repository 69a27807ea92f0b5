use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hcj-agenda",
    version,
    about = "Extract structured agendas from saved judicial council session pages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify sessions on a saved announcement listing page.
    Listing(ListingArgs),
    /// Hash and index saved session pages.
    Inventory(InventoryArgs),
    /// Extract agendas from indexed session pages.
    Extract(ExtractArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    #[arg(long, default_value = ".cache/hcj")]
    pub cache_root: PathBuf,

    /// Saved copy of the announcement listing page.
    #[arg(long)]
    pub page: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".cache/hcj")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = ".cache/hcj")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub inventory_manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub listing_manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub refresh_inventory: bool,

    /// Restrict extraction to these talk codes (e.g. `vrp_0042`).
    #[arg(long = "session")]
    pub sessions: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/hcj")]
    pub cache_root: PathBuf,
}
