//! CLI mode implementation
//!
//! Provides the command-line interface for the catalog tools

use clap::{Args, Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// partsearch CLI
#[derive(Parser, Debug)]
#[command(name = "partsearch")]
#[command(about = "Auto-parts catalog search and filtering", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Print JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// Storefront config file
    #[arg(long, global = true, env = "PARTSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog seed file, overriding the config
    #[arg(long, global = true, env = "PARTSEARCH_CATALOG")]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuzzy search across the whole catalog
    Search(SearchArgs),
    /// List a category with search, facet filters and sorting
    List(ListArgs),
    /// Show one product with its related products
    Show(ShowArgs),
    /// List distinct brand labels
    Brands,
    /// List subcategories with their display titles
    Subcategories,
    /// Search-as-you-type suggestions
    Suggest(SuggestArgs),
    /// Show or clear recent searches
    Recent(RecentArgs),
    /// Print the JSON Schema of catalog seed files
    Schema,
}

/// Commands that run against a loaded catalog
#[derive(Debug)]
pub enum CatalogCommand {
    Search(SearchArgs),
    List(ListArgs),
    Show(ShowArgs),
    Brands,
    Subcategories,
    Suggest(SuggestArgs),
}

/// Commands that never touch the catalog
#[derive(Debug)]
pub enum LocalCommand {
    Recent(RecentArgs),
    Schema,
}

#[derive(Debug)]
pub enum Dispatch {
    Catalog(CatalogCommand),
    Local(LocalCommand),
}

impl Commands {
    /// Route a command by whether it needs the catalog loaded
    pub fn dispatch(self) -> Dispatch {
        match self {
            Commands::Search(args) => Dispatch::Catalog(CatalogCommand::Search(args)),
            Commands::List(args) => Dispatch::Catalog(CatalogCommand::List(args)),
            Commands::Show(args) => Dispatch::Catalog(CatalogCommand::Show(args)),
            Commands::Brands => Dispatch::Catalog(CatalogCommand::Brands),
            Commands::Subcategories => Dispatch::Catalog(CatalogCommand::Subcategories),
            Commands::Suggest(args) => Dispatch::Catalog(CatalogCommand::Suggest(args)),
            Commands::Recent(args) => Dispatch::Local(LocalCommand::Recent(args)),
            Commands::Schema => Dispatch::Local(LocalCommand::Schema),
        }
    }
}

/// Search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms (case-insensitive, typo tolerant)
    #[schemars(description = "Search terms (case-insensitive, typo tolerant)")]
    pub query: String,

    /// Number of "load more" steps past the first page
    #[arg(short = 'p', long, default_value_t = 0)]
    #[serde(default)]
    pub page: usize,

    /// Do not record this query in recent searches
    #[arg(long)]
    #[serde(default)]
    pub no_history: bool,
}

/// Listing arguments; mirrors the storefront listing URL parameters
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct ListArgs {
    /// Category scope (new, ex-japan); whole catalog when absent
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Free-text search within the category
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Subcategory (engine, brake-steering, suspension-body, electrical-light)
    #[arg(short = 's', long)]
    pub subcategory: Option<String>,

    /// Exact brand label
    #[arg(short = 'b', long)]
    pub brand: Option<String>,

    /// Sort order (featured, price-low, price-high)
    #[arg(long)]
    pub sort: Option<String>,

    /// Raw URL query string, e.g. "q=brake&sort=price-low"; flags win over it
    #[arg(long, conflicts_with = "query")]
    pub query_string: Option<String>,

    /// Number of "load more" steps past the first page
    #[arg(short = 'p', long, default_value_t = 0)]
    #[serde(default)]
    pub page: usize,
}

#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ShowArgs {
    /// Product id, e.g. np-001
    pub id: String,
}

#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SuggestArgs {
    /// Partial query; quick picks are shown when blank
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Args, Debug)]
pub struct RecentArgs {
    /// Forget all recent searches
    #[arg(long)]
    pub clear: bool,
}
