//! partsearch CLI
//!
//! Command-line front end for the catalog search engine:
//! - `search` / `suggest` run the fuzzy search
//! - `list` runs the listing pipeline, optionally from a raw URL query string
//! - `show`, `brands`, `subcategories` expose the catalog lookups

use anyhow::Result;
use clap::Parser;
use partsearch::catalog::{CatalogSeed, Category};
use partsearch::cli::{
    CatalogCommand, Cli, Dispatch, ListArgs, LocalCommand, RecentArgs, SearchArgs, ShowArgs,
    SuggestArgs,
};
use partsearch::config::StorefrontConfig;
use partsearch::error::{get_exit_code, AppError};
use partsearch::format;
use partsearch::history::{self, RecentSearches};
use partsearch::listing::{ListingQuery, Selection};
use partsearch::pagination::Pagination;
use partsearch::service::CatalogService;
use std::path::Path;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let json = cli.json;
    match cli.command.dispatch() {
        Dispatch::Local(LocalCommand::Schema) => schema(),
        Dispatch::Local(LocalCommand::Recent(args)) => execute_recent(args, json),
        Dispatch::Catalog(command) => {
            let config = load_config(cli.config.as_deref(), cli.catalog.as_deref())?;
            let service = CatalogService::from_config(&config)?;
            info!(
                "Serving {} ({} products)",
                config.name,
                service.engine().catalog().len()
            );
            execute_catalog_command(command, &service, &config, json).await
        }
    }
}

async fn execute_catalog_command(
    command: CatalogCommand,
    service: &CatalogService,
    config: &StorefrontConfig,
    json: bool,
) -> Result<String> {
    match command {
        CatalogCommand::Search(args) => execute_search(service, config, args, json).await,
        CatalogCommand::List(args) => execute_list(service, config, args, json).await,
        CatalogCommand::Show(args) => execute_show(service, config, args, json).await,
        CatalogCommand::Brands => {
            let brands = service.list_brands().await;
            if json {
                return Ok(serde_json::to_string_pretty(&brands)?);
            }
            let brands: Vec<&str> = brands.iter().map(String::as_str).collect();
            Ok(format::format_brands(&brands))
        }
        CatalogCommand::Subcategories => {
            let subcategories = service.engine().catalog().list_subcategories();
            if json {
                return Ok(serde_json::to_string_pretty(&subcategories)?);
            }
            Ok(format::format_subcategories(&subcategories))
        }
        CatalogCommand::Suggest(args) => execute_suggest(service, config, args, json).await,
    }
}

fn schema() -> Result<String> {
    Ok(serde_json::to_string_pretty(&CatalogSeed::json_schema())?)
}

/// Config file (or defaults), with the catalog override applied
fn load_config(config: Option<&Path>, catalog: Option<&Path>) -> Result<StorefrontConfig> {
    let mut config = match config {
        Some(path) => StorefrontConfig::load(path)?,
        None => StorefrontConfig::default(),
    };
    if let Some(catalog) = catalog {
        config.catalog = Some(catalog.to_path_buf());
    }
    debug!(?config, "Effective configuration");
    Ok(config)
}

async fn execute_search(
    service: &CatalogService,
    config: &StorefrontConfig,
    args: SearchArgs,
    json: bool,
) -> Result<String> {
    let results = service.search(&args.query).await?;

    if !args.no_history {
        remember_search(&args.query);
    }

    if json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }

    let products: Vec<_> = results.iter().collect();
    let query = ListingQuery::from_params(Some(&args.query), None, None, None, None);
    Ok(format::format_product_list(
        "Search Results",
        &products,
        &Pagination::at_page(config.search.page_size, args.page),
        &query.active_filters(),
        &config.currency_label,
        &args.query,
    ))
}

async fn execute_list(
    service: &CatalogService,
    config: &StorefrontConfig,
    args: ListArgs,
    json: bool,
) -> Result<String> {
    let mut query = args
        .query_string
        .as_deref()
        .map(ListingQuery::from_query_string)
        .unwrap_or_default();

    if let Some(text) = args.query.as_deref() {
        query.text = text.trim().to_string();
    }
    if args.category.is_some() {
        query.category = Selection::parse(args.category.as_deref());
    }
    if args.subcategory.is_some() {
        query.subcategory = Selection::parse(args.subcategory.as_deref());
    }
    if let Some(brand) = args.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        query.brand = Some(brand.to_string());
    }
    if args.sort.is_some() {
        query.sort = Selection::parse(args.sort.as_deref());
    }

    if query.has_unrecognized() {
        warn!("Listing parameters name unknown values; nothing will match");
    }

    let heading = match &query.category {
        Selection::Only(Category::New) => "New Parts",
        Selection::Only(Category::ExJapan) => "Ex-Japan Parts",
        _ => "All Parts",
    };
    let filters = query.active_filters();
    let text = query.text.clone();
    let results = service.listing(query).await?;

    if json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }

    let products: Vec<_> = results.iter().collect();
    Ok(format::format_product_list(
        heading,
        &products,
        &Pagination::at_page(config.search.page_size, args.page),
        &filters,
        &config.currency_label,
        &text,
    ))
}

async fn execute_show(
    service: &CatalogService,
    config: &StorefrontConfig,
    args: ShowArgs,
    json: bool,
) -> Result<String> {
    let product = service
        .get_product_by_id(args.id.trim())
        .await
        .ok_or_else(|| AppError::NotFound(format!("Product '{}'", args.id.trim())))?;
    let related = service.related(&product).await;

    if json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "product": product,
            "related": related,
        }))?);
    }

    let related: Vec<_> = related.iter().collect();
    Ok(format::format_product_detail(
        &product,
        &related,
        &config.currency_label,
    ))
}

async fn execute_suggest(
    service: &CatalogService,
    config: &StorefrontConfig,
    args: SuggestArgs,
    json: bool,
) -> Result<String> {
    let suggestions = service.suggest(&args.query).await?;
    let quick_picks = service.engine().quick_picks();

    if json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "suggestions": suggestions,
            "quick_picks": quick_picks,
        }))?);
    }

    let products: Vec<_> = suggestions.iter().collect();
    Ok(format::format_suggestions(
        &products,
        &quick_picks,
        &config.currency_label,
    ))
}

fn execute_recent(args: RecentArgs, json: bool) -> Result<String> {
    let path = history::default_path()?;
    if args.clear {
        RecentSearches::update(&path, RecentSearches::clear)?;
        return Ok("Recent searches cleared.".to_string());
    }

    let recent = RecentSearches::load(&path);
    if json {
        return Ok(serde_json::to_string_pretty(&recent)?);
    }
    Ok(format::format_recent(recent.entries()))
}

/// Record a search; failing to persist history never fails the search
fn remember_search(query: &str) {
    let path = match history::default_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("Recent searches unavailable: {}", e);
            return;
        }
    };

    if let Err(e) = RecentSearches::update(&path, |recent| recent.record(query)) {
        warn!("Failed to save recent searches: {}", e);
    }
}
