//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `dishbook_core` linkage, logging, store bootstrap and seeding end
//!   to end.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `dishbook_cli [DB_PATH [LOG_DIR]]`. Without a path an in-memory
//! store is used; logs go to `<temp>/dishbook-logs` unless `LOG_DIR` is given.

use dishbook_core::{Catalog, CatalogConfig, CategoryKind, RestaurantSortKey};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_LOG_DIR_NAME: &str = "dishbook-logs";

fn main() -> ExitCode {
    let mut args = std::env::args_os().skip(1);
    let config = match args.next() {
        Some(path) => CatalogConfig::at_path(path),
        None => CatalogConfig::in_memory(),
    };
    let log_dir = resolve_log_dir(args.next(), &std::env::temp_dir());

    println!("dishbook_core ping={}", dishbook_core::ping());
    println!("dishbook_core version={}", dishbook_core::core_version());
    println!(
        "dishbook_core schema_version={}",
        dishbook_core::CURRENT_SCHEMA_VERSION
    );

    if let Err(err) = dishbook_core::init_logging(dishbook_core::default_log_level(), &log_dir) {
        eprintln!("dishbook_core logging failed: {err}");
        return ExitCode::FAILURE;
    }
    println!("log_dir={}", log_dir.display());

    match probe(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dishbook_core probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Absolute log directory: `arg` resolved against the working directory, or
/// `DEFAULT_LOG_DIR_NAME` under `temp_dir`.
fn resolve_log_dir(arg: Option<OsString>, temp_dir: &Path) -> PathBuf {
    match arg.map(PathBuf::from) {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => std::env::current_dir()
            .map(|cwd| cwd.join(&dir))
            .unwrap_or(dir),
        None => temp_dir.join(DEFAULT_LOG_DIR_NAME),
    }
}

fn probe(config: &CatalogConfig) -> Result<(), dishbook_core::RepoError> {
    let catalog = Catalog::open(config)?;
    let genres = catalog.list_categories(CategoryKind::Restaurant)?;
    let dish_categories = catalog.list_categories(CategoryKind::Dish)?;
    let restaurants = catalog.list_restaurants(RestaurantSortKey::Name)?;

    println!("restaurant_genres={}", genres.len());
    println!("dish_categories={}", dish_categories.len());
    println!("restaurants={}", restaurants.len());
    Ok(())
}
