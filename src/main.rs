use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::path::PathBuf;

use shopping_list::config::Config;
use shopping_list::storage::{FileStore, ItemStore};
use shopping_list::ui::{classic, tui_app, LineDialogs, TerminalDialogs};
use shopping_list::utils::app_paths::AppPaths;
use shopping_list::utils::{dual_logging, logging};
use shopping_list::ListManager;

fn print_usage() {
    println!("{}", "Shopping List".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  shopping-list [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}  - Use the line-oriented interface", "--classic".green());
    println!("  {} - Store the list in this file", "--storage <path>".green());
    println!(
        "  {} - Write a commented config file and exit",
        "--generate-config".green()
    );
    println!("  {}     - Show this help", "--help".green());
    println!();
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {:?}", parent))?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .with_context(|| format!("writing {:?}", path))?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn open_store(config: &Config, override_path: Option<PathBuf>) -> Result<ItemStore<FileStore>> {
    let path = match override_path.or_else(|| config.storage.path.clone()) {
        Some(path) => path,
        None => AppPaths::storage_file()?,
    };
    let backend = FileStore::new(path).with_quota(config.storage.quota_bytes);
    tracing::info!(target: "storage", "Using storage file {:?}", backend.path());

    Ok(ItemStore::with_key(backend, config.storage.key.clone()))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    if args.iter().any(|a| a == "--generate-config") {
        return generate_config();
    }

    let log_buffer = logging::init_tracing_with_dual_logging();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Could not load config ({}), using defaults", e);
        Config::default()
    });

    let storage_override = args
        .iter()
        .position(|arg| arg == "--storage")
        .and_then(|pos| args.get(pos + 1))
        .map(PathBuf::from);
    let store = open_store(&config, storage_override)?;

    if args.iter().any(|a| a == "--classic") {
        let manager = ListManager::new(store, LineDialogs);
        return classic::run_classic(manager);
    }

    let manager = ListManager::new(store, TerminalDialogs::new());
    let result = tui_app::run_tui_app(manager, config, Some(log_buffer));

    if let Some(logger) = dual_logging::get_dual_logger() {
        logger.flush();
        if result.is_err() {
            eprintln!("Logs: {}", logger.log_path().display());
        }
    }

    result
}
