// CLI module - command-line argument parsing and handlers
//
// Provides subcommands for configuration management:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --path: Show config file path

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::process::Command;

/// postdesk - terminal client for a posts/comments API
#[derive(Parser)]
#[command(name = "postdesk")]
#[command(version = VERSION)]
#[command(about = "Browse posts and manage their comments from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else {
                // No flag provided, show help
                println!("Usage: postdesk config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("Could not determine config path"),
    }
}

fn handle_config_show() {
    let config = Config::from_env();
    println!("# Effective configuration (file + env overrides)");
    println!();
    print!("{}", config.to_toml());
}

fn handle_config_reset() {
    let config = Config::default();
    match config.save() {
        Ok(()) => {
            if let Some(path) = Config::config_path() {
                println!("Config reset to defaults: {}", path.display());
            }
        }
        Err(e) => eprintln!("Failed to reset config: {}", e),
    }
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Could not determine config path");
        return;
    };

    // Make sure there is a file to edit
    Config::ensure_config_exists();

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    match Command::new(&editor).arg(&path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => eprintln!("{} exited with {}", editor, status),
        Err(e) => eprintln!("Failed to launch {}: {}", editor, e),
    }
}
