//! `murmur onboard` — initialize configuration.
//!
//! Creates `~/.murmur/config.json` with defaults and the history directory.

use anyhow::Result;
use colored::Colorize;

use murmur_core::config::{load_config, save_config};
use murmur_core::utils::{get_data_path, get_history_path};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "Murmur — Setup".cyan().bold());
    println!();

    let data_dir = get_data_path();
    let config_path = data_dir.join("config.json");

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults + env
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. Create history directory
    let history_dir = get_history_path();
    std::fs::create_dir_all(&history_dir)?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    println!();
    println!(
        "{}",
        "  Setup complete! Run `murmur chat` to start chatting.".green()
    );
    println!(
        "{}",
        "  Murmur talks to a local Ollama server (http://localhost:11434).".dimmed()
    );
    println!();

    Ok(())
}
