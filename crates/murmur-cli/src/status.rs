//! `murmur status` — show configuration.

use anyhow::Result;
use colored::Colorize;

use murmur_core::config::load_config;
use murmur_core::utils::get_data_path;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_data_path().join("config.json");

    println!();
    println!("{}", "Murmur Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<12} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Backend
    println!("  {:<12} {}", "Host:".bold(), config.chat.host);
    println!("  {:<12} {}", "Model:".bold(), config.chat.model);
    println!(
        "  {:<12} {}",
        "Streaming:".bold(),
        if config.chat.stream {
            "on".to_string()
        } else {
            "off".dimmed().to_string()
        }
    );

    // Persona
    let persona = match &config.chat.system_prompt {
        Some(prompt) => {
            let mut line: String = prompt.chars().take(60).collect();
            if prompt.chars().count() > 60 {
                line.push_str("...");
            }
            line
        }
        None => "· not set".dimmed().to_string(),
    };
    println!("  {:<12} {}", "Persona:".bold(), persona);

    println!();

    Ok(())
}
