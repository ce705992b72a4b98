//! Configuration view and validation commands: `henhouse config`.

use anyhow::Result;

use henhouse::config::{Config, HenhouseToml, get_henhouse_dir};

use super::super::ConfigCommands;

pub fn cmd_config(config: &Config, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = &config.config_file;

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Henhouse Configuration");
            println!("======================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
                println!();

                let toml = HenhouseToml::load(config_path)?;
                println!("[api]");
                if let Some(url) = &toml.api.base_url {
                    println!("  base_url = \"{}\"", url);
                }
                println!();
                println!("[logging]");
                println!("  level = \"{}\"", toml.logging.level);
                println!();
            } else {
                println!("No henhouse.toml found at {}", config_path.display());
                println!();
                println!("Using default configuration.");
                println!("Run 'henhouse config init' to create a henhouse.toml file.");
                println!();
            }

            println!("Effective values (with env/CLI overrides):");
            println!(
                "  api_url = \"{}\" (from {})",
                config.api_url, config.api_url_source
            );
            println!("  log_level = \"{}\"", config.log_level);
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No henhouse.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = HenhouseToml::load(config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("henhouse.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            let henhouse_dir = get_henhouse_dir(&config.project_dir);
            if !henhouse_dir.exists() {
                std::fs::create_dir_all(&henhouse_dir)?;
            }

            HenhouseToml::starter().save(config_path)?;

            println!("Created henhouse.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] base_url");
            println!("  - [logging] level");
            println!();
        }
    }

    Ok(())
}
