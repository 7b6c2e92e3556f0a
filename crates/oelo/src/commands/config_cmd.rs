//! `oelo config`: show, locate or write the configuration file.

use oelo_config::Config;

use crate::cli::{ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(command: ConfigCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        ConfigCommand::Show => {
            let cfg = oelo_config::load_config()?;
            let rendered = match global.output {
                OutputFormat::Table | OutputFormat::Plain => cfg.to_toml()?,
                _ => output::render_single(
                    &global.output,
                    &cfg,
                    |_| String::new(),
                    |_| String::new(),
                ),
            };
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }
        ConfigCommand::Path => {
            output::print_output(&oelo_config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Init {
            address,
            zone_count,
            force,
        } => {
            let path = oelo_config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = Config {
                address: Some(address),
                zone_count,
                ..Config::default()
            };
            // Refuse to write something that would not load back.
            cfg.to_coordinator_config()?;
            oelo_config::save_config_to(&cfg, &path)?;

            if !global.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}
