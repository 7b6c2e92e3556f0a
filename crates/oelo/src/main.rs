mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Offline commands
        Command::Config(args) => commands::config_cmd::handle(args.command, &global),
        Command::Effects => {
            commands::effects::handle(&global);
            Ok(())
        }
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "oelo", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the controller
        Command::Probe => {
            let config = commands::util::coordinator_config(&global)?;
            commands::probe::handle(config, &global).await
        }
        Command::Status(args) => {
            let config = commands::util::coordinator_config(&global)?;
            commands::status::handle(config, args, &global).await
        }
        Command::Set(args) => {
            let config = commands::util::coordinator_config(&global)?;
            commands::set::handle(config, args, &global).await
        }
        Command::Watch(args) => {
            let config = commands::util::coordinator_config(&global)?;
            commands::watch::handle(config, args, &global).await
        }
    }
}
