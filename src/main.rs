use std::path::Path;

use clap::Parser;
use tack::cli::commands::Cli;
use tack::cli::handlers::{self, Context};
use tack::io::config_io::{read_config, resolve_data_dir};
use tack::io::logging::{flush_logs, init_logging, log_dir};

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("event=command status=error error={}", e);
            eprintln!("error: {}", e);
            1
        }
    };
    flush_logs();
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref().map(Path::new));
    let config = read_config(&data_dir)?;
    init_logging(&config.log.level, &log_dir(&data_dir))?;

    match cli.command {
        // No subcommand: launch the TUI
        None => tack::tui::run(&data_dir, config),
        Some(command) => {
            let ctx = Context {
                data_dir,
                config,
                json: cli.json,
            };
            handlers::dispatch(command, &ctx)
        }
    }
}
