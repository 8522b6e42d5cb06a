use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod effects;
mod keymap;
mod logging;
mod ui;

#[derive(Parser)]
#[command(name = "pomocycle", version, about = "Pomodoro timer for the terminal")]
struct Cli {
    /// Directory holding settings.toml and the log file
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the timer (default)
    Run,
    /// Settings file management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn config_dir(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(pomocycle_core::settings::store::default_dir()?),
    }
}

fn main() {
    let cli = Cli::parse();
    let result = config_dir(&cli).and_then(|dir| match cli.command {
        None | Some(Commands::Run) => commands::run::run(&dir),
        Some(Commands::Config { action }) => commands::config::run(action, &dir),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
