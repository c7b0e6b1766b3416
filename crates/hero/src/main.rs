mod cli;
mod config;
mod paths;
mod run;

use anyhow::Result;
use cli::{Command, ConfigAction, RunArgs};
use paths::AppPaths;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing(cli.run.log_level.as_deref());

    match cli.command {
        Some(Command::Config(config_cmd)) => handle_config_command(config_cmd.action, &cli.run),
        None => run::run(cli.run),
    }
}

fn handle_config_command(action: ConfigAction, args: &RunArgs) -> Result<()> {
    let paths = AppPaths::discover()?;

    match action {
        ConfigAction::Show => {
            let config = run::load_config(&paths, args)?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Where => {
            let file = args.config.clone().unwrap_or_else(|| paths.config_file());
            println!("Configuration:");
            println!("  dir:    {}", paths.config_dir().display());
            println!("  file:   {}", file.display());
            println!("  exists: {}", file.is_file());
        }
    }
    Ok(())
}
