use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gridglow::{GpuPowerPreference, PresentMode, SurfaceSize};

#[derive(Parser, Debug)]
#[command(
    name = "hero",
    author,
    version,
    about = "Hero background: cursor-trail glow over a rounded-cell grid",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Configuration file; defaults to `hero.toml` in the config directory.
    #[arg(long, value_name = "FILE", env = "HERO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Initial window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<SurfaceSize>,

    /// Window title.
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Adapter preference: `low` (integrated) or `high` (discrete).
    #[arg(long, value_name = "POWER", value_parser = parse_gpu_power)]
    pub gpu_power: Option<GpuPowerPreference>,

    /// Swapchain pacing: `auto`, `fifo`, `mailbox`, or `immediate`.
    #[arg(long, value_name = "MODE", value_parser = parse_present_mode)]
    pub present_mode: Option<PresentMode>,

    /// Default log filter when `RUST_LOG` is unset (e.g. `debug`, `gridglow=trace`).
    #[arg(long, value_name = "FILTER", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect the resolved configuration.
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (file merged with flags) as TOML.
    Show,
    /// Print the configuration file path that would be loaded.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_size(value: &str) -> Result<SurfaceSize, String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid size '{trimmed}'; expected WIDTHxHEIGHT"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in '{trimmed}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in '{trimmed}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("size '{trimmed}' must be non-zero in both dimensions"));
    }
    Ok(SurfaceSize::new(width, height))
}

pub fn parse_gpu_power(value: &str) -> Result<GpuPowerPreference, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("gpu power preference must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "low" | "low-power" | "integrated" => Ok(GpuPowerPreference::Low),
        "high" | "high-performance" | "discrete" => Ok(GpuPowerPreference::High),
        other => Err(format!(
            "unknown gpu power preference '{other}'; expected low or high"
        )),
    }
}

pub fn parse_present_mode(value: &str) -> Result<PresentMode, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("present mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "auto" => Ok(PresentMode::Auto),
        "fifo" | "vsync" => Ok(PresentMode::Fifo),
        "mailbox" => Ok(PresentMode::Mailbox),
        "immediate" => Ok(PresentMode::Immediate),
        other => Err(format!(
            "unknown present mode '{other}'; expected auto, fifo, mailbox, or immediate"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_variants() {
        assert_eq!(parse_size("1280x720").unwrap(), SurfaceSize::new(1280, 720));
        assert_eq!(parse_size(" 640X480 ").unwrap(), SurfaceSize::new(640, 480));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x720").is_err());
        assert!(parse_size("wide x tall").is_err());
    }

    #[test]
    fn parses_gpu_power_case_insensitively() {
        assert_eq!(parse_gpu_power("HIGH").unwrap(), GpuPowerPreference::High);
        assert_eq!(parse_gpu_power("low").unwrap(), GpuPowerPreference::Low);
        assert!(parse_gpu_power("").is_err());
        assert!(parse_gpu_power("medium").is_err());
    }

    #[test]
    fn parses_present_modes() {
        assert_eq!(parse_present_mode("auto").unwrap(), PresentMode::Auto);
        assert_eq!(parse_present_mode("vsync").unwrap(), PresentMode::Fifo);
        assert_eq!(parse_present_mode("Mailbox").unwrap(), PresentMode::Mailbox);
        assert!(parse_present_mode("adaptive").is_err());
    }

    #[test]
    fn subcommand_accepts_global_config_flag() {
        let cli = Cli::try_parse_from(["hero", "config", "show", "--config", "custom.toml"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand {
                action: ConfigAction::Show
            }))
        ));
        assert_eq!(cli.run.config, Some(PathBuf::from("custom.toml")));
    }
}
