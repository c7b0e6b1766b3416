use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::config::HeroConfig;
use crate::paths::AppPaths;

pub fn initialise_tracing(default_level: Option<&str>) {
    let fallback = default_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the configuration for this invocation: file first, then flags.
pub fn load_config(paths: &AppPaths, args: &RunArgs) -> Result<HeroConfig> {
    let mut config = HeroConfig::resolve(args.config.as_deref(), &paths.config_file())?;
    config.apply_overrides(args);
    Ok(config)
}

pub fn run(args: RunArgs) -> Result<()> {
    let paths = AppPaths::discover()?;
    let config = load_config(&paths, &args)?;
    let options = config.window_options();
    tracing::debug!(
        config_dir = %paths.config_dir().display(),
        width = options.size.width,
        height = options.size.height,
        transparent = options.transparent,
        power = ?options.gpu.power,
        present_mode = ?options.gpu.present_mode,
        "resolved hero configuration"
    );

    gridglow::run_window(options)
}
