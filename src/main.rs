use clap::Parser;
use dragknife::{init_logging, resolve_log_level, run, Cli, BUILD_DATE, VERSION};
use dragknife_settings::Config;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    // Initialize logging
    init_logging(resolve_log_level(&cli, &config)?)?;

    info!("dragknife {} (built {})", VERSION, BUILD_DATE);
    run(&cli, &config)?;
    Ok(())
}
