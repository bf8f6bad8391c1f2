//! Show or initialize the configuration file.

use std::path::Path;

use clap::Args;
use filtra_config::AnalyzerConfig;

use super::common;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration if no file exists yet
    #[arg(long)]
    init: bool,
}

pub fn run(args: ConfigArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let path = config.map_or_else(filtra_config::config_path, Path::to_path_buf);

    if args.init {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        AnalyzerConfig::default().save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let effective = common::load_config(Some(&path))?;
    println!("# {}", path.display());
    print!("{}", effective.to_toml()?);
    Ok(())
}
