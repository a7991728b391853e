use std::path::PathBuf;
use surfconf::core::io::OutputFormat;
use surfconf::engine::config as core_config;

/// Fully resolved settings for one `adsorb` run.
pub struct AppConfig {
    pub core_config: core_config::AdsorptionConfig,
    pub output_prefix: PathBuf,
    pub format: OutputFormat,
    pub potential_params: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}
