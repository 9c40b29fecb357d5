pub mod toml_config;

pub use toml_config::{SiteConfig, WidgetSpec};

#[cfg(feature = "cli")]
use crate::domain::model::WidgetKind;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "vibing-render")]
#[command(about = "Render the site's project and news cards from their JSON data")]
pub struct CliConfig {
    /// TOML configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Deployed site root to fetch data from
    #[arg(long, conflicts_with = "static_dir")]
    pub base_url: Option<String>,

    /// Local static-site directory to read data from
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Origin used to resolve relative links during validation
    #[arg(long)]
    pub origin: Option<String>,

    /// Write <container>.html fragments here instead of printing
    #[arg(short, long)]
    pub output: Option<String>,

    /// Widgets to render (projects,news)
    #[arg(long, value_delimiter = ',')]
    pub widgets: Vec<WidgetKind>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Exit non-zero when any widget fell back
    #[arg(long)]
    pub strict: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// File settings (if any) with command line overrides applied.
    pub fn resolve(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.site.base_url = Some(base_url.clone());
            config.site.static_dir = None;
        }
        if let Some(dir) = &self.static_dir {
            config.site.static_dir = Some(dir.clone());
            config.site.base_url = None;
        }
        if let Some(origin) = &self.origin {
            config.site.origin = origin.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.fetch.timeout_seconds = timeout;
        }
        if !self.widgets.is_empty() {
            config.select_widgets(&self.widgets);
        }

        Ok(config)
    }
}
