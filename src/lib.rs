pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::SiteConfig;

pub use crate::adapters::{FragmentWriter, HttpFetcher, MemoryDocument, StaticDirFetcher};
pub use crate::core::{
    encode::{escape_html, validate_url, SafeText, SafeUrl, UrlValidator},
    loader::{JsonLoader, LoadError},
    renderer::CardRenderer,
    site::SiteRenderer,
    template::Markup,
};
pub use crate::utils::error::{RenderError, Result};
