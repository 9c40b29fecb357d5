use crate::core::encode::DEFAULT_ORIGIN;
use crate::core::renderer::{NEWS_RESOURCE, PROJECTS_RESOURCE};
use crate::domain::model::WidgetKind;
use crate::utils::error::{RenderError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

static ENV_VAR: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\$\{([^}]+)\}").expect("env pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub fetch: FetchSection,
    #[serde(default)]
    pub widgets: WidgetsSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    /// Deployed site root, e.g. `https://example.github.io`.
    pub base_url: Option<String>,
    /// Local static tree to read resources from instead of the network.
    pub static_dir: Option<String>,
    /// Origin relative links are resolved against during link validation.
    #[serde(default = "default_origin")]
    pub origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSection {
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetsSection {
    #[serde(default)]
    pub projects: WidgetSection,
    #[serde(default)]
    pub news: WidgetSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetSection {
    pub enabled: Option<bool>,
    pub resource: Option<String>,
    pub container: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// Directory for `<container>.html` fragments; stdout when unset.
    pub path: Option<String>,
}

/// A widget with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSpec {
    pub kind: WidgetKind,
    pub resource: String,
    pub container: String,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    crate::adapters::http::DEFAULT_USER_AGENT.to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: None,
            static_dir: None,
            origin: default_origin(),
        }
    }
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl SiteConfig {
    /// Load from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RenderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RenderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn widget_section(&self, kind: WidgetKind) -> &WidgetSection {
        match kind {
            WidgetKind::Projects => &self.widgets.projects,
            WidgetKind::News => &self.widgets.news,
        }
    }

    pub fn widget_spec(&self, kind: WidgetKind) -> WidgetSpec {
        let section = self.widget_section(kind);
        let (resource, container) = match kind {
            WidgetKind::Projects => (PROJECTS_RESOURCE, "projects-container"),
            WidgetKind::News => (NEWS_RESOURCE, "news-container"),
        };
        WidgetSpec {
            kind,
            resource: section
                .resource
                .clone()
                .unwrap_or_else(|| resource.to_string()),
            container: section
                .container
                .clone()
                .unwrap_or_else(|| container.to_string()),
        }
    }

    /// Enabled widgets, projects first.
    pub fn enabled_widgets(&self) -> Vec<WidgetSpec> {
        [WidgetKind::Projects, WidgetKind::News]
            .into_iter()
            .filter(|kind| self.widget_section(*kind).enabled.unwrap_or(true))
            .map(|kind| self.widget_spec(kind))
            .collect()
    }

    /// Enables exactly the given widgets.
    pub fn select_widgets(&mut self, kinds: &[WidgetKind]) {
        self.widgets.projects.enabled = Some(kinds.contains(&WidgetKind::Projects));
        self.widgets.news.enabled = Some(kinds.contains(&WidgetKind::News));
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.fetch.timeout_seconds)
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.site.base_url, &self.site.static_dir) {
            (None, None) => {
                return Err(RenderError::MissingConfigError {
                    field: "site.base_url or site.static_dir".to_string(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(RenderError::ConfigError {
                    message: "set only one of site.base_url and site.static_dir".to_string(),
                })
            }
            (Some(base_url), None) => validation::validate_url("site.base_url", base_url)?,
            (None, Some(dir)) => validation::validate_path("site.static_dir", dir)?,
        }

        validation::validate_url("site.origin", &self.site.origin)?;
        validation::validate_range("fetch.timeout_seconds", self.fetch.timeout_seconds, 1, 300)?;
        validation::validate_non_empty_string("fetch.user_agent", &self.fetch.user_agent)?;

        let widgets = self.enabled_widgets();
        if widgets.is_empty() {
            return Err(RenderError::ConfigError {
                message: "no widgets enabled".to_string(),
            });
        }
        for spec in &widgets {
            let name = spec.kind.name();
            validation::validate_non_empty_string(
                &format!("widgets.{}.resource", name),
                &spec.resource,
            )?;
            validation::validate_element_id(&format!("widgets.{}.container", name), &spec.container)?;
        }
        if widgets.len() > 1 && widgets[0].container == widgets[1].container {
            return Err(RenderError::ConfigError {
                message: format!("widgets share container '{}'", widgets[0].container),
            });
        }

        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
