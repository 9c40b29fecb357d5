use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entry of `projects.json`.
///
/// Extra keys the offline updater writes (`npmPackage`, `npmDownloads`)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "truthy_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub stars: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub topics: Option<Vec<String>>,
}

/// One entry of `news.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(default, deserialize_with = "truthy_text")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsDocument {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDocument {
    pub articles: Vec<Article>,
}

/// Why a collection failed to load. Only ever shows up in logs and
/// [`RenderOutcome`](crate::domain::ports::RenderOutcome); the page sees the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    Transport,
    Status,
    Parse,
    Shape,
}

impl std::fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LoadErrorKind::Transport => "transport",
            LoadErrorKind::Status => "status",
            LoadErrorKind::Parse => "parse",
            LoadErrorKind::Shape => "shape",
        };
        f.write_str(name)
    }
}

/// The card collections the site knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Projects,
    News,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Projects => "projects",
            WidgetKind::News => "news",
        }
    }
}

impl std::str::FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "projects" => Ok(WidgetKind::Projects),
            "news" => Ok(WidgetKind::News),
            other => Err(format!("unknown widget '{}' (expected projects or news)", other)),
        }
    }
}

/// Scalars become text, `null` becomes empty. Arrays and objects are a shape error.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

// `null` means no topics; each element goes through the same scalar conversion.
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<Value>>::deserialize(deserializer)? {
        Some(items) => items
            .into_iter()
            .map(scalar_text)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(de::Error::custom),
        None => Ok(None),
    }
}

fn scalar_text(value: Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(number_text(&n)),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!(
            "expected a text value, found {}",
            json_type_name(&other)
        )),
    }
}

/// Integral floats print without a fraction (`1000.0` -> `1000`), as in JS.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            return f.to_string();
        }
    }
    n.to_string()
}

// Falsy values (null, "", 0, false) mean "absent" so the optional block is omitted.
fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(number_text(&n)),
        Value::Bool(true) => Some("true".to_string()),
        Value::Null | Value::String(_) | Value::Number(_) | Value::Bool(false) => None,
        other => {
            return Err(de::Error::custom(format!(
                "expected a text value, found {}",
                json_type_name(&other)
            )))
        }
    };
    Ok(text)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
