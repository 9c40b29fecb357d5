use crate::domain::ports::{FetchResponse, Fetcher};
use crate::utils::error::{RenderError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("vibing-render/", env!("CARGO_PKG_VERSION"));

/// Fetches resources from a deployed site. Resource paths are resolved
/// against `base_url`; absolute URLs are used as given.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| RenderError::InvalidConfigValueError {
            field: "site.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        Ok(Self { client, base_url })
    }

    pub fn resolve(&self, resource: &str) -> Result<Url> {
        self.base_url
            .join(resource)
            .map_err(|e| RenderError::ConfigError {
                message: format!("cannot resolve {} against {}: {}", resource, self.base_url, e),
            })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, resource: &str) -> Result<FetchResponse> {
        let url = self.resolve(resource)?;
        tracing::debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        tracing::debug!("Response status: {}", status);

        let body = response.bytes().await?.to_vec();
        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn fetcher(base: &str) -> HttpFetcher {
        HttpFetcher::new(base, Duration::from_secs(5), DEFAULT_USER_AGENT).unwrap()
    }

    #[test]
    fn test_resolve_site_root_relative_path() {
        let f = fetcher("https://example.com/some/page.html");
        assert_eq!(
            f.resolve("/vibing/data/news.json").unwrap().as_str(),
            "https://example.com/vibing/data/news.json"
        );
        assert_eq!(
            f.resolve("https://cdn.example/x.json").unwrap().as_str(),
            "https://cdn.example/x.json"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = HttpFetcher::new("not a url", Duration::from_secs(5), DEFAULT_USER_AGENT)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_fetch_returns_non_success_status_as_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/data.json");
            then.status(500).body("oops");
        });

        let response = fetcher(&server.base_url()).fetch("/data.json").await.unwrap();

        api_mock.assert();
        assert_eq!(response.status, 500);
        assert!(!response.is_success());
        assert_eq!(response.body, b"oops");
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/data.json")
                .header("user-agent", "vibing-test");
            then.status(200).body("{}");
        });

        let f = HttpFetcher::new(&server.base_url(), Duration::from_secs(5), "vibing-test").unwrap();
        let response = f.fetch("/data.json").await.unwrap();

        api_mock.assert();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_err() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let f = fetcher(&format!("http://127.0.0.1:{}", port));
        assert!(f.fetch("/data.json").await.is_err());
    }
}
