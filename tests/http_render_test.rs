use httpmock::prelude::*;
use std::time::Duration;
use vibing_render::adapters::http::DEFAULT_USER_AGENT;
use vibing_render::core::renderer::{NEWS_FALLBACK, NEWS_RESOURCE, PROJECTS_RESOURCE};
use vibing_render::domain::model::LoadErrorKind;
use vibing_render::domain::ports::RenderOutcome;
use vibing_render::{CardRenderer, HttpFetcher, JsonLoader, MemoryDocument, SiteConfig, SiteRenderer};

fn renderer_for(server: &MockServer, doc: &MemoryDocument) -> CardRenderer<HttpFetcher, MemoryDocument> {
    let fetcher =
        HttpFetcher::new(&server.base_url(), Duration::from_secs(5), DEFAULT_USER_AGENT).unwrap();
    CardRenderer::new(JsonLoader::new(fetcher), doc.clone())
}

#[tokio::test]
async fn test_projects_from_http_preserve_order_and_escape() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(PROJECTS_RESOURCE);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "projects": [
                    {
                        "name": "B <b>project</b>",
                        "description": "Second & last",
                        "url": "https://github.com/someone/b",
                        "stars": "12",
                        "topics": ["rust"]
                    },
                    {
                        "name": "A project",
                        "description": "First",
                        "url": "javascript:evil()"
                    }
                ]
            }));
    });

    let doc = MemoryDocument::with_mounts(&["projects-container"]);
    let outcome = renderer_for(&server, &doc).load_projects("projects-container").await;

    api_mock.assert();
    assert_eq!(outcome, RenderOutcome::Rendered { records: 2 });

    let html = doc.content("projects-container").unwrap();
    assert!(html.find("B &lt;b&gt;project&lt;/b&gt;").unwrap() < html.find("A project").unwrap());
    assert!(html.contains("Second &amp; last"));
    assert!(html.contains("href=\"https://github.com/someone/b\""));
    assert!(html.contains("href=\"#\""));
    assert!(!html.contains("javascript:"));
    assert_eq!(html.matches("class=\"badge\"").count(), 1);
    assert_eq!(doc.write_count("projects-container"), 1);
}

#[tokio::test]
async fn test_news_server_error_shows_fallback() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(NEWS_RESOURCE);
        then.status(500);
    });

    let doc = MemoryDocument::with_mounts(&["news-container"]);
    let outcome = renderer_for(&server, &doc).load_news("news-container").await;

    api_mock.assert();
    assert_eq!(
        outcome,
        RenderOutcome::Fallback {
            kind: LoadErrorKind::Status
        }
    );
    assert_eq!(doc.content("news-container").unwrap(), NEWS_FALLBACK);
}

#[tokio::test]
async fn test_invalid_json_body_shows_fallback() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(NEWS_RESOURCE);
        then.status(200).body("{not json");
    });

    let doc = MemoryDocument::with_mounts(&["news-container"]);
    let outcome = renderer_for(&server, &doc).load_news("news-container").await;

    api_mock.assert();
    assert_eq!(
        outcome,
        RenderOutcome::Fallback {
            kind: LoadErrorKind::Parse
        }
    );
    assert_eq!(doc.content("news-container").unwrap(), "<p>Failed to load news.</p>");
}

#[tokio::test]
async fn test_loader_returns_none_for_http_500_and_bad_json() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/broken.json");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/garbled.json");
        then.status(200).body("{not json");
    });
    server.mock(|when, then| {
        when.method(GET).path("/ok.json");
        then.status(200).body(r#"{"ok": true}"#);
    });

    let fetcher =
        HttpFetcher::new(&server.base_url(), Duration::from_secs(5), DEFAULT_USER_AGENT).unwrap();
    let loader = JsonLoader::new(fetcher);

    assert!(loader.load("/broken.json").await.is_none());
    assert!(loader.load("/garbled.json").await.is_none());
    assert_eq!(loader.load("/ok.json").await.unwrap()["ok"], true);
}

#[tokio::test]
async fn test_missing_mount_skips_fetch() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(PROJECTS_RESOURCE);
        then.status(200).json_body(serde_json::json!({"projects": []}));
    });

    let doc = MemoryDocument::with_mounts(&["news-container"]);
    let outcome = renderer_for(&server, &doc).load_projects("projects-container").await;

    assert_eq!(outcome, RenderOutcome::MissingMount);
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_site_renderer_runs_both_panels() {
    let server = MockServer::start();
    let projects_mock = server.mock(|when, then| {
        when.method(GET).path(PROJECTS_RESOURCE);
        then.status(200).json_body(serde_json::json!({
            "projects": [{"name": "Only", "description": "one"}]
        }));
    });
    let news_mock = server.mock(|when, then| {
        when.method(GET).path(NEWS_RESOURCE);
        then.status(200).json_body(serde_json::json!({
            "articles": [
                {"title": "Launch", "date": "2025-03-01", "summary": "We shipped", "link": "/news/launch"}
            ]
        }));
    });

    let mut config = SiteConfig::default();
    config.site.base_url = Some(server.base_url());
    let doc = MemoryDocument::with_mounts(&["projects-container", "news-container"]);

    let reports = SiteRenderer::from_config(&config, renderer_for(&server, &doc))
        .render_all()
        .await;

    projects_mock.assert();
    news_mock.assert();
    assert!(reports.iter().all(|r| r.outcome.is_rendered()));
    assert!(doc.content("projects-container").unwrap().contains("Only"));
    let news = doc.content("news-container").unwrap();
    assert!(news.contains("<a href=\"/news/launch\""));
    assert!(news.contains("2025-03-01"));
}
