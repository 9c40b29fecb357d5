use crate::core::encode::{escape_html, UrlValidator};
use crate::core::loader::JsonLoader;
use crate::core::template::Markup;
use crate::domain::model::{Article, NewsDocument, Project, ProjectsDocument};
use crate::domain::ports::{Fetcher, MountPoint, RenderOutcome, RenderTarget};
use serde::de::DeserializeOwned;

pub const PROJECTS_RESOURCE: &str = "/vibing/data/projects.json";
pub const NEWS_RESOURCE: &str = "/vibing/data/news.json";

pub const PROJECTS_FALLBACK: &str = "<p>Failed to load projects.</p>";
pub const NEWS_FALLBACK: &str = "<p>Failed to load news.</p>";

/// Renders card collections into mount points of a [`RenderTarget`].
///
/// Each call resolves its container before fetching, writes exactly once,
/// and never returns an error: failures end up as the fallback message.
pub struct CardRenderer<F: Fetcher, T: RenderTarget> {
    loader: JsonLoader<F>,
    target: T,
    urls: UrlValidator,
}

impl<F: Fetcher, T: RenderTarget> CardRenderer<F, T> {
    pub fn new(loader: JsonLoader<F>, target: T) -> Self {
        Self {
            loader,
            target,
            urls: UrlValidator::default(),
        }
    }

    pub fn with_url_validator(mut self, urls: UrlValidator) -> Self {
        self.urls = urls;
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub async fn load_projects(&self, container_id: &str) -> RenderOutcome {
        self.load_projects_from(container_id, PROJECTS_RESOURCE).await
    }

    pub async fn load_projects_from(&self, container_id: &str, resource: &str) -> RenderOutcome {
        self.render_collection(
            container_id,
            resource,
            PROJECTS_FALLBACK,
            |doc: ProjectsDocument, urls: &UrlValidator| {
                (doc.projects.len(), render_projects(&doc.projects, urls))
            },
        )
        .await
    }

    pub async fn load_news(&self, container_id: &str) -> RenderOutcome {
        self.load_news_from(container_id, NEWS_RESOURCE).await
    }

    pub async fn load_news_from(&self, container_id: &str, resource: &str) -> RenderOutcome {
        self.render_collection(
            container_id,
            resource,
            NEWS_FALLBACK,
            |doc: NewsDocument, urls: &UrlValidator| {
                (doc.articles.len(), render_news(&doc.articles, urls))
            },
        )
        .await
    }

    async fn render_collection<D, R>(
        &self,
        container_id: &str,
        resource: &str,
        fallback: &'static str,
        render: R,
    ) -> RenderOutcome
    where
        D: DeserializeOwned + Send,
        R: FnOnce(D, &UrlValidator) -> (usize, Markup) + Send,
    {
        let Some(mount) = self.target.find_by_id(container_id) else {
            tracing::error!(container = container_id, "Container {} not found", container_id);
            return RenderOutcome::MissingMount;
        };

        match self.loader.try_load_as::<D>(resource).await {
            Ok(document) => {
                let (records, markup) = render(document, &self.urls);
                tracing::debug!(container = container_id, records, "Rendered cards");
                mount.set_content(markup);
                RenderOutcome::Rendered { records }
            }
            Err(e) => {
                tracing::error!(
                    container = container_id,
                    url = resource,
                    kind = %e.kind(),
                    "Failed to load data: {}",
                    e
                );
                mount.set_content(Markup::literal(fallback));
                RenderOutcome::Fallback { kind: e.kind() }
            }
        }
    }
}

pub fn render_projects(projects: &[Project], urls: &UrlValidator) -> Markup {
    Markup::join(projects.iter().map(|p| project_card(p, urls)), "")
}

pub fn render_news(articles: &[Article], urls: &UrlValidator) -> Markup {
    Markup::join(articles.iter().map(|a| article_card(a, urls)), "")
}

fn project_card(project: &Project, urls: &UrlValidator) -> Markup {
    let stars = project.stars.as_deref().map(|stars| {
        Markup::literal("    <p class=\"text-muted\">\u{2b50} ")
            .text(&escape_html(stars))
            .lit(" stars</p>\n")
    });

    Markup::literal("<div class=\"card\">\n  <div class=\"card-header\">\n    <h3 class=\"card-title\">")
        .text(&escape_html(&project.name))
        .lit("</h3>\n  </div>\n  <div class=\"card-body\">\n    <p>")
        .text(&escape_html(&project.description))
        .lit("</p>\n")
        .optional(stars)
        .optional(topic_badges(project.topics.as_deref()))
        .lit("  </div>\n  <div class=\"card-footer\">\n    <a href=\"")
        .href(&urls.validate(project.url.as_deref()))
        .lit("\" class=\"btn btn-outline\" target=\"_blank\" rel=\"noopener noreferrer\">View Project</a>\n  </div>\n</div>\n")
}

// An empty list gets no wrapper either.
fn topic_badges(topics: Option<&[String]>) -> Option<Markup> {
    let topics = topics.filter(|t| !t.is_empty())?;
    let badges = topics.iter().map(|topic| {
        Markup::literal("<span class=\"badge\">")
            .text(&escape_html(topic))
            .lit("</span>")
    });
    Some(
        Markup::literal("    <div class=\"mt-2 mb-2\">")
            .markup(Markup::join(badges, " "))
            .lit("</div>\n"),
    )
}

fn article_card(article: &Article, urls: &UrlValidator) -> Markup {
    let link = article.link.as_deref().map(|link| {
        Markup::literal("    <a href=\"")
            .href(&urls.validate(Some(link)))
            .lit("\" class=\"btn btn-outline\" target=\"_blank\" rel=\"noopener noreferrer\">Read More</a>\n")
    });

    Markup::literal("<div class=\"card\">\n  <div class=\"card-header\">\n    <h3 class=\"card-title\">")
        .text(&escape_html(&article.title))
        .lit("</h3>\n    <p class=\"text-muted\">")
        .text(&escape_html(&article.date))
        .lit("</p>\n  </div>\n  <div class=\"card-body\">\n    <p>")
        .text(&escape_html(&article.summary))
        .lit("</p>\n  </div>\n  <div class=\"card-footer\">\n")
        .optional(link)
        .lit("  </div>\n</div>\n")
}
