use crate::domain::ports::{FetchResponse, Fetcher};
use crate::utils::error::{RenderError, Result};
use std::path::{Component, Path, PathBuf};

/// Serves site-root-relative resource paths out of a local static-site tree.
///
/// Missing files answer 404 and paths escaping the root answer 403, the way
/// a static file server would.
#[derive(Debug, Clone)]
pub struct StaticDirFetcher {
    root: PathBuf,
}

impl StaticDirFetcher {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// `None` when the path leaves the root.
    fn local_path(&self, resource: &str) -> Option<PathBuf> {
        let path = resource
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_start_matches('/');

        let mut full = self.root.clone();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => full.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(full)
    }
}

impl Fetcher for StaticDirFetcher {
    async fn fetch(&self, resource: &str) -> Result<FetchResponse> {
        let Some(path) = self.local_path(resource) else {
            tracing::warn!("Refusing to serve path outside static root: {}", resource);
            return Ok(FetchResponse {
                status: 403,
                body: Vec::new(),
            });
        };

        tracing::debug!("Reading static resource: {}", path.display());
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FetchResponse { status: 200, body }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FetchResponse {
                status: 404,
                body: Vec::new(),
            }),
            Err(e) => Err(RenderError::IoError(e)),
        }
    }
}

/// Writes each rendered container to `<base>/<container-id>.html`.
#[derive(Debug, Clone)]
pub struct FragmentWriter {
    base_path: PathBuf,
}

impl FragmentWriter {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub async fn write_fragment(&self, container_id: &str, content: &str) -> Result<PathBuf> {
        if container_id.is_empty()
            || container_id.contains(['/', '\\'])
            || container_id.starts_with('.')
        {
            return Err(RenderError::OutputError {
                message: format!("container id '{}' is not a valid file name", container_id),
            });
        }

        tokio::fs::create_dir_all(&self.base_path).await?;
        let full_path = self.base_path.join(format!("{}.html", container_id));
        tokio::fs::write(&full_path, content).await?;
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_static_dir_serves_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("vibing/data")).unwrap();
        std::fs::write(dir.path().join("vibing/data/news.json"), r#"{"articles":[]}"#).unwrap();

        let fetcher = StaticDirFetcher::new(dir.path());
        let response = fetcher.fetch("/vibing/data/news.json?v=2").await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"articles":[]}"#);
    }

    #[tokio::test]
    async fn test_static_dir_missing_file_is_404() {
        let dir = TempDir::new().unwrap();
        let fetcher = StaticDirFetcher::new(dir.path());
        let response = fetcher.fetch("/nope.json").await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_static_dir_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let fetcher = StaticDirFetcher::new(dir.path().join("public"));
        let response = fetcher.fetch("/../secret.json").await.unwrap();
        assert_eq!(response.status, 403);
    }

    #[tokio::test]
    async fn test_fragment_writer_creates_file() {
        let dir = TempDir::new().unwrap();
        let writer = FragmentWriter::new(dir.path().join("out"));

        let path = writer
            .write_fragment("news-container", "<p>hi</p>")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("out/news-container.html"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_fragment_writer_rejects_path_like_ids() {
        let writer = FragmentWriter::new("unused");
        assert!(writer.write_fragment("../x", "").await.is_err());
        assert!(writer.write_fragment("", "").await.is_err());
    }
}
