use crate::core::template::Markup;
use crate::domain::model::LoadErrorKind;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Raw response from a [`Fetcher`]. Status handling is left to the caller.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves a resource by site-root-relative path or absolute URL.
///
/// An `Err` means the request never produced a response (DNS, connect,
/// timeout, unreadable file). Non-2xx responses are returned as `Ok`.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        resource: &str,
    ) -> impl std::future::Future<Output = Result<FetchResponse>> + Send;
}

/// A page that can hand out mount points by element id.
pub trait RenderTarget: Send + Sync {
    type Mount: MountPoint;

    fn find_by_id(&self, id: &str) -> Option<Self::Mount>;
}

/// A single element whose content gets replaced wholesale.
pub trait MountPoint: Send {
    fn set_content(&self, markup: Markup);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { records: usize },
    Fallback { kind: LoadErrorKind },
    MissingMount,
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered { .. })
    }
}

#[async_trait]
pub trait Widget: Send + Sync {
    fn name(&self) -> &str;
    fn container_id(&self) -> &str;
    async fn render(&self) -> RenderOutcome;
}
