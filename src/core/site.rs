use crate::config::{SiteConfig, WidgetSpec};
use crate::core::renderer::CardRenderer;
use crate::domain::model::WidgetKind;
use crate::domain::ports::{Fetcher, RenderOutcome, RenderTarget, Widget};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// One configured card panel bound to a shared renderer.
pub struct CardWidget<F: Fetcher, T: RenderTarget> {
    spec: WidgetSpec,
    renderer: Arc<CardRenderer<F, T>>,
}

impl<F: Fetcher, T: RenderTarget> CardWidget<F, T> {
    pub fn new(spec: WidgetSpec, renderer: Arc<CardRenderer<F, T>>) -> Self {
        Self { spec, renderer }
    }
}

#[async_trait]
impl<F, T> Widget for CardWidget<F, T>
where
    F: Fetcher + 'static,
    T: RenderTarget + 'static,
{
    fn name(&self) -> &str {
        self.spec.kind.name()
    }

    fn container_id(&self) -> &str {
        &self.spec.container
    }

    async fn render(&self) -> RenderOutcome {
        match self.spec.kind {
            WidgetKind::Projects => {
                self.renderer
                    .load_projects_from(&self.spec.container, &self.spec.resource)
                    .await
            }
            WidgetKind::News => {
                self.renderer
                    .load_news_from(&self.spec.container, &self.spec.resource)
                    .await
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetReport {
    pub widget: String,
    pub container: String,
    pub outcome: RenderOutcome,
}

/// Runs every widget on a page. Widgets are independent: each owns its
/// container and finishes whenever its own fetch does.
#[derive(Default)]
pub struct SiteRenderer {
    widgets: Vec<Box<dyn Widget>>,
}

impl SiteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config<F, T>(config: &SiteConfig, renderer: CardRenderer<F, T>) -> Self
    where
        F: Fetcher + 'static,
        T: RenderTarget + 'static,
    {
        let renderer = Arc::new(renderer);
        let mut site = Self::new();
        for spec in config.enabled_widgets() {
            site.add_widget(Box::new(CardWidget::new(spec, Arc::clone(&renderer))));
        }
        site
    }

    pub fn add_widget(&mut self, widget: Box<dyn Widget>) {
        self.widgets.push(widget);
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub async fn render_all(&self) -> Vec<WidgetReport> {
        tracing::info!("Rendering {} widget(s)", self.widgets.len());

        let outcomes = join_all(self.widgets.iter().map(|w| w.render())).await;

        self.widgets
            .iter()
            .zip(outcomes)
            .map(|(widget, outcome)| {
                match &outcome {
                    RenderOutcome::Rendered { records } => {
                        tracing::info!("{}: rendered {} card(s)", widget.name(), records)
                    }
                    RenderOutcome::Fallback { kind } => {
                        tracing::warn!("{}: showing fallback ({} failure)", widget.name(), kind)
                    }
                    RenderOutcome::MissingMount => {
                        tracing::warn!("{}: no #{} on page", widget.name(), widget.container_id())
                    }
                }
                WidgetReport {
                    widget: widget.name().to_string(),
                    container: widget.container_id().to_string(),
                    outcome,
                }
            })
            .collect()
    }
}
