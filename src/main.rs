use clap::Parser;
use vibing_render::core::site::WidgetReport;
use vibing_render::domain::ports::{Fetcher, RenderOutcome};
use vibing_render::utils::{logger, validation::Validate};
use vibing_render::{
    CardRenderer, CliConfig, FragmentWriter, HttpFetcher, JsonLoader, MemoryDocument,
    SiteConfig, SiteRenderer, StaticDirFetcher, UrlValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting vibing-render");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let reports = match (&config.site.base_url, &config.site.static_dir) {
        (Some(base_url), _) => {
            let fetcher = HttpFetcher::new(base_url, config.timeout(), &config.fetch.user_agent)?;
            render_site(&config, fetcher).await?
        }
        (None, Some(dir)) => render_site(&config, StaticDirFetcher::new(dir)).await?,
        (None, None) => anyhow::bail!("no data source configured"),
    };

    let fell_back = reports.iter().filter(|r| !r.outcome.is_rendered()).count();
    if fell_back > 0 {
        tracing::warn!("{} widget(s) did not render", fell_back);
        if cli.strict {
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn render_site<F: Fetcher + 'static>(
    config: &SiteConfig,
    fetcher: F,
) -> anyhow::Result<Vec<WidgetReport>> {
    let widgets = config.enabled_widgets();
    let containers: Vec<&str> = widgets.iter().map(|w| w.container.as_str()).collect();
    let document = MemoryDocument::with_mounts(&containers);

    let urls = UrlValidator::new(&config.site.origin)?;
    let renderer =
        CardRenderer::new(JsonLoader::new(fetcher), document.clone()).with_url_validator(urls);
    let reports = SiteRenderer::from_config(config, renderer).render_all().await;

    match &config.output.path {
        Some(path) => {
            let writer = FragmentWriter::new(path);
            for report in &reports {
                if report.outcome == RenderOutcome::MissingMount {
                    continue;
                }
                let content = document.content(&report.container).unwrap_or_default();
                let written = writer.write_fragment(&report.container, &content).await?;
                println!("📁 {}", written.display());
            }
        }
        None => {
            for (container, content) in document.snapshot() {
                println!("<!-- #{} -->", container);
                println!("{}", content);
            }
        }
    }

    Ok(reports)
}
