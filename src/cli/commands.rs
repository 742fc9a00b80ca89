use crate::cli::{Cli, Commands, ExportFormat, TreeFormat};
use crate::config::Config;
use crate::directory::{DirectoryClient, FixtureDirectory};
use crate::inventory::{app_slugs, filter_by_app, Cluster, Inventory, LabelExtractor};
use crate::metrics::PrometheusExporter;
use crate::ui::{render_labels, render_tree};
use crate::Result;
use anyhow::{anyhow, Context as _};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    pub fixture: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Config::load(path)?
            }
            None => Config::default(),
        };

        Ok(Self {
            config,
            fixture: cli.fixture.clone(),
        })
    }

    fn directory(&self) -> Result<Arc<dyn DirectoryClient>> {
        let directory = match &self.fixture {
            Some(path) => FixtureDirectory::from_path(path)?,
            None => {
                warn!("No --fixture given, using the built-in sample fleet");
                FixtureDirectory::sample()?
            }
        };
        Ok(Arc::new(directory))
    }

    fn inventory(&self) -> Result<Inventory> {
        Inventory::new(self.directory()?, &self.config)
    }
}

/// Binary entry point: load settings, then dispatch the chosen command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let context = Context::from_cli(&cli).context("Failed to load configuration")?;

    let command = cli
        .command
        .ok_or_else(|| anyhow!("No command specified. Use --help for usage information."))?;

    handle_command(command, &context)
        .await
        .context("Command failed")
}

pub async fn handle_command(command: Commands, context: &Context) -> Result<()> {
    match command {
        Commands::Clusters { app, format } => {
            let output = handle_clusters(context, app, format).await?;
            print!("{}", output);
        }
        Commands::Apps => {
            let output = handle_apps(context).await?;
            print!("{}", output);
        }
        Commands::Labels { images } => {
            print!("{}", handle_labels(context, &images)?);
        }
        Commands::Export { format, output } => {
            let rendered = handle_export(context, format).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!("Export written to {}", path.display());
                }
                None => print!("{}", rendered),
            }
        }
    }
    Ok(())
}

pub async fn handle_clusters(
    context: &Context,
    app: Option<String>,
    format: TreeFormat,
) -> Result<String> {
    let clusters = context.inventory()?.clusters().await?;
    let clusters = match app {
        Some(app) => {
            info!("Filtering by app: {}", app);
            filter_by_app(clusters, &app)
        }
        None => clusters,
    };

    render_clusters(&clusters, format)
}

pub async fn handle_apps(context: &Context) -> Result<String> {
    let clusters = context.inventory()?.clusters().await?;
    let slugs = app_slugs(&clusters);

    if slugs.is_empty() {
        return Ok("No application labels found\n".to_string());
    }
    Ok(slugs.iter().map(|s| format!("{}\n", s)).collect())
}

pub fn handle_labels(context: &Context, images: &[String]) -> Result<String> {
    let extractor = LabelExtractor::new(&context.config.labels)?;

    Ok(images
        .iter()
        .map(|image| render_labels(image, &extractor.extract(image)))
        .collect())
}

pub async fn handle_export(context: &Context, format: ExportFormat) -> Result<String> {
    let inventory = context.inventory()?;
    let clusters = inventory.clusters().await?;

    match format {
        ExportFormat::Json => render_clusters(&clusters, TreeFormat::Json),
        ExportFormat::Yaml => render_clusters(&clusters, TreeFormat::Yaml),
        ExportFormat::Prometheus => {
            PrometheusExporter::new(inventory.metrics().clone()).format_metrics()
        }
    }
}

fn render_clusters(clusters: &[Cluster], format: TreeFormat) -> Result<String> {
    match format {
        TreeFormat::Text => Ok(render_tree(clusters)),
        TreeFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(clusters)?)),
        TreeFormat::Yaml => Ok(serde_yaml::to_string(clusters)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn sample_context() -> Context {
        Context {
            config: Config::default(),
            fixture: None,
        }
    }

    #[tokio::test]
    async fn test_apps_from_sample_fleet() {
        let output = handle_apps(&sample_context()).await.unwrap();
        assert_eq!(output, "wl-messenger\nwl-widgets\n");
    }

    #[tokio::test]
    async fn test_clusters_json_filtered() {
        let output = handle_clusters(
            &sample_context(),
            Some("wl-widgets".to_string()),
            TreeFormat::Json,
        )
        .await
        .unwrap();

        let clusters: Vec<Cluster> = serde_json::from_str(&output).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].name, "prod");
        assert_eq!(clusters[0].services.len(), 1);
        assert_eq!(clusters[0].services[0].labels.component, "api");
    }

    #[tokio::test]
    async fn test_export_prometheus_after_run() {
        let output = handle_export(&sample_context(), ExportFormat::Prometheus)
            .await
            .unwrap();

        assert!(output.contains("fleetmap_runs_total 1"));
        assert!(output.contains("fleetmap_clusters 2"));
        assert!(output.contains("fleetmap_services 4"));
    }

    #[test]
    fn test_labels_command() {
        let output = handle_labels(
            &sample_context(),
            &["registry/org/prod-web-api".to_string()],
        )
        .unwrap();

        assert!(output.contains("env:       prod"));
        assert!(output.contains("component: web-api"));
        assert!(output.contains("version:   -"));
    }

    #[test]
    fn test_missing_fixture_is_reported() {
        let context = Context {
            config: Config::default(),
            fixture: Some(PathBuf::from("/nonexistent/fleet.yaml")),
        };

        let err = context.inventory().err().unwrap();
        assert!(err.to_string().contains("/nonexistent/fleet.yaml"));
    }

    #[tokio::test]
    async fn test_run_reports_config_error_with_context() {
        let cli = Cli::try_parse_from(["fleetmap", "-c", "/nonexistent/fleetmap.yaml", "apps"])
            .unwrap();

        let err = run(cli).await.unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.starts_with("Failed to load configuration"));
        assert!(chain.contains("/nonexistent/fleetmap.yaml"));
    }

    #[tokio::test]
    async fn test_run_without_command_fails() {
        let cli = Cli::try_parse_from(["fleetmap"]).unwrap();

        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("No command specified"));
    }
}
