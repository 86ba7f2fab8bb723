use tracing_subscriber::{
    fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};
use tracing_tree::HierarchicalLayer;

use crate::{async_trait, EnvironmentConfig, Feature, Parser, Result, WrapErr};

// -----------------------------------------------------------------------------
// Supported Formats
// -----------------------------------------------------------------------------
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum TracingFormat {
    None,
    Compact,
    Pretty,
    Json,
    Hierarchical,
}

// -----------------------------------------------------------------------------
// Config
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Parser)]
pub struct TracingConfig {
    #[clap(
        long = "tracing-disable-opentelemetry",
        env = "TRACING_DISABLE_OPENTELEMETRY",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub disable_opentelemetry: bool,

    #[clap(
        long = "tracing-opentelemetry-endpoint",
        env = "TRACING_OPENTELEMETRY_ENDPOINT",
        default_value = "http://localhost:14268/api/traces"
    )]
    pub opentelemetry_endpoint: String,

    #[clap(
        long = "tracing-log-level",
        env = "TRACING_LOG_LEVEL",
        default_value = "info"
    )]
    pub log_level: String,

    #[clap(
        value_enum,
        long = "tracing-format",
        env = "TRACING_FORMAT",
        default_value = "compact"
    )]
    pub format: TracingFormat,
}

// -----------------------------------------------------------------------------
// Service
// -----------------------------------------------------------------------------
#[derive(Debug)]
pub struct Tracing {
    opentelemetry: bool,
}

#[async_trait]
impl Feature for Tracing {
    async fn init(service_name: &str, config: EnvironmentConfig) -> Result<Self> {
        let filter = EnvFilter::try_new(&config.tracing.log_level)
            .wrap_err("Invalid tracing log level")?;

        let telemetry = if config.tracing.disable_opentelemetry {
            None
        } else {
            let tracer = opentelemetry_jaeger::new_collector_pipeline()
                .with_endpoint(&config.tracing.opentelemetry_endpoint)
                .with_service_name(service_name)
                .with_reqwest()
                .install_batch(opentelemetry::runtime::Tokio)?;
            Some(
                tracing_opentelemetry::layer()
                    .with_tracked_inactivity(false)
                    .with_tracer(tracer),
            )
        };

        // tracing_subscriber can't add a layer conditionally, but an Option<Layer> is itself a
        // layer that does nothing when None. see https://github.com/tokio-rs/tracing/issues/894
        let ansi = !config.core.no_color;
        let (layer_compact, layer_pretty, layer_json, layer_hierarchical) =
            match config.tracing.format {
                TracingFormat::None => (None, None, None, None),
                TracingFormat::Compact => (
                    Some(Layer::default().compact().with_target(true).with_ansi(ansi)),
                    None,
                    None,
                    None,
                ),
                TracingFormat::Pretty => (
                    None,
                    Some(
                        Layer::default()
                            .pretty()
                            .with_thread_ids(true)
                            .with_thread_names(true)
                            .with_target(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_ansi(ansi),
                    ),
                    None,
                    None,
                ),
                TracingFormat::Json => (
                    None,
                    None,
                    Some(
                        Layer::default()
                            .json()
                            .flatten_event(true)
                            .with_current_span(true),
                    ),
                    None,
                ),
                TracingFormat::Hierarchical => (
                    None,
                    None,
                    None,
                    Some(
                        HierarchicalLayer::new(2)
                            .with_targets(true)
                            .with_bracketed_fields(true)
                            .with_ansi(ansi),
                    ),
                ),
            };

        Registry::default()
            .with(filter)
            .with(telemetry)
            .with(layer_compact)
            .with(layer_pretty)
            .with(layer_json)
            .with(layer_hierarchical)
            .try_init()?;

        tracing::debug!(service_name, format = ?config.tracing.format, "started tracer");

        Ok(Self {
            opentelemetry: !config.tracing.disable_opentelemetry,
        })
    }
}

impl Drop for Tracing {
    fn drop(&mut self) {
        tracing::debug!("stopping tracer");
        if self.opentelemetry {
            opentelemetry::global::shutdown_tracer_provider();
        }
    }
}
