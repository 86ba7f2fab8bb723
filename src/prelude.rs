pub use crate::{
    telemetry::{Tracing, TracingConfig, TracingFormat},
    Config, Environment, EnvironmentConfig,
};

// Traits
pub use clap::{self, Args, Parser};
pub use eyre::WrapErr;

// Type Replacements
pub use eyre::Result;
pub use tokio::{main as async_main, sync, task, time};

pub use tracing::{debug, error, info, instrument, instrument::Instrument, span, trace, warn};

// Feature enablement
#[crate::async_trait]
pub trait Feature {
    async fn init(service_name: &str, config: EnvironmentConfig) -> Result<Self>
    where
        Self: Sized;
}
