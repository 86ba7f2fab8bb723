use std::fmt::Debug;

mod core_feature;
mod health_status;
mod lang;
mod shutdown;
mod telemetry;
mod timeable;

pub mod prelude;
pub mod relay;
pub mod static_server;
pub mod streaming;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use async_trait::async_trait;
pub use eyre;
pub use futures_util::StreamExt;
pub use serde::{Deserialize, Serialize};
pub use tokio::main;

pub use core_feature::{Core, CoreConfig};
pub use health_status::{HealthStatus, HealthStatusReport};
pub use lang::sensitive::Sensitive;
pub use prelude::*;
pub use shutdown::shutdown_signal;
pub use streaming::{Message, StreamingClient, StreamingConsumer};
#[cfg(feature = "streaming")]
pub use streaming::{KafkaClient, KafkaConfig, KafkaConsumer};
pub use timeable::Timeable;

#[derive(Debug)]
pub struct Environment<T: Debug + Clone + Args> {
    pub service_name: String,
    pub config: Config<T>,
    pub tracing: Tracing,
}

#[derive(Debug, Clone, Parser)]
pub struct EnvironmentConfig {
    #[clap(flatten)]
    pub core: CoreConfig,

    #[clap(flatten)]
    pub tracing: TracingConfig,
}

#[derive(Debug, Clone, Parser)]
pub struct Config<T: Debug + Clone + Args> {
    #[clap(flatten)]
    pub project: T,

    #[clap(flatten)]
    pub environment: EnvironmentConfig,
}

impl<T: Debug + Clone + Args> Config<T> {
    /// Parses the process arguments and environment, then brings up every ambient feature.
    pub async fn init(service_name: &str) -> Result<Environment<T>> {
        Self::parse().into_environment(service_name).await
    }

    pub async fn into_environment(self, service_name: &str) -> Result<Environment<T>> {
        let Self {
            project,
            environment,
        } = self;

        Core::init(service_name, environment.clone()).await?;
        timeable::init(service_name);

        Ok(Environment {
            service_name: service_name.to_string(),
            tracing: Tracing::init(service_name, environment.clone()).await?,
            config: Self {
                project,
                environment,
            },
        })
    }
}

/// Builds an ad-hoc error report, the same way `eyre!` does.
#[macro_export]
macro_rules! throw {
    ($($arg:tt)*) => {
        $crate::eyre::eyre!($($arg)*)
    };
}
