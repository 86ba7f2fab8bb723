use crate::{async_trait, EnvironmentConfig, Feature, Parser, Result};

#[derive(Debug, Clone, Parser)]
pub struct CoreConfig {
    // NO_COLOR is set to any non-empty value by convention, e.g. NO_COLOR=1
    #[clap(
        short,
        long,
        env = "NO_COLOR",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}

pub struct Core;

#[async_trait]
impl Feature for Core {
    async fn init(_service_name: &str, config: EnvironmentConfig) -> Result<Self> {
        if !config.core.no_color {
            color_eyre::install()?;
        }

        Ok(Self)
    }
}
