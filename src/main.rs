use anyhow::Result;
use clap::Parser;
use text2design::gateway::Gateway;
use text2design::models::Config;
use text2design::server;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "text2design")]
#[command(about = "Relay design prompts to Stability AI and return the images")]
struct CliArgs {
    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Single origin allowed to call the API (overrides ALLOWED_ORIGIN).
    #[arg(long, value_name = "ORIGIN")]
    allowed_origin: Option<String>,
}

impl CliArgs {
    fn apply(self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(origin) = self.allowed_origin {
            config.allowed_origin = Some(origin);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text2design=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => args.apply(config),
        Err(e) => {
            error!("Refusing to start: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting text2design gateway on port {}", config.port);

    let gateway = match Gateway::from_config(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Failed to initialize gateway: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(&config, gateway).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
