//! Terminal front end for the design studio.
//!
//! Runs a single generation against a running gateway and prints the concept
//! cards, or the error banner when generation fails.

use anyhow::Result;
use clap::Parser;
use text2design::models::UseCase;
use text2design::ui::{
    GatewayClient, SpeechCapability, StudioSession, VoiceToggle, DEFAULT_GATEWAY_URL,
};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "studio")]
#[command(about = "Voice-to-Design AI Studio")]
struct CliArgs {
    /// Gateway base URL.
    #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
    gateway_url: String,

    /// interior, architecture, construction or event.
    #[arg(long, default_value = "interior")]
    use_case: UseCase,

    /// Number of concepts (1-5).
    #[arg(long, default_value_t = 3)]
    count: u32,

    /// Dictate the prompt instead of typing it.
    #[arg(long)]
    voice: bool,

    /// Design idea.
    #[arg(value_name = "PROMPT", num_args = 0..)]
    prompt: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text2design=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    // Terminals have no on-device recognizer.
    let mut session = StudioSession::new(SpeechCapability::Unavailable);
    session.set_prompt(args.prompt.join(" "));
    session.set_use_case(args.use_case);
    session.set_count(args.count);

    if args.voice {
        match session.toggle_voice() {
            Ok(VoiceToggle::Unavailable(notice)) => eprintln!("{}", notice),
            Ok(_) => {
                while session.next_speech_event().await.is_some() && session.is_listening() {}
            }
            Err(e) => warn!("Could not start voice capture: {}", e),
        }
    }

    let client = GatewayClient::new(args.gateway_url);
    println!("{} ({})", session.generate_label(), session.use_case());

    session.generate(&client).await;
    println!("{}", session.view());

    if session.error().is_some() {
        std::process::exit(1);
    }
    Ok(())
}
