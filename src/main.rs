use clap::Parser;

use intent_relay::channels::CliChannel;
use intent_relay::config::{API_KEY_VAR, ENDPOINT_VAR, MODEL_VAR, RelayConfig};
use intent_relay::pipeline::IntentPipeline;

/// Multilingual support-intent classifier.
#[derive(Parser, Debug)]
#[command(name = "intent-relay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Translate, classify and relay customer messages")]
struct Args {
    /// Message to classify. Starts an interactive session when omitted.
    message: Vec<String>,

    /// Model identifier
    #[arg(long, env = MODEL_VAR)]
    model: Option<String>,

    /// OpenAI-compatible base URL
    #[arg(long, env = ENDPOINT_VAR)]
    endpoint: Option<String>,

    /// Disable ANSI colors in the prediction banner
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = RelayConfig::from_lookup(|key| match key {
        MODEL_VAR => args.model.clone(),
        ENDPOINT_VAR => args.endpoint.clone(),
        _ => std::env::var(key).ok(),
    })?;

    eprintln!("🌐 Intent Relay v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.llm.model);
    eprintln!("   Endpoint: {}", config.llm.base_url);
    eprintln!(
        "   Webhook: {}",
        if config.webhook_url.is_some() {
            "configured"
        } else {
            "not configured (notifications disabled)"
        }
    );

    // Missing key is not fatal: calls fail later with an auth error.
    if config.api_key_missing() {
        eprintln!("   Warning: {API_KEY_VAR} not set; classification requests will fail.");
        eprintln!("     export {API_KEY_VAR}=...");
        tracing::warn!("{} not set", API_KEY_VAR);
    }

    let pipeline = IntentPipeline::from_config(&config)?;
    let cli = CliChannel::new(!args.no_color);

    if !args.message.is_empty() {
        let text = args.message.join(" ");
        eprintln!();
        if cli.run_once(&pipeline, &text).await.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    eprintln!("   Type a message and press Enter. /quit to exit.\n");
    let stats = cli.run(&pipeline).await?;
    eprintln!(
        "\nProcessed {} message(s), {} failed.",
        stats.processed, stats.failed
    );

    Ok(())
}
