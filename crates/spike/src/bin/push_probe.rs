//! Push probe: send one push message through the live LINE Messaging API and print the response.
//!
//! Reads `line.bot.*` from the config file and the LINE_API_URL / LINE_CHANNEL_TOKEN env overrides.
//!
//!   push-probe --to Uxxxxxxxx --text "hello"
//!   push-probe --payload push.json

use anyhow::{bail, Context};
use clap::Parser;
use line_gateway::client::LineClient;
use line_gateway::config;
use line_gateway::messaging::MessagingService;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "push-probe")]
#[command(about = "Send one push message via the LINE Messaging API", long_about = None)]
struct Args {
    /// Config file path (default: LINE_CONFIG_PATH or ~/.line-gateway/config.json)
    #[arg(long, short, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Recipient user, group or room id.
    #[arg(long, value_name = "ID", conflicts_with = "payload")]
    to: Option<String>,

    /// Text of a single text message (used with --to).
    #[arg(long, default_value = "push-probe test message")]
    text: String,

    /// Full push request body as a JSON file; sent verbatim.
    #[arg(long, value_name = "FILE")]
    payload: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("push-probe failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let request = build_request(&args)?;
    let (config, path) = config::load_config(args.config)?;
    log::debug!("using config {}", path.display());
    let settings = config::resolve_bot_settings(&config)?;
    let client = LineClient::new(&settings)?;
    let service = MessagingService::new(client);

    let response = service.send_push(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn build_request(args: &Args) -> anyhow::Result<serde_json::Value> {
    if let Some(ref file) = args.payload {
        let s = std::fs::read_to_string(file)
            .with_context(|| format!("reading payload from {}", file.display()))?;
        return serde_json::from_str(&s)
            .with_context(|| format!("parsing payload from {}", file.display()));
    }
    let Some(ref to) = args.to else {
        bail!("either --to or --payload is required");
    };
    Ok(serde_json::json!({
        "to": to,
        "messages": [{ "type": "text", "text": args.text }]
    }))
}
