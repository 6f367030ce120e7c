//! Minimal host program: builds a model from flags and dispatches one call.
//!
//!   cargo run --example send -- pull http://localhost:8080/config/pull --field port --field host
//!   cargo run --example send -- post http://localhost:8080/config/upload --file ./app.cfg

use std::path::PathBuf;

use clap::Parser;
use clientsdk::{local_mac, Dispatcher, DispatcherConfig, StaticModel};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "send")]
struct Args {
    /// download, pull, post or put
    method: String,
    /// Target URL
    router: String,
    /// Local file to upload (post only)
    #[arg(long)]
    file: Option<PathBuf>,
    /// uid to send; defaults to this host's hardware address
    #[arg(long)]
    uid: Option<String>,
    /// Field requested by a pull (repeatable)
    #[arg(long = "field")]
    fields: Vec<String>,
    /// key=value pair sent by a put (repeatable); values are parsed as JSON when possible
    #[arg(long = "set")]
    updates: Vec<String>,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut model = StaticModel::new(args.uid.unwrap_or_else(local_mac)).with_fields(args.fields);
    for pair in &args.updates {
        let Some((key, raw)) = pair.split_once('=') else {
            anyhow::bail!("--set expects key=value, got {}", pair);
        };
        let value = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::from(raw));
        model = model.with_update(key, value);
    }

    let mut config = DispatcherConfig::default();
    if let Some(secs) = args.timeout {
        config = config.timeout_secs(secs);
    }
    let dispatcher = Dispatcher::with_config(config)?;

    let body = dispatcher.send(&args.method, &args.router, args.file.as_deref(), &model)?;
    tracing::info!("received {} bytes", body.len());
    Ok(())
}
