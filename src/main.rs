use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use voxnav::services::stt::{Transcriber, UnavailableTranscriber};
use voxnav::{AppConfig, CommandResolver, SessionManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging goes to stderr, replies to stdout
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    // 2. Composition root
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;
    let resolver = CommandResolver::from_config(&config).context("building command resolver")?;
    let transcriber: Arc<dyn Transcriber> = Arc::new(UnavailableTranscriber);
    let manager = Arc::new(SessionManager::new(resolver, transcriber, &config.session));
    tracing::info!(mode = ?config.nlu.mode, "voxnav starting");

    // 3. Console session: stdin lines in, JSON replies out
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<String>();
    let (session_id, session) = manager.spawn_session(out_tx, in_rx)?;
    tracing::info!(%session_id, "console session open. Type a command or a JSON message.");

    let printer = tokio::spawn(async move {
        while let Some(reply) = out_rx.recv().await {
            println!("{}", reply);
        }
    });

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                // Plain text is sugar for a text_command.
                let wire = if line.starts_with('{') {
                    line.to_string()
                } else {
                    json!({ "type": "text_command", "text": line }).to_string()
                };
                if in_tx.send(wire).is_err() {
                    tracing::warn!("session closed, stopping console");
                    break;
                }
            }
        }
    }

    // Closing the inbound side is the disconnect signal.
    drop(in_tx);
    session.await.context("session task failed")?;
    manager.disconnect(session_id);
    printer.await.context("printer task failed")?;
    tracing::info!("voxnav stopped");
    Ok(())
}
