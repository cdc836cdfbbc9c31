use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use agent_chat_sync::api::HttpAgentApi;
use agent_chat_sync::config::ClientConfig;
use agent_chat_sync::models::SendForm;
use agent_chat_sync::sync::{PollLoop, SubmissionCoordinator};
use agent_chat_sync::view::terminal::{LineInput, TerminalNavigator, TerminalRenderer};
use agent_chat_sync::view::ChatView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the transcript
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_chat_sync=info".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    info!("Talking to agent at {}", config.base_url);

    // ── Wiring ────────────────────────────────────────────────────────────────
    let api = Arc::new(HttpAgentApi::new(&config));
    let view = ChatView::new(TerminalRenderer::stdout());
    let poller = PollLoop::new(Arc::clone(&api), view).with_delay(config.poll_delay);
    let mut coordinator =
        SubmissionCoordinator::new(api, poller, LineInput::new(), TerminalNavigator::default());
    let mut form = SendForm::new(config.send_path.clone(), config.conv_id);

    // Resuming a conversation: show what is already there
    if let Some(conv_id) = config.conv_id {
        coordinator.poller().poll(conv_id).await;
    }

    // ── Read-submit loop ──────────────────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        coordinator.input_mut().type_line(&line);

        let (outcome, poll) = coordinator.submit(&mut form).await.finish().await;
        info!(?outcome, ?poll, "submission finished");

        if coordinator.navigator().target().is_some() {
            break;
        }
    }

    Ok(())
}
