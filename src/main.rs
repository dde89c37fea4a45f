//! jira-agile - command-line client for the JIRA Agile REST API.

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use jira_agile::cli::{self, Cli};
use jira_agile::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref())?;

    let ctx = CancellationToken::new();
    let cancel = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling");
            cancel.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    if let Err(err) = cli::run(cli, &ctx, &mut stdout).await {
        tracing::error!(error = %err, critical = err.is_critical(), "Command failed");
        if let Some(action) = err.suggested_action() {
            eprintln!("{}", action);
        }
        let message = err.user_message();
        return Err(err).context(message);
    }

    Ok(())
}
