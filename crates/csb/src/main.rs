use std::sync::Arc;

use csb_core::config::Config;
use csb_github::GithubCodespacesClient;

#[tokio::main]
async fn main() -> Result<(), csb_core::Error> {
    csb_core::logging::init("csb")?;

    let cfg = Arc::new(Config::load()?);
    tracing::info!(api_base = %cfg.github_api_base, "using GitHub API");

    let codespaces = Arc::new(GithubCodespacesClient::new(
        cfg.github_api_base.clone(),
        cfg.github_request_timeout,
    )?);

    csb_telegram::router::run_polling(cfg, codespaces)
        .await
        .map_err(|e| csb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
