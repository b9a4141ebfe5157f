use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Digest agent starting up");

    match orchestrator::run_once().await {
        Ok(report) => {
            info!(
                stories = report.stories.len(),
                repositories = report.repositories.len(),
                notified = report.notified,
                "Digest agent finished"
            );
            Ok(())
        }
        Err(e) => {
            error!("Digest agent failed: {:#}", e);
            Err(e)
        }
    }
}
