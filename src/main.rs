use anyhow::Context;
use log::info;
use sanctions_dashboard::PipelineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::from_env().context("Failed to load configuration")?;
    info!("Writing artifacts to {}", config.outputs.dir.display());

    let artifacts = sanctions_dashboard::run(&config)
        .await
        .context("Sanctions pipeline failed")?;

    info!(
        "Wrote {} table rows and {} timeline buckets",
        artifacts.table.len(),
        artifacts.timeline.len()
    );
    Ok(())
}
