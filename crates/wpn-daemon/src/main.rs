use tracing::info;

use wpn_core::config::Config;
use wpn_core::history::NowPlaying;

use wpn_daemon::page::PageWriter;
use wpn_daemon::stream::Supervisor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,wpn_daemon=debug")),
        )
        .init();

    let config = Config::load()?;
    info!("Config loaded from: {:?}", Config::config_path());

    let tz = config.page.tz()?;
    let tracker = NowPlaying::new(tz);
    let writer = PageWriter::new(config.page.output_path.clone());
    info!("Writing page to: {:?}", writer.output_path());

    let mut supervisor = Supervisor::new(config.stream, tracker, writer)?;
    supervisor.run().await
}
