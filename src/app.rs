use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::SiteConfig;
use crate::interfaces::http::start_server;

/// `RUST_LOG` wins when set; otherwise everything at `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SiteConfig::load()?;

    start_server(&config)?.await?;
    info!("Server stopped");
    Ok(())
}
