//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.
//!
//! `--demo` runs against built-in sample data instead of the hosted backend.

use dotenv::dotenv;
use legacy_hub::adapters::gateway::{PostgrestGateway, demo_gateway};
use legacy_hub::adapters::session::MemorySession;
use legacy_hub::adapters::ui::tui::TuiInputPort;
use legacy_hub::ports::{DataGateway, InputPort, SessionStore};
use legacy_hub::shared::config::AppConfig;
use legacy_hub::usecases::{
    BlogService, DirectoryService, ForumService, LoginService, ProfileService, Router,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    // Logs go to stderr and default to warn so they stay out of the prompts.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let demo = std::env::args().skip(1).any(|a| a == "--demo");
    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be read, falling back to environment only");
        AppConfig::default()
    });

    // --- Gateway: hosted backend unless running the demo ---
    let gateway: Arc<dyn DataGateway> = if demo {
        info!("demo mode: using in-memory sample data");
        Arc::new(demo_gateway())
    } else {
        let backend = cfg.backend().map_err(|e| anyhow::anyhow!("{}", e))?;
        info!(url = %backend.url, "using hosted backend");
        Arc::new(PostgrestGateway::new(&backend))
    };

    legacy_hub::adapters::ui::init_ui();
    if demo {
        println!("Demo logins: lincoln / union, roosevelt / deal");
    }

    // --- Session + routing ---
    let session: Arc<dyn SessionStore> = Arc::new(MemorySession::new());
    let router = Arc::new(Router::new(Arc::clone(&session)));

    // --- Services ---
    let login = Arc::new(LoginService::new(Arc::clone(&gateway), Arc::clone(&session)));
    let directory = Arc::new(DirectoryService::new(Arc::clone(&gateway)));
    let profiles = Arc::new(ProfileService::new(
        Arc::clone(&gateway),
        Arc::clone(&session),
    ));
    let forum = Arc::new(ForumService::new(Arc::clone(&gateway), Arc::clone(&session)));
    let blog = Arc::new(BlogService::new(Arc::clone(&gateway)));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        router, login, directory, profiles, forum, blog,
    ));

    input_port
        .run(&cfg.start_path_or_default())
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
