use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;

use super::{ConfigArgs, load_config};

/// Serve the output tree locally.
///
/// The tree is served from `/`, so after a build both `/page/` and
/// `/<base path>/page/` can be checked in a browser.
pub async fn run(args: ConfigArgs, port: u16) -> Result<()> {
    let config = load_config(&args)?;
    let site_dir = config.site.site_dir.clone();

    println!("🌐 Starting preview server...");
    println!("   Site: {}", site_dir.display());

    if !site_dir.is_dir() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun the site generator and 'sitegraft build' first",
            site_dir.display()
        );
    }

    let app = Router::new().fallback_service(ServeDir::new(&site_dir));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}/", port);
    if !config.base_path.is_empty() {
        println!(
            "   Base path copy:   http://localhost:{}{}/",
            port, config.base_path
        );
    }
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
