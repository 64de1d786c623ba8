use std::env;

use tracing_subscriber::EnvFilter;
use workmate_rs::api::server::TaskServer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(8080);

    let server = TaskServer::new(port, None);
    if let Err(err) = server.start().await {
        eprintln!("server error: {}", err);
    }
}
