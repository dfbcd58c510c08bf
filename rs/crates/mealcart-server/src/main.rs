use mealcart_server::config::Config;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::load();
    if let Err(e) = mealcart_server::start_server(config).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
