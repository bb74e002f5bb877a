#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .try_init();

    if let Err(e) = leadpulse::run().await {
        tracing::error!(error = %e, "fatal error");
        std::process::exit(1);
    }
}
