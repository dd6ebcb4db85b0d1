mod roster;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let bind = std::env::var("SCRAWL_BIND").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let state = state::AppState::new();
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%bind, %port, "scrawl relay listening");
    axum::serve(listener, app).await.expect("server failed");
}
