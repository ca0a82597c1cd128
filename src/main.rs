use axum::{
    routing::{get, patch},
    Router,
};
use job_tracker_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{cors, rate_limit},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let api = Router::new()
        .route("/api/health", get(routes::health::health))
        .route(
            "/api/applications",
            get(routes::application_routes::list_applications)
                .post(routes::application_routes::create_application),
        )
        .route(
            "/api/applications/changes/poll",
            get(routes::application_routes::poll_changes),
        )
        .route(
            "/api/applications/:id",
            get(routes::application_routes::get_application)
                .put(routes::application_routes::update_application)
                .delete(routes::application_routes::delete_application),
        )
        .route(
            "/api/applications/:id/status",
            patch(routes::application_routes::update_application_status),
        )
        .route(
            "/api/analytics",
            get(routes::analytics_routes::get_analytics),
        )
        .route(
            "/api/analytics/period/:period",
            get(routes::analytics_routes::get_period_analytics),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.api_rps),
            rate_limit::rps_middleware,
        ));

    let app = api
        .with_state(app_state)
        .layer(cors::permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
