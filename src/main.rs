use std::net::SocketAddr;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use clientdesk::bootstrap::app_context::{AppContext, AppServices};
use clientdesk::bootstrap::config::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            clientdesk::presentation::http::clients::list_clients,
            clientdesk::presentation::http::clients::get_client,
            clientdesk::presentation::http::clients::create_client,
            clientdesk::presentation::http::clients::update_client,
            clientdesk::presentation::http::clients::delete_client,
            clientdesk::presentation::http::tags::list_tags,
            clientdesk::presentation::http::tags::suggest_tags,
            clientdesk::presentation::http::health::health,
        ),
        components(schemas(
            clientdesk::presentation::http::clients::Client,
            clientdesk::presentation::http::clients::ClientPageResponse,
            clientdesk::presentation::http::clients::ClientRequest,
            clientdesk::presentation::http::error::ErrorBody,
            clientdesk::presentation::http::error::FieldErrorItem,
            clientdesk::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Clients", description = "Client records"),
            (name = "Tags", description = "Shared tag directory"),
            (name = "Health", description = "Store connection test")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let base = CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(_)) | None if cfg.is_production => {
            // never mirror arbitrary origins in production
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        _ => base.allow_origin(AllowOrigin::mirror_request()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "ctrl_c_listener_failed");
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "clientdesk=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting clientdesk backend");

    let services = AppServices::from_config(&cfg).await?;
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .nest("/api", clientdesk::presentation::http::health::routes(ctx.clone()))
        .nest("/api", clientdesk::presentation::http::clients::routes(ctx.clone()))
        .nest("/api", clientdesk::presentation::http::tags::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
