use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bhub::adapters::auth::{GoogleIdentityProvider, JwtTokenService};
use bhub::adapters::gateway::{HttpGatewayConfig, HttpPaymentGateway, MockPaymentGateway};
use bhub::adapters::http::{router, AppState};
use bhub::adapters::memory::{
    InMemoryHubRepository, InMemoryPaymentRepository, InMemoryUserRepository,
};
use bhub::adapters::postgres::{
    run_migrations, PostgresHubRepository, PostgresPaymentRepository, PostgresUserRepository,
};
use bhub::config::{AppConfig, GatewayKind, PaymentConfig};
use bhub::ports::{HubRepository, PaymentGateway, PaymentRepository, UserRepository};

type Stores = (
    Arc<dyn UserRepository>,
    Arc<dyn HubRepository>,
    Arc<dyn PaymentRepository>,
);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    let (users, hubs, payments) = build_stores(&config).await?;
    let gateway = build_gateway(&config.payment)?;

    if config.auth.google_client_id.trim().is_empty() {
        warn!("BHUB__AUTH__GOOGLE_CLIENT_ID is not set; Google logins will be rejected");
    }
    let identity = Arc::new(
        GoogleIdentityProvider::new(
            config.auth.google_client_id.clone(),
            config.auth.tokeninfo_url.clone(),
            config.auth.timeout(),
        )
        .context("failed to build identity provider client")?,
    );

    if config.auth.token_secret.is_none() {
        warn!("No token secret configured; sessions will not survive a restart");
    }
    let token_service = Arc::new(JwtTokenService::new(
        &config.auth.token_secret_or_ephemeral(),
        config.auth.token_ttl_secs,
    ));

    let state = AppState {
        users,
        hubs,
        payments,
        gateway,
        identity,
        tokens: token_service.clone(),
        sessions: token_service,
    };

    let app = router(state)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, environment = ?config.server.environment, "BHub listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("BHub stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

async fn build_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    let Some(url) = config.database.url() else {
        info!("No database configured, using in-memory stores");
        return Ok((
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryHubRepository::new()),
            Arc::new(InMemoryPaymentRepository::new()),
        ));
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(url)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        run_migrations(&pool).await?;
        info!("Database migrations applied");
    }

    Ok((
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresHubRepository::new(pool.clone())),
        Arc::new(PostgresPaymentRepository::new(pool)),
    ))
}

fn build_gateway(config: &PaymentConfig) -> anyhow::Result<Arc<dyn PaymentGateway>> {
    match config.gateway {
        GatewayKind::Mock => {
            warn!("Using the mock payment gateway; every charge is approved");
            Ok(Arc::new(MockPaymentGateway::new()))
        }
        GatewayKind::Http => {
            // validate() has already checked these are present
            let (Some(base_url), Some(api_key), Some(signing_secret)) = (
                config.base_url.clone(),
                config.api_key.clone(),
                config.signing_secret.clone(),
            ) else {
                anyhow::bail!("payment gateway credentials are incomplete");
            };
            let gateway = HttpPaymentGateway::new(HttpGatewayConfig {
                base_url,
                api_key,
                signing_secret,
                timeout: config.timeout(),
            })?;
            Ok(Arc::new(gateway))
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
