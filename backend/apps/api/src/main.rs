//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod schema;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use auth::{AuthConfig, AuthStore, MemoryAuthRepository, PgAuthRepository, resolve_viewer};
use axum::{
    Router,
    extract::State,
    http::{self, HeaderMap, Method, header},
    response::{Html, IntoResponse},
    routing::get,
};
use blog::{BlogStore, MemoryBlogRepository, PgBlogRepository};
use kernel::error::app_error::AppError;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ApiConfig, StorageKind};
use crate::schema::{AppSchema, build_schema};

#[derive(Clone)]
struct AppState {
    schema: AppSchema,
    auth_store: Arc<AuthStore>,
    auth_config: Arc<AuthConfig>,
}

async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let viewer = resolve_viewer(&headers, &state.auth_store, &state.auth_config).await;

    state
        .schema
        .execute(req.into_inner().data(viewer))
        .await
        .into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health() -> &'static str {
    "ok"
}

async fn fallback() -> AppError {
    AppError::not_found("No route matches this path")
}

async fn connect_stores(config: &ApiConfig) -> anyhow::Result<(AuthStore, BlogStore)> {
    match config.storage {
        StorageKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set in environment")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            Ok((
                PgAuthRepository::new(pool.clone()).into(),
                PgBlogRepository::new(pool).into(),
            ))
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");
            let users = MemoryAuthRepository::new();
            Ok((
                users.clone().into(),
                MemoryBlogRepository::new(users).into(),
            ))
        }
    }
}

fn app(state: AppState, origins: &[String]) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .fallback(fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let (auth_store, blog_store) = connect_stores(&config).await?;
    let auth_store = Arc::new(auth_store);
    let auth_config = Arc::new(config.auth.clone());
    let blog_store = Arc::new(blog_store);

    let state = AppState {
        schema: build_schema(auth_store.clone(), auth_config.clone(), blog_store),
        auth_store,
        auth_config,
    };

    let app = app(state, &config.frontend_origins);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
