//! REST server wiring the family routers onto one shared catalog state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::dispatch::{
    ApiService, ConnectionService, FilesService, TopicService, ValidValuesService,
};
use crate::observability::{CallLog, Logger};
use crate::repository::MetadataRepository;

use super::api_routes::api_routes;
use super::config::RestServerConfig;
use super::connection_routes::connection_routes;
use super::files_routes::files_routes;
use super::topic_routes::topic_routes;
use super::valid_values_routes::valid_values_routes;

/// Shared state behind every route: one service per resource family, all
/// backed by the same repository and call log
pub struct CatalogState {
    pub apis: ApiService,
    pub connections: ConnectionService,
    pub files: FilesService,
    pub topics: TopicService,
    pub valid_values: ValidValuesService,
}

impl CatalogState {
    pub fn new(repository: Arc<dyn MetadataRepository>, call_log: Arc<dyn CallLog>) -> Self {
        Self {
            apis: ApiService::new(repository.clone(), call_log.clone()),
            connections: ConnectionService::new(repository.clone(), call_log.clone()),
            files: FilesService::new(repository.clone(), call_log.clone()),
            topics: TopicService::new(repository.clone(), call_log.clone()),
            valid_values: ValidValuesService::new(repository, call_log),
        }
    }
}

/// REST facade server
pub struct CatalogServer {
    config: RestServerConfig,
    router: Router,
}

impl CatalogServer {
    pub fn new(
        config: RestServerConfig,
        repository: Arc<dyn MetadataRepository>,
        call_log: Arc<dyn CallLog>,
    ) -> Self {
        let state = Arc::new(CatalogState::new(repository, call_log));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &RestServerConfig, state: Arc<CatalogState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let scoped = Router::new()
            .merge(api_routes())
            .merge(connection_routes())
            .merge(files_routes())
            .merge(topic_routes())
            .merge(valid_values_routes());

        Router::new()
            .route("/health", get(health_handler))
            .nest("/servers/:server_name/users/:user_id", scoped)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start serving (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        Logger::info(
            "SERVER_START",
            &[("addr", addr.to_string().as_str())],
        );
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemoryCallLog;
    use crate::repository::InMemoryRepository;

    fn server(config: RestServerConfig) -> CatalogServer {
        CatalogServer::new(
            config,
            Arc::new(InMemoryRepository::new()),
            Arc::new(MemoryCallLog::new()),
        )
    }

    #[test]
    fn test_default_socket_addr() {
        let server = server(RestServerConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:9443");
    }

    #[test]
    fn test_router_builds() {
        let server = server(RestServerConfig::with_port(8080));
        let _router = server.router();
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("ok"));
    }
}
