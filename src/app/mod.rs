//! 应用层：路由与共享状态

pub mod product;

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::core::middleware::request_logging_middleware;
use product::{handler, ProductRepository, ProductService};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub data_path: String,
}

impl AppState {
    /// 按配置组装仓储与服务
    pub fn from_config(config: &Config) -> Self {
        let repo = Arc::new(ProductRepository::from_config(&config.storage));
        Self {
            product_service: ProductService::new(repo),
            data_path: config.storage.data_path.display().to_string(),
        }
    }
}

#[derive(Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    data_path: String,
    timestamp: String,
}

async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        data_path: state.data_path,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
