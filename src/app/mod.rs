//! 应用层：路由与共享状态

pub mod produto;

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, middleware, response::Json, routing::get, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::{error::CoreError, middleware::request_logging_middleware};
use crate::infrastructure::config::Config;
use produto::{handler, InMemoryProdutoRepository, ProdutoRepository, ProdutoService};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub produto_service: ProdutoService,
}

impl AppState {
    pub fn new(produto_service: ProdutoService) -> Self {
        Self { produto_service }
    }
}

/// 构建完整路由
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/produtos", get(handler::lista_produtos))
        .route("/api/salvar", post(handler::salvar))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}

// 健康检查
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, CoreError> {
    state.produto_service.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "storage": state.produto_service.backend(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// 根据配置选择仓储：配置了数据库连接串时使用 PostgreSQL，否则使用内存存储
pub async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn ProdutoRepository>> {
    match config.database.url.as_deref() {
        #[cfg(feature = "database")]
        Some(url) => {
            let db =
                crate::infrastructure::database::DatabaseManager::new(url, &config.database)
                    .await?;
            db.migrate().await?;
            Ok(Arc::new(produto::PgProdutoRepository::new(
                db.get_pool().clone(),
            )))
        }
        #[cfg(not(feature = "database"))]
        Some(_) => anyhow::bail!("database.url is set but the `database` feature is disabled"),
        None => {
            warn!("No database configured, produtos are kept in memory only");
            Ok(Arc::new(InMemoryProdutoRepository::new()))
        }
    }
}
