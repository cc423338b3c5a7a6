//! Produto 处理器

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Produto, ProdutoRequest};
use crate::app::AppState;
use crate::core::error::CoreError;

/// GET /api/produtos
pub async fn lista_produtos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Produto>>, CoreError> {
    let produtos = state.produto_service.list().await?;
    Ok(Json(produtos))
}

/// POST /api/salvar
pub async fn salvar(
    State(state): State<AppState>,
    payload: Result<Json<ProdutoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Produto>), CoreError> {
    let Json(request) = payload?;
    let produto = state.produto_service.save(request).await?;
    Ok((StatusCode::CREATED, Json(produto)))
}
