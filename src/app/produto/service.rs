//! Produto 业务服务

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::model::{NovoProduto, Produto, ProdutoDraft, ProdutoRequest};
use super::repository::ProdutoRepository;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProdutoService {
    repository: Arc<dyn ProdutoRepository>,
}

impl ProdutoService {
    pub fn new(repository: Arc<dyn ProdutoRepository>) -> Self {
        Self { repository }
    }

    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }

    pub async fn list(&self) -> Result<Vec<Produto>, CoreError> {
        let produtos = self.repository.find_all().await?;
        debug!("Listed {} produtos", produtos.len());
        Ok(produtos)
    }

    /// 保存产品：无 id 时创建，有 id 时覆盖同 id 记录
    ///
    /// 提供的 id 不存在时按新记录插入，由存储层重新分配 id。
    pub async fn save(&self, request: ProdutoRequest) -> Result<Produto, CoreError> {
        request.validate()?;

        let draft = request.into_draft().ok_or_else(|| {
            CoreError::Validation("required fields must not be null".to_string())
        })?;

        let produto = match draft {
            ProdutoDraft::Create(novo) => {
                let created = self.repository.create(novo).await?;
                info!("Created {}", created);
                created
            }
            ProdutoDraft::Update(produto) => {
                let requested_id = produto.id();
                match self.repository.update(produto.clone()).await? {
                    Some(updated) => {
                        info!("Updated {}", updated);
                        updated
                    }
                    None => {
                        let novo = NovoProduto {
                            nome: produto.nome().to_string(),
                            quantidade: produto.quantidade().clone(),
                            valor: produto.valor().clone(),
                        };
                        let created = self.repository.create(novo).await?;
                        info!(
                            "No produto with id {}, inserted as {}",
                            requested_id, created
                        );
                        created
                    }
                }
            }
        };

        Ok(produto)
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        self.repository
            .ping()
            .await
            .map_err(|e| CoreError::ServiceUnavailable(e.to_string()))
    }
}
